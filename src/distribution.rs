//! Parameterised probability distribution families.
//!
//! Each family is a zero-sized marker type implementing [`Family`]: it names itself and its
//! parameters, validates parameter values by building a [`rand_distr`] sampler from them, and
//! evaluates its theoretical density for plotting.

use std::fmt;

use rand::distributions::Distribution;

use crate::error::{Error, Result};
use crate::numerics::Variate;

pub mod continuous;
pub mod discrete;
pub mod negative_binomial;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// How many parameters a family takes and of which type.
pub enum ParameterKind {
    IntegerPair,
    RealPair,
    Real,
    /// A single double-precision value. Usually a probability, but Poisson keeps its mean here.
    Probability,
    IntegerAndProbability,
}

impl ParameterKind {
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Real | Self::Probability => 1,
            Self::IntegerPair | Self::RealPair | Self::IntegerAndProbability => 2,
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IntegerPair => "two integers",
            Self::RealPair => "two reals",
            Self::Real => "one real",
            Self::Probability => "one probability",
            Self::IntegerAndProbability => "one integer and one probability",
        })
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
/// Current parameter values of a family, tagged by kind.
pub enum Parameters {
    IntegerPair(i32, i32),
    RealPair(f32, f32),
    Real(f32),
    Probability(f64),
    IntegerAndProbability(i32, f64),
}

impl Parameters {
    #[must_use]
    pub fn kind(self) -> ParameterKind {
        match self {
            Self::IntegerPair(..) => ParameterKind::IntegerPair,
            Self::RealPair(..) => ParameterKind::RealPair,
            Self::Real(_) => ParameterKind::Real,
            Self::Probability(_) => ParameterKind::Probability,
            Self::IntegerAndProbability(..) => ParameterKind::IntegerAndProbability,
        }
    }

    #[must_use]
    /// The live values widened to `f64`; always exactly [`ParameterKind::arity`] long.
    pub fn values(self) -> Vec<f64> {
        match self {
            Self::IntegerPair(a, b) => vec![a.into(), b.into()],
            Self::RealPair(a, b) => vec![a.into(), b.into()],
            Self::Real(a) => vec![a.into()],
            Self::Probability(p) => vec![p],
            Self::IntegerAndProbability(n, p) => vec![n.into(), p],
        }
    }
}

/// Rust-side representation of one [`ParameterKind`].
pub trait ParameterSet: Copy + Send + Sync + 'static {
    const KIND: ParameterKind;

    /// Fails with [`Error::TypeMismatch`] if `parameters` is of another kind.
    fn from_parameters(parameters: Parameters) -> Result<Self>;
    fn into_parameters(self) -> Parameters;
}

macro_rules! parameter_set {
    ($ty:ty, $kind:ident, $a:ident) => {
        parameter_set!(@impl $ty, $kind, ($a), $a);
    };
    ($ty:ty, $kind:ident, $a:ident, $b:ident) => {
        parameter_set!(@impl $ty, $kind, ($a, $b), ($a, $b));
    };
    (@impl $ty:ty, $kind:ident, $pattern:tt, $value:tt) => {
        impl ParameterSet for $ty {
            const KIND: ParameterKind = ParameterKind::$kind;

            fn from_parameters(parameters: Parameters) -> Result<Self> {
                match parameters {
                    Parameters::$kind $pattern => Ok($value),
                    other => Err(Error::TypeMismatch {
                        expected: Self::KIND,
                        found: other.kind(),
                    }),
                }
            }

            fn into_parameters(self) -> Parameters {
                let $value = self;
                Parameters::$kind $pattern
            }
        }
    };
}

parameter_set!((i32, i32), IntegerPair, a, b);
parameter_set!((f32, f32), RealPair, a, b);
parameter_set!(f32, Real, a);
parameter_set!(f64, Probability, p);
parameter_set!((i32, f64), IntegerAndProbability, n, p);

/// A parametric distribution family.
pub trait Family: 'static {
    const NAME: &'static str;
    const PARAMETER_NAMES: &'static [&'static str];

    type Params: ParameterSet;
    type Variate: Variate;
    type Sampler: Distribution<Self::Variate> + Clone + Send + Sync;

    fn default_params() -> Self::Params;

    /// Validate `params` against the family's constraints and build a sampler from them.
    fn sampler(params: Self::Params) -> Result<Self::Sampler>;

    /// Probability density (or, for discrete families, mass at the nearest integer) at `x`.
    fn density(params: Self::Params, x: f64) -> f64;
}

pub(crate) fn finite(family: &'static str, name: &str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid(family, format!("{name} must be finite, got {value}")))
    }
}

pub(crate) fn positive(family: &'static str, name: &str, value: f32) -> Result<f32> {
    if finite(family, name, value)? > 0. {
        Ok(value)
    } else {
        Err(Error::invalid(family, format!("{name} must be positive, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{ParameterKind, ParameterSet, Parameters};
    use crate::error::Error;

    #[test]
    fn arity_matches_live_values() {
        let all = [
            Parameters::IntegerPair(1, 6),
            Parameters::RealPair(0., 1.),
            Parameters::Real(2.),
            Parameters::Probability(0.5),
            Parameters::IntegerAndProbability(10, 0.3),
        ];
        for parameters in all {
            assert_eq!(parameters.values().len(), parameters.kind().arity());
        }
    }

    #[test]
    fn parameter_sets_reject_other_kinds() {
        let pair = <(i32, f64)>::from_parameters(Parameters::IntegerAndProbability(3, 0.5));
        let pair = pair.unwrap();
        assert_eq!(pair, (3, 0.5));
        assert_eq!(pair.into_parameters(), Parameters::IntegerAndProbability(3, 0.5));
        let real = f32::from_parameters(Parameters::Real(4.)).unwrap();
        assert_eq!(real.into_parameters(), Parameters::Real(4.));
        assert_eq!((1_i32, 6_i32).into_parameters(), Parameters::IntegerPair(1, 6));
        match f64::from_parameters(Parameters::Real(0.5)) {
            Err(Error::TypeMismatch { expected, found }) => {
                assert_eq!(expected, ParameterKind::Probability);
                assert_eq!(found, ParameterKind::Real);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn kinds_display() {
        assert_eq!(
            ParameterKind::IntegerAndProbability.to_string(),
            "one integer and one probability"
        );
    }
}
