//! Families drawing integer (or boolean) variates.

use rand::distributions::{self, Distribution, Uniform};
use rand::Rng;
use rand_distr::{
    Binomial as BinomialSampler, Geometric as GeometricSampler, Poisson as PoissonSampler,
};

use super::negative_binomial::NegativeBinomialSampler;
use super::Family;
use crate::error::{Error, Result};
use crate::numerics::special::{ln_choose, ln_gamma, xlogy};

#[derive(Clone, Copy, Debug)]
/// Narrows a sampler of `u64` counts to `i32`, saturating.
pub struct Count<D>(D);

impl<D: Distribution<u64>> Distribution<i32> for Count<D> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        i32::try_from(self.0.sample(rng)).unwrap_or(i32::MAX)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PoissonCount(PoissonSampler<f64>);

impl Distribution<i32> for PoissonCount {
    #[allow(clippy::cast_possible_truncation)]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        Distribution::<f64>::sample(&self.0, rng) as i32
    }
}

/// The integer nearest to `x`, if it is a non-negative count.
fn count(x: f64) -> Option<f64> {
    let k = x.round();
    (k >= 0.).then_some(k)
}

fn probability(family: &'static str, name: &str, p: f64) -> Result<f64> {
    if (0. ..=1.).contains(&p) {
        Ok(p)
    } else {
        Err(Error::invalid(family, format!("{name} must lie in [0, 1], got {p}")))
    }
}

pub struct UniformInteger;

impl Family for UniformInteger {
    const NAME: &'static str = "uniform-integer";
    const PARAMETER_NAMES: &'static [&'static str] = &["min", "max"];

    type Params = (i32, i32);
    type Variate = i32;
    type Sampler = Uniform<i32>;

    fn default_params() -> Self::Params {
        (1, 6)
    }

    fn sampler((min, max): Self::Params) -> Result<Self::Sampler> {
        if min > max {
            return Err(Error::invalid(
                Self::NAME,
                format!("min ({min}) exceeds max ({max})"),
            ));
        }
        Ok(Uniform::new_inclusive(min, max))
    }

    fn density((min, max): Self::Params, x: f64) -> f64 {
        let k = x.round();
        if (f64::from(min)..=f64::from(max)).contains(&k) {
            1. / (f64::from(max) - f64::from(min) + 1.)
        } else {
            0.
        }
    }
}

pub struct Bernoulli;

impl Family for Bernoulli {
    const NAME: &'static str = "bernoulli";
    const PARAMETER_NAMES: &'static [&'static str] = &["p"];

    type Params = f64;
    type Variate = bool;
    type Sampler = distributions::Bernoulli;

    fn default_params() -> Self::Params {
        0.5
    }

    fn sampler(p: Self::Params) -> Result<Self::Sampler> {
        distributions::Bernoulli::new(p).map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density(p: Self::Params, x: f64) -> f64 {
        match count(x) {
            Some(k) if k == 0. => 1. - p,
            Some(k) if k == 1. => p,
            _ => 0.,
        }
    }
}

pub struct Binomial;

impl Family for Binomial {
    const NAME: &'static str = "binomial";
    const PARAMETER_NAMES: &'static [&'static str] = &["t", "p"];

    type Params = (i32, f64);
    type Variate = i32;
    type Sampler = Count<BinomialSampler>;

    fn default_params() -> Self::Params {
        (1, 0.5)
    }

    fn sampler((t, p): Self::Params) -> Result<Self::Sampler> {
        let t = u64::try_from(t)
            .map_err(|_| Error::invalid(Self::NAME, format!("t must be non-negative, got {t}")))?;
        let p = probability(Self::NAME, "p", p)?;
        BinomialSampler::new(t, p)
            .map(Count)
            .map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density((t, p): Self::Params, x: f64) -> f64 {
        let t = f64::from(t);
        match count(x) {
            Some(k) if k <= t => (ln_choose(t, k) + xlogy(k, p) + xlogy(t - k, 1. - p)).exp(),
            _ => 0.,
        }
    }
}

pub struct NegativeBinomial;

impl Family for NegativeBinomial {
    const NAME: &'static str = "negative-binomial";
    const PARAMETER_NAMES: &'static [&'static str] = &["k", "p"];

    type Params = (i32, f64);
    type Variate = i32;
    type Sampler = NegativeBinomialSampler;

    fn default_params() -> Self::Params {
        (1, 0.5)
    }

    fn sampler((k, p): Self::Params) -> Result<Self::Sampler> {
        NegativeBinomialSampler::new(k, p)
    }

    fn density((k, p): Self::Params, x: f64) -> f64 {
        let k = f64::from(k);
        match count(x) {
            Some(i) => (ln_gamma(k + i) - ln_gamma(i + 1.) - ln_gamma(k)
                + xlogy(k, p)
                + xlogy(i, 1. - p))
            .exp(),
            None => 0.,
        }
    }
}

pub struct Geometric;

impl Family for Geometric {
    const NAME: &'static str = "geometric";
    const PARAMETER_NAMES: &'static [&'static str] = &["p"];

    type Params = f64;
    type Variate = i32;
    type Sampler = Count<GeometricSampler>;

    fn default_params() -> Self::Params {
        0.5
    }

    fn sampler(p: Self::Params) -> Result<Self::Sampler> {
        if !(p > 0. && p < 1.) {
            return Err(Error::invalid(
                Self::NAME,
                format!("p must lie in (0, 1), got {p}"),
            ));
        }
        GeometricSampler::new(p)
            .map(Count)
            .map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density(p: Self::Params, x: f64) -> f64 {
        count(x).map_or(0., |i| (p.ln() + xlogy(i, 1. - p)).exp())
    }
}

pub struct Poisson;

impl Family for Poisson {
    const NAME: &'static str = "poisson";
    const PARAMETER_NAMES: &'static [&'static str] = &["mu"];

    type Params = f64;
    type Variate = i32;
    type Sampler = PoissonCount;

    fn default_params() -> Self::Params {
        1.
    }

    fn sampler(μ: Self::Params) -> Result<Self::Sampler> {
        if !(μ > 0. && μ.is_finite()) {
            return Err(Error::invalid(
                Self::NAME,
                format!("mu must be positive, got {μ}"),
            ));
        }
        PoissonSampler::new(μ)
            .map(PoissonCount)
            .map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density(μ: Self::Params, x: f64) -> f64 {
        count(x).map_or(0., |i| (xlogy(i, μ) - μ - ln_gamma(i + 1.)).exp())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::distributions::Distribution;

    use super::{Bernoulli, Binomial, Geometric, NegativeBinomial, Poisson, UniformInteger};
    use crate::distribution::Family;
    use crate::numerics::random_source::RandomSource;

    /// Sum of the mass function over `lower..=upper`.
    fn total_mass<F: Family>(params: F::Params, lower: i32, upper: i32) -> f64 {
        (lower..=upper).map(|k| F::density(params, f64::from(k))).sum()
    }

    #[test]
    fn mass_functions_sum_to_one() {
        assert_abs_diff_eq!(total_mass::<UniformInteger>((-3, 4), -10, 10), 1., epsilon = 1e-12);
        assert_abs_diff_eq!(total_mass::<Bernoulli>(0.3, -2, 2), 1., epsilon = 1e-12);
        assert_abs_diff_eq!(total_mass::<Binomial>((12, 0.35), 0, 12), 1., epsilon = 1e-9);
        assert_abs_diff_eq!(total_mass::<NegativeBinomial>((3, 0.4), 0, 200), 1., epsilon = 1e-9);
        assert_abs_diff_eq!(total_mass::<Geometric>(0.2, 0, 300), 1., epsilon = 1e-9);
        assert_abs_diff_eq!(total_mass::<Poisson>(4.5, 0, 100), 1., epsilon = 1e-9);
    }

    #[test]
    fn edge_probabilities() {
        assert_abs_diff_eq!(Binomial::density((5, 0.), 0.), 1., epsilon = 1e-9);
        assert_abs_diff_eq!(Binomial::density((5, 1.), 5.), 1., epsilon = 1e-9);
        assert_abs_diff_eq!(Binomial::density((5, 1.), 4.), 0.);
        assert_abs_diff_eq!(Bernoulli::density(1., 1.2), 1.);
        assert_abs_diff_eq!(Poisson::density(2., -1.), 0.);
    }

    #[test]
    fn die_stays_on_the_table() {
        let die = UniformInteger::sampler((1, 6)).unwrap();
        let mut rng = RandomSource::new();
        let mut seen = [false; 6];
        for _ in 0..1000 {
            let roll: i32 = die.sample(&mut rng);
            assert!((1..=6).contains(&roll));
            seen[(roll - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn counts_are_bounded() {
        let mut rng = RandomSource::new();
        let binomial = Binomial::sampler((10, 0.5)).unwrap();
        let geometric = Geometric::sampler(0.9).unwrap();
        let poisson = Poisson::sampler(3.).unwrap();
        for _ in 0..1000 {
            assert!((0..=10).contains(&binomial.sample(&mut rng)));
            assert!(geometric.sample(&mut rng) >= 0);
            assert!(poisson.sample(&mut rng) >= 0);
        }
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(UniformInteger::sampler((6, 1)).is_err());
        assert!(UniformInteger::sampler((3, 3)).is_ok());
        assert!(Bernoulli::sampler(1.5).is_err());
        assert!(Binomial::sampler((-1, 0.5)).is_err());
        assert!(Binomial::sampler((4, -0.1)).is_err());
        assert!(Geometric::sampler(0.).is_err());
        assert!(Geometric::sampler(1.).is_err());
        assert!(Poisson::sampler(0.).is_err());
        assert!(Poisson::sampler(f64::INFINITY).is_err());
        assert!(NegativeBinomial::sampler((0, 0.5)).is_err());
    }
}
