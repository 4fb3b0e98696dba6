//! Families drawing single-precision real variates.

use std::f64::consts::{PI, TAU};

use rand::distributions::Uniform;
use rand_distr as rd;

use super::{finite, positive, Family};
use crate::error::{Error, Result};
use crate::numerics::special::{ln_beta, ln_gamma, xlogy};

/// Density of a gamma distribution of shape `α` and scale `θ`.
fn gamma_density(α: f64, θ: f64, x: f64) -> f64 {
    if x < 0. {
        return 0.;
    }
    (xlogy(α - 1., x) - x / θ - ln_gamma(α) - α * θ.ln()).exp()
}

pub struct UniformReal;

impl Family for UniformReal {
    const NAME: &'static str = "uniform-real";
    const PARAMETER_NAMES: &'static [&'static str] = &["min", "max"];

    type Params = (f32, f32);
    type Variate = f32;
    type Sampler = Uniform<f32>;

    fn default_params() -> Self::Params {
        (0., 1.)
    }

    fn sampler((min, max): Self::Params) -> Result<Self::Sampler> {
        let (min, max) = (finite(Self::NAME, "min", min)?, finite(Self::NAME, "max", max)?);
        if min >= max || !(max - min).is_finite() {
            return Err(Error::invalid(
                Self::NAME,
                format!("min ({min}) must be below max ({max})"),
            ));
        }
        Ok(Uniform::new(min, max))
    }

    fn density((min, max): Self::Params, x: f64) -> f64 {
        let (min, max) = (f64::from(min), f64::from(max));
        if (min..max).contains(&x) {
            1. / (max - min)
        } else {
            0.
        }
    }
}

pub struct Exponential;

impl Family for Exponential {
    const NAME: &'static str = "exponential";
    const PARAMETER_NAMES: &'static [&'static str] = &["lambda"];

    type Params = f32;
    type Variate = f32;
    type Sampler = rd::Exp<f32>;

    fn default_params() -> Self::Params {
        1.
    }

    fn sampler(λ: Self::Params) -> Result<Self::Sampler> {
        let λ = positive(Self::NAME, "lambda", λ)?;
        rd::Exp::new(λ).map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density(λ: Self::Params, x: f64) -> f64 {
        let λ = f64::from(λ);
        if x < 0. {
            0.
        } else {
            λ * (-λ * x).exp()
        }
    }
}

pub struct Gamma;

impl Family for Gamma {
    const NAME: &'static str = "gamma";
    const PARAMETER_NAMES: &'static [&'static str] = &["alpha", "beta"];

    type Params = (f32, f32);
    type Variate = f32;
    type Sampler = rd::Gamma<f32>;

    fn default_params() -> Self::Params {
        (1., 1.)
    }

    fn sampler((α, β): Self::Params) -> Result<Self::Sampler> {
        let α = positive(Self::NAME, "alpha", α)?;
        let β = positive(Self::NAME, "beta", β)?;
        rd::Gamma::new(α, β).map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density((α, β): Self::Params, x: f64) -> f64 {
        gamma_density(α.into(), β.into(), x)
    }
}

pub struct Weibull;

impl Family for Weibull {
    const NAME: &'static str = "weibull";
    const PARAMETER_NAMES: &'static [&'static str] = &["a", "b"];

    type Params = (f32, f32);
    type Variate = f32;
    type Sampler = rd::Weibull<f32>;

    fn default_params() -> Self::Params {
        (1., 1.)
    }

    /// `a` is the shape, `b` the scale.
    fn sampler((a, b): Self::Params) -> Result<Self::Sampler> {
        let a = positive(Self::NAME, "a", a)?;
        let b = positive(Self::NAME, "b", b)?;
        rd::Weibull::new(b, a).map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density((a, b): Self::Params, x: f64) -> f64 {
        let (a, b) = (f64::from(a), f64::from(b));
        if x < 0. {
            return 0.;
        }
        let z = x / b;
        a / b * z.powf(a - 1.) * (-z.powf(a)).exp()
    }
}

pub struct ExtremeValue;

impl Family for ExtremeValue {
    const NAME: &'static str = "extreme-value";
    const PARAMETER_NAMES: &'static [&'static str] = &["a", "b"];

    type Params = (f32, f32);
    type Variate = f32;
    type Sampler = rd::Gumbel<f32>;

    fn default_params() -> Self::Params {
        (0., 1.)
    }

    /// `a` is the location, `b` the scale.
    fn sampler((a, b): Self::Params) -> Result<Self::Sampler> {
        let a = finite(Self::NAME, "a", a)?;
        let b = positive(Self::NAME, "b", b)?;
        rd::Gumbel::new(a, b).map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density((a, b): Self::Params, x: f64) -> f64 {
        let (a, b) = (f64::from(a), f64::from(b));
        let z = (a - x) / b;
        (z - z.exp()).exp() / b
    }
}

pub struct Normal;

impl Family for Normal {
    const NAME: &'static str = "normal";
    const PARAMETER_NAMES: &'static [&'static str] = &["mu", "sigma"];

    type Params = (f32, f32);
    type Variate = f32;
    type Sampler = rd::Normal<f32>;

    fn default_params() -> Self::Params {
        (0., 1.)
    }

    fn sampler((μ, σ): Self::Params) -> Result<Self::Sampler> {
        let μ = finite(Self::NAME, "mu", μ)?;
        let σ = positive(Self::NAME, "sigma", σ)?;
        rd::Normal::new(μ, σ).map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density((μ, σ): Self::Params, x: f64) -> f64 {
        let (μ, σ) = (f64::from(μ), f64::from(σ));
        let z = (x - μ) / σ;
        (-0.5 * z * z).exp() / (σ * TAU.sqrt())
    }
}

pub struct LogNormal;

impl Family for LogNormal {
    const NAME: &'static str = "log-normal";
    const PARAMETER_NAMES: &'static [&'static str] = &["m", "s"];

    type Params = (f32, f32);
    type Variate = f32;
    type Sampler = rd::LogNormal<f32>;

    fn default_params() -> Self::Params {
        (0., 1.)
    }

    fn sampler((m, s): Self::Params) -> Result<Self::Sampler> {
        let m = finite(Self::NAME, "m", m)?;
        let s = positive(Self::NAME, "s", s)?;
        rd::LogNormal::new(m, s).map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density((m, s): Self::Params, x: f64) -> f64 {
        if x <= 0. {
            return 0.;
        }
        let (m, s) = (f64::from(m), f64::from(s));
        let z = (x.ln() - m) / s;
        (-0.5 * z * z).exp() / (x * s * TAU.sqrt())
    }
}

pub struct ChiSquared;

impl Family for ChiSquared {
    const NAME: &'static str = "chi-squared";
    const PARAMETER_NAMES: &'static [&'static str] = &["n"];

    type Params = f32;
    type Variate = f32;
    type Sampler = rd::ChiSquared<f32>;

    fn default_params() -> Self::Params {
        1.
    }

    fn sampler(n: Self::Params) -> Result<Self::Sampler> {
        let n = positive(Self::NAME, "n", n)?;
        rd::ChiSquared::new(n).map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density(n: Self::Params, x: f64) -> f64 {
        gamma_density(f64::from(n) / 2., 2., x)
    }
}

pub struct Cauchy;

impl Family for Cauchy {
    const NAME: &'static str = "cauchy";
    const PARAMETER_NAMES: &'static [&'static str] = &["a", "b"];

    type Params = (f32, f32);
    type Variate = f32;
    type Sampler = rd::Cauchy<f32>;

    fn default_params() -> Self::Params {
        (0., 1.)
    }

    fn sampler((a, b): Self::Params) -> Result<Self::Sampler> {
        let a = finite(Self::NAME, "a", a)?;
        let b = positive(Self::NAME, "b", b)?;
        rd::Cauchy::new(a, b).map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density((a, b): Self::Params, x: f64) -> f64 {
        let (a, b) = (f64::from(a), f64::from(b));
        let z = (x - a) / b;
        1. / (PI * b * (1. + z * z))
    }
}

pub struct FisherF;

impl Family for FisherF {
    const NAME: &'static str = "fisher-f";
    const PARAMETER_NAMES: &'static [&'static str] = &["m", "n"];

    type Params = (f32, f32);
    type Variate = f32;
    type Sampler = rd::FisherF<f32>;

    fn default_params() -> Self::Params {
        (1., 1.)
    }

    fn sampler((m, n): Self::Params) -> Result<Self::Sampler> {
        let m = positive(Self::NAME, "m", m)?;
        let n = positive(Self::NAME, "n", n)?;
        rd::FisherF::new(m, n).map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density((m, n): Self::Params, x: f64) -> f64 {
        if x < 0. {
            return 0.;
        }
        let (m, n) = (f64::from(m), f64::from(n));
        (0.5 * (m * m.ln() + n * n.ln()) + xlogy(m / 2. - 1., x)
            - (m + n) / 2. * (n + m * x).ln()
            - ln_beta(m / 2., n / 2.))
        .exp()
    }
}

pub struct StudentT;

impl Family for StudentT {
    const NAME: &'static str = "student-t";
    const PARAMETER_NAMES: &'static [&'static str] = &["n"];

    type Params = f32;
    type Variate = f32;
    type Sampler = rd::StudentT<f32>;

    fn default_params() -> Self::Params {
        1.
    }

    fn sampler(n: Self::Params) -> Result<Self::Sampler> {
        let n = positive(Self::NAME, "n", n)?;
        rd::StudentT::new(n).map_err(|e| Error::invalid(Self::NAME, e))
    }

    fn density(n: Self::Params, x: f64) -> f64 {
        let n = f64::from(n);
        (ln_gamma((n + 1.) / 2.)
            - ln_gamma(n / 2.)
            - 0.5 * (n * PI).ln()
            - (n + 1.) / 2. * (1. + x * x / n).ln())
        .exp()
    }
}
