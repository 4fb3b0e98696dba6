use rand::distributions::Distribution;
use rand::Rng;
use rand_distr::{Gamma, Poisson};

use super::discrete::NegativeBinomial;
use super::Family;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug)]
/// Number of failures before the `k`-th success in Bernoulli trials of success probability
/// `p`, drawn as a gamma-Poisson mixture.
pub struct NegativeBinomialSampler {
    /// `None` when `p == 1`, where no failure can ever occur.
    rate: Option<Gamma<f64>>,
}

impl NegativeBinomialSampler {
    pub fn new(k: i32, p: f64) -> Result<Self> {
        const NAME: &str = <NegativeBinomial as Family>::NAME;
        if k <= 0 {
            return Err(Error::invalid(NAME, format!("k must be positive, got {k}")));
        }
        if !(p > 0. && p <= 1.) {
            return Err(Error::invalid(NAME, format!("p must lie in (0, 1], got {p}")));
        }
        let rate = if p < 1. {
            Some(Gamma::new(f64::from(k), (1. - p) / p).map_err(|e| Error::invalid(NAME, e))?)
        } else {
            None
        };
        Ok(Self { rate })
    }
}

impl Distribution<i32> for NegativeBinomialSampler {
    #[allow(clippy::cast_possible_truncation)]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        let Some(rate) = &self.rate else { return 0 };
        let λ = rate.sample(rng);
        match Poisson::new(λ) {
            // Saturating cast.
            Ok(poisson) => Distribution::<f64>::sample(&poisson, rng) as i32,
            // λ underflowed to zero.
            Err(_) => 0,
        }
    }
}
