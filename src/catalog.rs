use crate::distribution::continuous::{
    Cauchy, ChiSquared, Exponential, ExtremeValue, FisherF, Gamma, LogNormal, Normal, StudentT,
    UniformReal, Weibull,
};
use crate::distribution::discrete::{
    Bernoulli, Binomial, Geometric, NegativeBinomial, Poisson, UniformInteger,
};
use crate::sampling::{Sampler, SamplingManager};

/// One stateful sampler per supported family, in a fixed order.
pub struct DistributionCatalog {
    samplers: Vec<Box<dyn SamplingManager>>,
}

impl DistributionCatalog {
    #[must_use]
    pub fn new() -> Self {
        let samplers: Vec<Box<dyn SamplingManager>> = vec![
            Box::new(Sampler::<UniformInteger>::new()),
            Box::new(Sampler::<UniformReal>::new()),
            Box::new(Sampler::<Bernoulli>::new()),
            Box::new(Sampler::<Binomial>::new()),
            Box::new(Sampler::<NegativeBinomial>::new()),
            Box::new(Sampler::<Geometric>::new()),
            Box::new(Sampler::<Poisson>::new()),
            Box::new(Sampler::<Exponential>::new()),
            Box::new(Sampler::<Gamma>::new()),
            Box::new(Sampler::<Weibull>::new()),
            Box::new(Sampler::<ExtremeValue>::new()),
            Box::new(Sampler::<Normal>::new()),
            Box::new(Sampler::<LogNormal>::new()),
            Box::new(Sampler::<ChiSquared>::new()),
            Box::new(Sampler::<Cauchy>::new()),
            Box::new(Sampler::<FisherF>::new()),
            Box::new(Sampler::<StudentT>::new()),
        ];
        Self { samplers }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samplers.len()
    }

    #[must_use]
    pub fn name(&self, index: usize) -> Option<&'static str> {
        self.get(index).map(SamplingManager::name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.samplers.iter().map(|sampler| sampler.name())
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names().position(|n| n == name)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&dyn SamplingManager> {
        self.samplers.get(index).map(AsRef::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn SamplingManager + 'static)> {
        self.samplers.get_mut(index).map(AsMut::as_mut)
    }
}

impl Default for DistributionCatalog {
    fn default() -> Self {
        Self::new()
    }
}
