//! Per-family sampling state behind one object-safe interface.

use std::io;
use std::marker::PhantomData;
use std::time::Instant;

use tracing::debug;

use crate::distribution::{Family, ParameterKind, ParameterSet, Parameters};
use crate::error::{Error, Result};
use crate::file_io;
use crate::numerics::statistics::Statistic;
use crate::numerics::{Rational, Value, Variate};

pub mod table;

use table::SampleTable;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// How many samples to draw and how many variates each holds.
pub struct SamplerConfig {
    pub sample_count: usize,
    pub sample_size: usize,
}

impl SamplerConfig {
    pub fn new(sample_count: usize, sample_size: usize) -> Result<Self> {
        if sample_count == 0 || sample_size == 0 {
            return Err(Error::invalid(
                "sampler configuration",
                format!(
                    "sample count and size must be positive, got {sample_count} and {sample_size}"
                ),
            ));
        }
        if SampleTable::<Rational>::cell_count(sample_count, sample_size).is_none() {
            return Err(Error::invalid(
                "sampler configuration",
                format!("a table of {sample_count} samples of size {sample_size} is too large"),
            ));
        }
        Ok(Self {
            sample_count,
            sample_size,
        })
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_count: 1000,
            sample_size: 30,
        }
    }
}

/// Everything a caller can do with one distribution family without knowing which it is.
pub trait SamplingManager: Send {
    fn name(&self) -> &'static str;
    fn parameter_kind(&self) -> ParameterKind;
    fn parameter_names(&self) -> &'static [&'static str];
    fn parameters(&self) -> Parameters;

    /// Replace the live parameters. Nothing changes if `parameters` has the wrong kind or
    /// violates the family's constraints.
    fn set_parameters(&mut self, parameters: Parameters) -> Result<()>;

    fn sampler_config(&self) -> SamplerConfig;
    fn set_sampler_config(&mut self, sample_count: usize, sample_size: usize) -> Result<()>;

    /// Throw away the previous table and draw a new one from the current parameters and
    /// configuration. Blocks until every worker has finished.
    fn generate_samples(&mut self) -> Result<()>;

    /// Raw variates of sample `index`.
    fn sample(&self, index: usize) -> Result<Vec<Value>>;

    fn sample_function_names(&self) -> &'static [&'static str] {
        &Statistic::NAMES
    }

    /// One value of statistic `name` per generated sample, in row order.
    fn sample_function_results(&self, name: &str) -> Result<Vec<Rational>>;

    /// Shape of the last generated table, name row included; `(0, _)` before the first
    /// generation.
    fn table_shape(&self) -> (usize, usize);

    /// Text of the cell at `column`, `row` of the last generated table.
    fn cell_text(&self, column: usize, row: usize) -> Option<String>;

    /// Dump the last generated table as tab-separated values.
    fn write_table(&self, out: &mut dyn io::Write) -> io::Result<()>;

    /// Theoretical density of the current parameters at `x`.
    fn density(&self, x: f64) -> f64;
}

/// The [`SamplingManager`] of family `F`.
pub struct Sampler<F: Family> {
    params: F::Params,
    config: SamplerConfig,
    table: SampleTable<F::Variate>,
    family: PhantomData<fn() -> F>,
}

impl<F: Family> Sampler<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: F::default_params(),
            config: SamplerConfig::default(),
            table: SampleTable::default(),
            family: PhantomData,
        }
    }
}

impl<F: Family> Default for Sampler<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Family> SamplingManager for Sampler<F> {
    fn name(&self) -> &'static str {
        F::NAME
    }

    fn parameter_kind(&self) -> ParameterKind {
        <F::Params as ParameterSet>::KIND
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        F::PARAMETER_NAMES
    }

    fn parameters(&self) -> Parameters {
        self.params.into_parameters()
    }

    fn set_parameters(&mut self, parameters: Parameters) -> Result<()> {
        let params = F::Params::from_parameters(parameters)?;
        F::sampler(params)?;
        self.params = params;
        Ok(())
    }

    fn sampler_config(&self) -> SamplerConfig {
        self.config
    }

    fn set_sampler_config(&mut self, sample_count: usize, sample_size: usize) -> Result<()> {
        self.config = SamplerConfig::new(sample_count, sample_size)?;
        Ok(())
    }

    fn generate_samples(&mut self) -> Result<()> {
        // A fresh sampler per generation: no cached state survives, and the latest
        // parameters are in effect.
        let distribution = F::sampler(self.params)?;
        let SamplerConfig {
            sample_count,
            sample_size,
        } = self.config;
        let start = Instant::now();
        self.table.generate(&distribution, sample_count, sample_size)?;
        debug!(
            family = F::NAME,
            sample_count,
            sample_size,
            elapsed = ?start.elapsed(),
            "generated samples"
        );
        Ok(())
    }

    fn sample(&self, index: usize) -> Result<Vec<Value>> {
        Ok(self
            .table
            .sample(index)?
            .into_iter()
            .map(Variate::to_value)
            .collect())
    }

    fn sample_function_results(&self, name: &str) -> Result<Vec<Rational>> {
        let statistic =
            Statistic::from_name(name).ok_or_else(|| Error::NotFound(name.to_owned()))?;
        self.table.column(statistic.name())
    }

    fn table_shape(&self) -> (usize, usize) {
        (self.table.rows(), self.table.columns())
    }

    fn cell_text(&self, column: usize, row: usize) -> Option<String> {
        self.table.cell(column, row).map(ToString::to_string)
    }

    fn write_table(&self, out: &mut dyn io::Write) -> io::Result<()> {
        file_io::write_tsv(&self.table, out)
    }

    fn density(&self, x: f64) -> f64 {
        F::density(self.params, x)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{Sampler, SamplerConfig, SamplingManager};
    use crate::distribution::continuous::Normal;
    use crate::distribution::discrete::{Bernoulli, UniformInteger};
    use crate::distribution::Parameters;
    use crate::error::Error;
    use crate::numerics::Value;

    #[test]
    fn default_configuration() {
        let sampler = Sampler::<Normal>::new();
        assert_eq!(sampler.sampler_config(), SamplerConfig::default());
        assert_eq!(sampler.sampler_config().sample_count, 1000);
        assert_eq!(sampler.sampler_config().sample_size, 30);
        assert_eq!(sampler.table_shape().0, 0);
    }

    #[test]
    fn rejects_empty_configuration() {
        let mut sampler = Sampler::<Normal>::new();
        assert!(matches!(
            sampler.set_sampler_config(0, 10),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(sampler.set_sampler_config(10, 0).is_err());
        assert_eq!(sampler.sampler_config(), SamplerConfig::default());
    }

    #[test]
    fn rejects_unaddressable_configuration() {
        let mut sampler = Sampler::<Normal>::new();
        assert!(matches!(
            sampler.set_sampler_config(usize::MAX, 2),
            Err(Error::InvalidParameter { family: "sampler configuration", .. })
        ));
        assert!(sampler.set_sampler_config(2, usize::MAX).is_err());
        assert!(SamplerConfig::new(1 << 40, 1 << 30).is_err());
        assert_eq!(sampler.sampler_config(), SamplerConfig::default());
        assert!(SamplerConfig::new(1_000_000, 30).is_ok());
    }

    #[test]
    fn failed_updates_keep_previous_parameters() {
        let mut sampler = Sampler::<Normal>::new();
        assert!(matches!(
            sampler.set_parameters(Parameters::IntegerPair(0, 1)),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            sampler.set_parameters(Parameters::RealPair(0., -1.)),
            Err(Error::InvalidParameter { family: "normal", .. })
        ));
        assert_eq!(sampler.parameters(), Parameters::RealPair(0., 1.));
        sampler.set_parameters(Parameters::RealPair(2., 0.5)).unwrap();
        assert_eq!(sampler.parameters(), Parameters::RealPair(2., 0.5));
    }

    #[test]
    fn die_rolls() {
        let mut sampler = Sampler::<UniformInteger>::new();
        sampler.set_parameters(Parameters::IntegerPair(1, 6)).unwrap();
        sampler.set_sampler_config(100, 30).unwrap();
        sampler.generate_samples().unwrap();
        assert_eq!(sampler.table_shape(), (101, 35));
        assert_eq!(sampler.cell_text(0, 0).as_deref(), Some("1"));
        assert_eq!(sampler.cell_text(29, 0).as_deref(), Some("30"));

        for i in 0..100 {
            let sample = sampler.sample(i).unwrap();
            assert!(sample.iter().all(|v| matches!(v, Value::Integer(1..=6))));
        }
        let means = sampler.sample_function_results("mean").unwrap();
        assert_eq!(means.len(), 100);
        assert!(means.iter().all(|m| (1.0..=6.0).contains(m)));
        assert!(sampler.sample(100).is_err());
    }

    #[test]
    fn standard_normal_moments() {
        let mut sampler = Sampler::<Normal>::new();
        sampler.set_sampler_config(1, 10_000).unwrap();
        sampler.generate_samples().unwrap();
        let mean = sampler.sample_function_results("mean").unwrap()[0];
        let variance = sampler.sample_function_results("variance2").unwrap()[0];
        assert_abs_diff_eq!(mean, 0., epsilon = 0.05);
        assert_abs_diff_eq!(variance, 1., epsilon = 0.1);
    }

    #[test]
    fn parameter_edits_apply_on_next_generation() {
        let mut sampler = Sampler::<Bernoulli>::new();
        sampler.set_sampler_config(5, 20).unwrap();
        sampler.set_parameters(Parameters::Probability(1.)).unwrap();
        sampler.generate_samples().unwrap();
        assert!(sampler
            .sample_function_results("sum")
            .unwrap()
            .iter()
            .all(|&s| s == 20.));

        sampler.set_parameters(Parameters::Probability(0.)).unwrap();
        sampler.generate_samples().unwrap();
        assert!(sampler
            .sample_function_results("sum")
            .unwrap()
            .iter()
            .all(|&s| s == 0.));
    }

    #[test]
    fn only_statistics_are_sample_functions() {
        let mut sampler = Sampler::<Normal>::new();
        sampler.set_sampler_config(3, 4).unwrap();
        sampler.generate_samples().unwrap();
        assert_eq!(
            sampler.sample_function_names(),
            ["sum", "mean", "tts", "variance1", "variance2"]
        );
        assert!(matches!(
            sampler.sample_function_results("1"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            sampler.sample_function_results("median"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn single_variate_samples_have_undefined_sample_variance() {
        let mut sampler = Sampler::<Normal>::new();
        sampler.set_sampler_config(4, 1).unwrap();
        sampler.generate_samples().unwrap();
        let population = sampler.sample_function_results("variance1").unwrap();
        let sample = sampler.sample_function_results("variance2").unwrap();
        assert!(population.iter().all(|&v| v == 0.));
        assert!(sample.iter().all(|v| !v.is_finite()));
    }
}
