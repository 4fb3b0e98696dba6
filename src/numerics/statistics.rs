//! The fixed set of statistics computed for every sample row.

use std::fmt;

use super::{Rational, Variate};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Statistic {
    Sum,
    Mean,
    /// Total sum of squared deviations from the sample mean.
    TotalSumOfSquares,
    /// TSS / n.
    PopulationVariance,
    /// TSS / (n - 1).
    SampleVariance,
}

impl Statistic {
    /// Column order in a sample table.
    pub const ALL: [Self; 5] = [
        Self::Sum,
        Self::Mean,
        Self::TotalSumOfSquares,
        Self::PopulationVariance,
        Self::SampleVariance,
    ];

    pub const NAMES: [&'static str; 5] = ["sum", "mean", "tts", "variance1", "variance2"];

    #[must_use]
    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct SampleStatistics {
    pub sum: Rational,
    pub mean: Rational,
    pub tss: Rational,
    pub population_variance: Rational,
    pub sample_variance: Rational,
}

impl SampleStatistics {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    /// Compute all five statistics of one sample.
    ///
    /// A sample of size one has a sample variance of `0 / 0`; the resulting NaN is kept
    /// rather than papered over.
    pub fn of<T: Variate>(sample: &[T]) -> Self {
        let n = sample.len() as Rational;
        let sum = sample.iter().map(|x| x.to_rational()).sum::<Rational>();
        let mean = sum / n;
        let tss = sample
            .iter()
            .map(|x| (x.to_rational() - mean).powi(2))
            .sum::<Rational>();
        Self {
            sum,
            mean,
            tss,
            population_variance: tss / n,
            sample_variance: tss / (n - 1.),
        }
    }

    #[must_use]
    pub fn get(&self, statistic: Statistic) -> Rational {
        match statistic {
            Statistic::Sum => self.sum,
            Statistic::Mean => self.mean,
            Statistic::TotalSumOfSquares => self.tss,
            Statistic::PopulationVariance => self.population_variance,
            Statistic::SampleVariance => self.sample_variance,
        }
    }

    /// The statistics in table column order.
    #[must_use]
    pub fn values(&self) -> [Rational; 5] {
        Statistic::ALL.map(|s| self.get(s))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{SampleStatistics, Statistic};

    #[test]
    fn names_round_trip_in_column_order() {
        for (i, statistic) in Statistic::ALL.into_iter().enumerate() {
            assert_eq!(statistic as usize, i);
            assert_eq!(Statistic::from_name(statistic.name()), Some(statistic));
        }
        assert_eq!(Statistic::from_name("median"), None);
        assert_eq!(Statistic::TotalSumOfSquares.to_string(), "tts");
    }

    #[test]
    fn die_rolls() {
        let stats = SampleStatistics::of(&[1, 2, 3, 4, 5, 6]);
        assert_abs_diff_eq!(stats.sum, 21.);
        assert_abs_diff_eq!(stats.mean, 3.5);
        assert_abs_diff_eq!(stats.tss, 17.5);
        assert_abs_diff_eq!(stats.population_variance, 17.5 / 6., epsilon = 1e-6);
        assert_abs_diff_eq!(stats.sample_variance, 3.5);
    }

    #[test]
    fn coin_flips() {
        let stats = SampleStatistics::of(&[true, false, true, true]);
        assert_abs_diff_eq!(stats.sum, 3.);
        assert_abs_diff_eq!(stats.mean, 0.75);
        assert_abs_diff_eq!(stats.population_variance, 0.1875);
    }

    #[test]
    fn single_variate_has_undefined_sample_variance() {
        let stats = SampleStatistics::of(&[2.5_f32]);
        assert_abs_diff_eq!(stats.mean, 2.5);
        assert_abs_diff_eq!(stats.population_variance, 0.);
        assert!(stats.sample_variance.is_nan());
    }

    #[test]
    fn values_follow_column_order() {
        let stats = SampleStatistics::of(&[0.0_f32, 2.0]);
        assert_eq!(stats.values(), [2., 1., 2., 1., 2.]);
    }
}
