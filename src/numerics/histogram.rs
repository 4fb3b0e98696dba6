//! Density-normalised histogram over a regular axis.

use super::Rational;

#[derive(Clone, Copy, PartialEq, Debug)]
/// One inner bin, ready to be drawn as a bar from `(lower, 0)` to `(upper, height)`.
pub struct Bar {
    pub lower: Rational,
    pub upper: Rational,
    /// Fraction of the data in the bin divided by the bin width.
    pub height: Rational,
}

#[derive(Clone, PartialEq, Debug)]
/// A regular axis of `bins` equal-width bins over `[lower, upper)`, flanked by two catch-all
/// bins for values below `lower` and at or above `upper` (NaN included).
pub struct Histogram {
    lower: Rational,
    upper: Rational,
    /// Underflow, inner bins, overflow.
    weights: Vec<Rational>,
}

impl Histogram {
    /// Inner bins shown before the user picks a count.
    pub const DEFAULT_BINS: usize = 80;

    #[must_use]
    pub fn new(bins: usize, lower: Rational, upper: Rational) -> Self {
        Self {
            lower,
            upper,
            weights: vec![0.; bins.max(1) + 2],
        }
    }

    #[must_use]
    /// Histogram `data`, each value weighted by `1 / data.len()`.
    pub fn from_data(data: &[Rational], bins: usize, lower: Rational, upper: Rational) -> Self {
        let mut histogram = Self::new(bins, lower, upper);
        histogram.fill(data);
        histogram
    }

    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.weights.len() - 2
    }

    #[must_use]
    pub fn bin_width(&self) -> Rational {
        (self.upper - self.lower) / self.bin_count() as Rational
    }

    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn index(&self, value: Rational) -> usize {
        let overflow = self.weights.len() - 1;
        if value < self.lower {
            return 0;
        }
        if value >= self.upper || value.is_nan() {
            return overflow;
        }
        let position =
            (value - self.lower) / (self.upper - self.lower) * self.bin_count() as Rational;
        (position as usize + 1).min(overflow - 1)
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn fill(&mut self, data: &[Rational]) {
        if data.is_empty() {
            return;
        }
        let weight = 1. / data.len() as Rational;
        for &value in data {
            let index = self.index(value);
            self.weights[index] += weight;
        }
    }

    #[must_use]
    pub fn underflow(&self) -> Rational {
        self.weights[0]
    }

    #[must_use]
    pub fn overflow(&self) -> Rational {
        self.weights[self.weights.len() - 1]
    }

    #[allow(clippy::cast_precision_loss)]
    /// The inner bins, skipping both catch-all bins. Empty if the axis has no extent.
    pub fn bars(&self) -> impl Iterator<Item = Bar> + '_ {
        let width = self.bin_width();
        let inner: &[Rational] = if width > 0. {
            &self.weights[1..self.weights.len() - 1]
        } else {
            &[]
        };
        inner.iter().enumerate().map(move |(i, &weight)| Bar {
            lower: self.lower + width * i as Rational,
            upper: self.lower + width * (i + 1) as Rational,
            height: weight / width,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;
    use rand::Rng;

    use super::Histogram;
    use crate::numerics::random_source::RandomSource;

    #[test]
    fn uniform_data_integrates_to_one() {
        let mut rng = RandomSource::new();
        let data = (0..10_000).map(|_| rng.gen_range(-2.0..2.0)).collect_vec();
        let histogram = Histogram::from_data(&data, 40, -2., 2.);
        let area = histogram
            .bars()
            .map(|bar| bar.height * (bar.upper - bar.lower))
            .sum::<f32>();
        assert_abs_diff_eq!(area, 1., epsilon = 1e-3);
        for bar in histogram.bars() {
            // Expected density 0.25 with 250 points per bin.
            assert_abs_diff_eq!(bar.height, 0.25, epsilon = 0.1);
        }
    }

    #[test]
    fn outliers_land_in_catch_all_bins() {
        let histogram = Histogram::from_data(&[-5., 0.5, 1., f32::NAN], 4, 0., 1.);
        assert_abs_diff_eq!(histogram.underflow(), 0.25);
        assert_abs_diff_eq!(histogram.overflow(), 0.5);
        let bars = histogram.bars().collect_vec();
        assert_eq!(bars.len(), 4);
        assert_abs_diff_eq!(bars[2].lower, 0.5);
        assert_abs_diff_eq!(bars[2].upper, 0.75);
        assert_abs_diff_eq!(bars[2].height, 1.);
        let area = bars.iter().map(|b| b.height * (b.upper - b.lower)).sum::<f32>();
        assert_abs_diff_eq!(area, 0.25);
    }

    #[test]
    fn degenerate_axis_has_no_bars() {
        let histogram = Histogram::from_data(&[1., 2.], 10, 3., 3.);
        assert_eq!(histogram.bars().count(), 0);
        assert_abs_diff_eq!(histogram.underflow(), 1.);
    }

    #[test]
    fn empty_data_and_zero_bins() {
        let histogram = Histogram::from_data(&[], 0, 0., 1.);
        assert_eq!(histogram.bin_count(), 1);
        assert!(histogram.bars().all(|bar| bar.height == 0.));
    }
}
