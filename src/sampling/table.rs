//! Row-major table of generated samples and their statistics.

use std::fmt;
use std::mem;
use std::ops::Range;

use itertools::Itertools;
use rand::distributions::Distribution;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::numerics::random_source::RandomSource;
use crate::numerics::statistics::{SampleStatistics, Statistic};
use crate::numerics::{Rational, Value, Variate};

#[derive(Clone, PartialEq, Debug, Default)]
pub enum Cell<T> {
    #[default]
    Empty,
    Name(String),
    Variate(T),
    Statistic(Rational),
}

impl<T: Variate> Cell<T> {
    #[must_use]
    pub fn variate(&self) -> Option<T> {
        match self {
            Self::Variate(x) => Some(*x),
            _ => None,
        }
    }

    #[must_use]
    /// The cell's numeric content, if any, as a statistic-typed value.
    pub fn rational(&self) -> Option<Rational> {
        match self {
            Self::Variate(x) => Some(x.to_rational()),
            Self::Statistic(x) => Some(*x),
            Self::Empty | Self::Name(_) => None,
        }
    }
}

impl<T: Variate> fmt::Display for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Name(name) => f.write_str(name),
            Self::Variate(x) => write!(f, "{}", x.to_value()),
            Self::Statistic(x) => write!(f, "{}", Value::Real(*x)),
        }
    }
}

/// Split `0..rows` into `slices` contiguous ranges of equal length, the remainder going to the
/// last one.
#[must_use]
pub fn partition(rows: usize, slices: usize) -> Vec<Range<usize>> {
    let slices = slices.max(1);
    let (size, rest) = (rows / slices, rows % slices);
    (0..slices)
        .map(|i| {
            let start = size * i;
            let end = start + size + if i == slices - 1 { rest } else { 0 };
            start..end
        })
        .collect()
}

#[derive(Clone, PartialEq, Debug)]
/// `sample_count` samples of `sample_size` variates each.
///
/// Row 0 holds column names: `"1"` to `"{sample_size}"` for the raw variates, then the
/// [`Statistic`] names. Every further row is one sample, its variates followed by its
/// statistics.
pub struct SampleTable<T> {
    sample_count: usize,
    sample_size: usize,
    cells: Vec<Cell<T>>,
}

impl<T> Default for SampleTable<T> {
    fn default() -> Self {
        Self {
            sample_count: 0,
            sample_size: 0,
            cells: Vec::new(),
        }
    }
}

impl<T: Variate> SampleTable<T> {
    /// Number of threads drawing variates in parallel.
    pub const WORKER_COUNT: usize = 12;
    const NAME_ROWS: usize = 1;

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.sample_size + Statistic::ALL.len()
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.sample_count + Self::NAME_ROWS
        }
    }

    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell<T>> {
        if column >= self.columns() {
            return None;
        }
        self.cells.get(row * self.columns() + column)
    }

    /// All rows, the name row first.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell<T>]> {
        self.cells.chunks(self.columns())
    }

    /// Cells in a table of `sample_count` samples of `sample_size` variates, name row
    /// included, or `None` if that does not fit in memory addressing.
    #[must_use]
    pub fn cell_count(sample_count: usize, sample_size: usize) -> Option<usize> {
        let columns = sample_size.checked_add(Statistic::ALL.len())?;
        let cells = columns.checked_mul(sample_count.checked_add(Self::NAME_ROWS)?)?;
        let bytes = cells.checked_mul(mem::size_of::<Cell<T>>())?;
        isize::try_from(bytes).is_ok().then_some(cells)
    }

    fn clear(&mut self) {
        self.sample_count = 0;
        self.sample_size = 0;
        self.cells = Vec::new();
    }

    fn reset(&mut self, sample_count: usize, sample_size: usize) -> Result<()> {
        self.clear();
        let too_large = || {
            Error::invalid(
                "sample table",
                format!("{sample_count} samples of {sample_size} variates do not fit in memory"),
            )
        };
        let cells = Self::cell_count(sample_count, sample_size).ok_or_else(too_large)?;
        self.cells
            .try_reserve_exact(cells)
            .map_err(|_| too_large())?;
        self.cells.resize_with(cells, Cell::default);
        self.sample_count = sample_count;
        self.sample_size = sample_size;

        let names = (1..=sample_size)
            .map(|i| i.to_string())
            .chain(Statistic::NAMES.iter().map(|&name| name.to_owned()));
        for (cell, name) in self.cells.iter_mut().zip(names) {
            *cell = Cell::Name(name);
        }
        Ok(())
    }

    /// Rebuild the table from scratch with fresh draws from `distribution`, then compute the
    /// statistics of every row.
    ///
    /// Rows are split among a pool of [`Self::WORKER_COUNT`] threads, each slice drawn from
    /// its own clone of `distribution` and its own [`RandomSource`]. If any draw fails the
    /// table is left empty.
    pub fn generate<D>(
        &mut self,
        distribution: &D,
        sample_count: usize,
        sample_size: usize,
    ) -> Result<()>
    where
        D: Distribution<T> + Clone + Send + Sync,
    {
        self.generate_from(distribution, sample_count, sample_size, RandomSource::new)
    }

    fn generate_from<D>(
        &mut self,
        distribution: &D,
        sample_count: usize,
        sample_size: usize,
        source: impl Fn() -> RandomSource + Sync,
    ) -> Result<()>
    where
        D: Distribution<T> + Clone + Send + Sync,
    {
        let pool = ThreadPoolBuilder::new()
            .num_threads(Self::WORKER_COUNT)
            .thread_name(|i| format!("sampler-{i}"))
            .build()?;
        self.reset(sample_count, sample_size)?;
        let columns = self.columns();
        let slices = partition(sample_count, Self::WORKER_COUNT);
        debug!(
            workers = slices.len(),
            rows = ?slices.iter().map(ExactSizeIterator::len).collect_vec(),
            "partitioned sample rows"
        );

        let mut rest = &mut self.cells[columns * Self::NAME_ROWS..];
        let mut chunks = Vec::with_capacity(slices.len());
        for slice in &slices {
            let (rows, tail) = rest.split_at_mut(slice.len() * columns);
            chunks.push(rows);
            rest = tail;
        }
        let filled = pool.install(|| {
            chunks.into_par_iter().try_for_each(|rows| {
                fill_rows(rows, columns, sample_size, distribution.clone(), source())
            })
        });

        if let Err(err) = filled {
            self.clear();
            return Err(err);
        }
        self.compute_statistics();
        Ok(())
    }

    fn compute_statistics(&mut self) {
        let (columns, sample_size) = (self.columns(), self.sample_size);
        for row in self.cells.chunks_mut(columns).skip(Self::NAME_ROWS) {
            let (variates, statistics) = row.split_at_mut(sample_size);
            let sample = variates.iter().filter_map(Cell::variate).collect_vec();
            let values = SampleStatistics::of(&sample).values();
            for (cell, value) in statistics.iter_mut().zip(values) {
                *cell = Cell::Statistic(value);
            }
        }
    }

    /// Index of the column named `name`. Should several columns share a name, the last wins.
    pub fn column_by_name(&self, name: &str) -> Result<usize> {
        self.cells
            .iter()
            .take(self.columns())
            .rposition(|cell| matches!(cell, Cell::Name(n) if n == name))
            .ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    /// Every sample's value in column `name`, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<Rational>> {
        let column = self.column_by_name(name)?;
        Ok(self
            .iter_rows()
            .skip(Self::NAME_ROWS)
            .map(|row| row[column].rational().unwrap_or(Rational::NAN))
            .collect())
    }

    /// The raw variates of sample `index`.
    pub fn sample(&self, index: usize) -> Result<Vec<T>> {
        if index >= self.sample_count || self.is_empty() {
            return Err(Error::RowOutOfRange {
                index,
                count: self.sample_count,
            });
        }
        let start = (index + Self::NAME_ROWS) * self.columns();
        Ok(self.cells[start..start + self.sample_size]
            .iter()
            .filter_map(Cell::variate)
            .collect())
    }
}

fn fill_rows<T, D: Distribution<T>>(
    rows: &mut [Cell<T>],
    columns: usize,
    sample_size: usize,
    distribution: D,
    mut rng: RandomSource,
) -> Result<()> {
    for row in rows.chunks_mut(columns) {
        for cell in &mut row[..sample_size] {
            *cell = Cell::Variate(distribution.sample(&mut rng));
        }
        rng.check()?;
    }
    Ok(())
}
