//! An ordered chain of stages and minimum queries over it.

use tracing::debug;

use crate::interval::{Interval, coalesce};
use crate::stage::Stage;

/// An ordered sequence of [`Stage`]s, with each stage's output feeding the next stage's input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

/// An error answering a query on a [`Pipeline`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PipelineError {
    /// The query covers no values, so it has no minimum.
    #[error("no minimum is defined for a query covering no values")]
    NoMinimumDefined,

    /// A range was given a negative length.
    #[error("range length must be >= 0, found {length} (start = {start})")]
    NegativeRangeLength { start: i64, length: i64 },

    /// The exclusive end of a range does not fit in an `i64`.
    #[error("range end overflow when calculating start + length (start = {start}, length = {length})")]
    RangeEndOverflow { start: i64, length: i64 },
}

impl Pipeline {
    #[must_use]
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Process the full sequence of stages to map a value.
    #[must_use]
    pub fn map_value(&self, value: i64) -> i64 {
        self.stages
            .iter()
            .fold(value, |acc, stage| stage.map_value(acc))
    }

    /// Process the full sequence of stages to map intervals.
    ///
    /// Intervals are split at every stage as they cross rule boundaries; see
    /// [`Stage::map_intervals`].
    #[must_use]
    pub fn map_intervals(&self, intervals: &[Interval]) -> Vec<Interval> {
        self.fold_intervals(intervals, Stage::map_intervals)
    }

    /// Process the full sequence of stages to map intervals, resolving intervals in parallel within
    /// each stage; see [`Stage::par_map_intervals`].
    #[must_use]
    pub fn par_map_intervals(&self, intervals: &[Interval]) -> Vec<Interval> {
        self.fold_intervals(intervals, Stage::par_map_intervals)
    }

    fn fold_intervals<F>(&self, intervals: &[Interval], map_stage: F) -> Vec<Interval>
    where
        F: Fn(&Stage, &[Interval]) -> Vec<Interval>,
    {
        self.stages
            .iter()
            .fold(intervals.to_vec(), |acc, stage| {
                let mapped = map_stage(stage, &acc);
                debug!(
                    stage = stage.name(),
                    input_intervals = acc.len(),
                    output_intervals = mapped.len(),
                    "mapped intervals through stage"
                );
                mapped
            })
    }

    /// Find the lowest value any of the given values map to.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoMinimumDefined`] if no values are given.
    pub fn minimum_over_points(&self, values: &[i64]) -> Result<i64, PipelineError> {
        values
            .iter()
            .map(|&value| self.map_value(value))
            .min()
            .ok_or(PipelineError::NoMinimumDefined)
    }

    /// Find the lowest value any value of the given ranges maps to, without visiting each value.
    ///
    /// Ranges are `(start, length)` pairs. They may overlap or be given in any order; zero-length
    /// ranges cover nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoMinimumDefined`] if the ranges cover no values, or an error for a
    /// range with a negative length or an end past [`i64::MAX`].
    pub fn minimum_over(&self, ranges: &[(i64, i64)]) -> Result<i64, PipelineError> {
        let intervals = ranges_to_intervals(ranges)?;
        lowest_start(&self.map_intervals(&intervals))
    }

    /// Like [`Pipeline::minimum_over`], resolving intervals in parallel within each stage.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::minimum_over`].
    pub fn par_minimum_over(&self, ranges: &[(i64, i64)]) -> Result<i64, PipelineError> {
        let intervals = ranges_to_intervals(ranges)?;
        lowest_start(&self.par_map_intervals(&intervals))
    }
}

/// Convert `(start, length)` pairs into sorted, disjoint intervals.
fn ranges_to_intervals(ranges: &[(i64, i64)]) -> Result<Vec<Interval>, PipelineError> {
    let mut intervals = Vec::with_capacity(ranges.len());
    for &(start, length) in ranges {
        if length < 0 {
            return Err(PipelineError::NegativeRangeLength { start, length });
        }
        let end = start
            .checked_add(length)
            .ok_or(PipelineError::RangeEndOverflow { start, length })?;
        // zero-length ranges produce no interval
        intervals.extend(Interval::new(start, end));
    }
    Ok(coalesce(intervals))
}

fn lowest_start(intervals: &[Interval]) -> Result<i64, PipelineError> {
    intervals
        .iter()
        .map(Interval::start)
        .min()
        .ok_or(PipelineError::NoMinimumDefined)
}
