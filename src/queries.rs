//! Queries for the lowest location an almanac's seeds convert to.

use almanac_framework::{DynamicResult, Query, QueryKind};

use crate::almanac::Almanac;

/// Find the lowest location number any individual seed number converts to.
pub struct LowestSeedLocation;

impl Query for LowestSeedLocation {
    const KIND: QueryKind = QueryKind::SeedValues;
    type Input = Almanac;
    type Output = i64;

    fn answer(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.pipeline().minimum_over_points(input.seed_values())?)
    }
}

/*
The seed numbers can instead pair up as the start & length of seed ranges. Real ranges hold billions
of seeds, so ranges are converted whole: each map splits a range wherever it crosses the map's
source ranges, and the lowest location is the lowest start of the final ranges.
*/

/// Find the lowest location number any seed in the seed ranges converts to.
pub struct LowestSeedRangeLocation;

impl Query for LowestSeedRangeLocation {
    const KIND: QueryKind = QueryKind::SeedRanges;
    type Input = Almanac;
    type Output = i64;

    fn answer(input: &Self::Input) -> DynamicResult<Self::Output> {
        let seed_ranges = input.seed_ranges()?;
        Ok(input.pipeline().minimum_over(&seed_ranges)?)
    }
}

/// [`LowestSeedRangeLocation`], converting ranges in parallel.
pub struct ParallelLowestSeedRangeLocation;

impl Query for ParallelLowestSeedRangeLocation {
    const KIND: QueryKind = QueryKind::SeedRanges;
    type Input = Almanac;
    type Output = i64;

    fn answer(input: &Self::Input) -> DynamicResult<Self::Output> {
        let seed_ranges = input.seed_ranges()?;
        Ok(input.pipeline().par_minimum_over(&seed_ranges)?)
    }
}
