//! Parsing an almanac into seeds and a conversion pipeline.

use almanac_framework::parsing::{InputScanner, parse_with_context};
use almanac_framework::{DynamicResult, ParseData};
use almanac_pipeline::{Pipeline, RangeRule, Stage};
use tracing::{info, warn};

/*
Input is an almanac. It is formatted as multiple blocks separated by empty lines.

The first block is a `seeds: ` line with a space-separated list of numbers.

Following are blocks of maps for converting numbers from a source category to a destination
category, like `seed-to-soil map:` converting seed numbers to soil numbers. Each map's destination
category feeds the next map's source category.

A map defines ranges for conversion below the map name. Lines contain three numbers: the destination
range start, the source range start, and the range length.
*/

/// Seeds to plant and the pipeline converting them to locations.
#[derive(Debug)]
pub struct Almanac {
    /// Seed numbers parsed from input.
    seeds: Vec<i64>,
    /// The sequence of maps for number conversions, one stage per map block.
    pipeline: Pipeline,
}

#[derive(thiserror::Error, Debug)]
enum AlmanacParseError {
    #[error("expected block for seeds")]
    MissingSeedsBlock,

    #[error("expected seeds line to start with \"seeds:\", found line: {0:?}")]
    MissingSeedsPrefix(String),

    #[error("expected at least one map block after seeds")]
    MissingMapBlock,

    /// Expected a header line in a map block, with the found line.
    #[error("expected header line for map block ending in \" map:\", found line: {0:?}")]
    ExpectedMapHeader(String),

    /// A map block has a header but no ranges, with the map name.
    #[error("expected at least one range in {name} map")]
    EmptyMap { name: String },

    /// Expected a line formatted with three numbers for a range, with the found line.
    #[error("expected three space-separated numbers as a map range, found: {0:?}")]
    ExpectedRangeFormat(String),
}

/// An error interpreting an almanac's seeds.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SeedRangesError {
    /// Seed ranges need pairs of numbers, with the count of seed numbers found.
    #[error("seed ranges need an even count of seed numbers, found {0}")]
    OddSeedCount(usize),
}

/// Split a map name like `seed-to-soil` into its source and destination categories.
fn map_categories(name: &str) -> Option<(&str, &str)> {
    name.split_once("-to-")
}

/// Warn on consecutive stages whose categories don't line up, like `seed-to-soil` followed by
/// `water-to-light`.
fn warn_on_broken_chain(stages: &[Stage]) {
    for pair in stages.windows(2) {
        let (Some((_, destination)), Some((source, _))) =
            (map_categories(pair[0].name()), map_categories(pair[1].name()))
        else {
            continue;
        };
        if destination != source {
            warn!(
                previous = pair[0].name(),
                next = pair[1].name(),
                "map categories do not chain"
            );
        }
    }
}

fn parse_map(scanner: &mut InputScanner) -> DynamicResult<Option<Stage>> {
    // expect header with map name
    let Some(name) = scanner.next_item(|_, line| {
        line.trim()
            .strip_suffix(" map:")
            .map(str::to_owned)
            .ok_or_else(|| AlmanacParseError::ExpectedMapHeader(line.to_owned()))
    })?
    else {
        return Ok(None);
    };

    let rules = scanner.collect_sequence(|_, line| -> DynamicResult<_> {
        let values: Vec<_> = line.split_whitespace().collect();

        if values.len() != 3 {
            return Err(AlmanacParseError::ExpectedRangeFormat(line.to_owned()).into());
        }

        let destination_start = parse_with_context(values[0])?;
        let source_start = parse_with_context(values[1])?;
        let length = parse_with_context(values[2])?;

        Ok(RangeRule::new(destination_start, source_start, length)?)
    })?;

    if rules.is_empty() {
        return Err(AlmanacParseError::EmptyMap { name }.into());
    }

    Ok(Some(Stage::new(name, rules)))
}

impl ParseData for Almanac {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let mut scanner = InputScanner::new(input);

        let seeds: Vec<i64> = scanner
            .next_item(|_, line| -> DynamicResult<_> {
                let seeds_list = line
                    .strip_prefix("seeds:")
                    .ok_or_else(|| AlmanacParseError::MissingSeedsPrefix(line.to_owned()))?;
                let seeds = seeds_list
                    .split_whitespace()
                    .map(parse_with_context)
                    .collect::<Result<_, _>>()?;
                Ok(seeds)
            })?
            .ok_or(AlmanacParseError::MissingSeedsBlock)?;

        let mut stages = Vec::new();
        while let Some(stage) = parse_map(&mut scanner)? {
            stages.push(stage);
        }
        if stages.is_empty() {
            return Err(AlmanacParseError::MissingMapBlock.into());
        }
        warn_on_broken_chain(&stages);

        info!(
            seeds = seeds.len(),
            stages = stages.len(),
            "parsed almanac"
        );

        Ok(Self {
            seeds,
            pipeline: Pipeline::new(stages),
        })
    }
}

impl Almanac {
    #[cfg(test)]
    pub fn new(seeds: Vec<i64>, pipeline: Pipeline) -> Self {
        Self { seeds, pipeline }
    }

    /// The seed numbers, each taken as a single seed.
    pub fn seed_values(&self) -> &[i64] {
        &self.seeds
    }

    /// Interpret the seed numbers as pairs of range start & length.
    pub fn seed_ranges(&self) -> Result<Vec<(i64, i64)>, SeedRangesError> {
        let pairs = self.seeds.chunks_exact(2);
        if !pairs.remainder().is_empty() {
            return Err(SeedRangesError::OddSeedCount(self.seeds.len()));
        }
        Ok(pairs.map(|pair| (pair[0], pair[1])).collect())
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::error::Error as _;

    use super::*;

    pub const EXAMPLE_INPUT: &str = r"seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn test_parse_example() -> DynamicResult<()> {
        let almanac = Almanac::parse(EXAMPLE_INPUT)?;
        assert_eq!(almanac.seed_values(), &[79, 14, 55, 13]);
        assert_eq!(almanac.seed_ranges()?, vec![(79, 14), (55, 13)]);

        let names: Vec<_> = almanac.pipeline().stages().iter().map(Stage::name).collect();
        assert_eq!(
            names,
            vec![
                "seed-to-soil",
                "soil-to-fertilizer",
                "fertilizer-to-water",
                "water-to-light",
                "light-to-temperature",
                "temperature-to-humidity",
                "humidity-to-location",
            ]
        );
        assert_eq!(
            almanac.pipeline().stages()[0].rules(),
            &[RangeRule::new(50, 98, 2)?, RangeRule::new(52, 50, 48)?]
        );
        Ok(())
    }

    #[test]
    fn test_parse_any_stage_count() -> DynamicResult<()> {
        let almanac = Almanac::parse("seeds: 1 2 3\n\nseed-to-location map:\n10 0 5\n")?;
        assert_eq!(almanac.pipeline().stages().len(), 1);
        assert_eq!(almanac.pipeline().map_value(2), 12);
        Ok(())
    }

    #[test]
    fn test_parse_tolerates_extra_blank_lines() -> DynamicResult<()> {
        let almanac = Almanac::parse("\nseeds: 1 2\n\n\n\na-to-b map:\n10 0 5\n\n\n")?;
        assert_eq!(almanac.seed_values(), &[1, 2]);
        assert_eq!(almanac.pipeline().stages().len(), 1);
        Ok(())
    }

    #[test]
    fn test_odd_seed_count_has_no_ranges() -> DynamicResult<()> {
        let almanac = Almanac::parse("seeds: 1 2 3\n\na-to-b map:\n10 0 5\n")?;
        assert_eq!(almanac.seed_ranges(), Err(SeedRangesError::OddSeedCount(3)));
        Ok(())
    }

    fn parse_error(input: &str) -> Option<String> {
        Almanac::parse(input).err().map(|error| {
            // include the source to check the cause behind line errors
            match error.source() {
                Some(source) => format!("{error}: {source}"),
                None => error.to_string(),
            }
        })
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        assert_eq!(
            parse_error("79 14\n\na-to-b map:\n1 2 3\n").as_deref(),
            Some(
                "failure parsing line 1: expected seeds line to start with \"seeds:\", found line: \"79 14\""
            )
        );
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert_eq!(
            parse_error("\n\n").as_deref(),
            Some("expected block for seeds")
        );
    }

    #[test]
    fn test_parse_rejects_missing_maps() {
        assert_eq!(
            parse_error("seeds: 1 2\n").as_deref(),
            Some("expected at least one map block after seeds")
        );
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        assert_eq!(
            parse_error("seeds: 1 2\n\n1 2 3\n").as_deref(),
            Some(
                "failure parsing line 3: expected header line for map block ending in \" map:\", found line: \"1 2 3\""
            )
        );
    }

    #[test]
    fn test_parse_rejects_empty_map() {
        assert_eq!(
            parse_error("seeds: 1 2\n\na-to-b map:\n\nb-to-c map:\n1 2 3\n").as_deref(),
            Some("expected at least one range in a-to-b map")
        );
    }

    #[test]
    fn test_parse_rejects_short_range_line() {
        assert_eq!(
            parse_error("seeds: 1 2\n\na-to-b map:\n1 2 3\n4 5\n").as_deref(),
            Some(
                "failure parsing line 5: expected three space-separated numbers as a map range, found: \"4 5\""
            )
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric_field() {
        assert_eq!(
            parse_error("seeds: 1 2\n\na-to-b map:\n1 x 3\n").as_deref(),
            Some("failure parsing line 4: failed to parse string: \"x\"")
        );
    }

    #[test]
    fn test_parse_rejects_malformed_rule() {
        assert_eq!(
            parse_error("seeds: 1 2\n\na-to-b map:\n1 2 -3\n").as_deref(),
            Some(
                "failure parsing line 4: range length must be > 0, found -3 (destination_start = 1, source_start = 2)"
            )
        );
    }
}
