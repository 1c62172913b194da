#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(clippy::unwrap_used)]

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use almanac_framework::runner::{ReportHandler, answer_query, parse_input};
use almanac_framework::{DynamicResult, QueryKind};
use anyhow::{Context, Error, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::almanac::Almanac;
use crate::queries::{
    LowestSeedLocation, LowestSeedRangeLocation, ParallelLowestSeedRangeLocation,
};

mod almanac;
mod queries;

/// Find the lowest location number for an almanac's seeds.
#[derive(Parser, Debug)]
struct Cli {
    /// The almanac input file. Defaults to `inputs/almanac.txt`.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Which interpretation of the seeds to answer for.
    #[arg(short, long, value_enum, default_value_t = QuerySelection::Both)]
    query: QuerySelection,

    /// Convert seed ranges on all available threads.
    #[arg(short, long, action = ArgAction::SetTrue)]
    parallel: bool,

    /// Measure and print the durations of parsing and answering queries.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,
}

/// The queries to answer.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum QuerySelection {
    /// Seeds as individual seed numbers.
    Point,
    /// Seeds as pairs of range start & length.
    Range,
    /// Both interpretations.
    Both,
}

impl QuerySelection {
    fn includes_points(self) -> bool {
        matches!(self, Self::Point | Self::Both)
    }

    fn includes_ranges(self) -> bool {
        matches!(self, Self::Range | Self::Both)
    }
}

/// Read the default almanac input file to a string.
fn get_default_input() -> Result<String> {
    let path = PathBuf::from("inputs").join("almanac.txt");

    fs::read_to_string(&path).with_context(|| {
        format!(
            "default input file missing: {}\n\n\
            please create the file or provide the input file argument",
            path.display()
        )
    })
}

/// Read the given input file to a string.
fn get_input(input_file: &Path) -> Result<String> {
    fs::read_to_string(input_file)
        .with_context(|| format!("could not read input file at: {}", input_file.display()))
}

/// Install a stderr log subscriber filtered by `RUST_LOG`, showing warnings by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

struct CliReportHandler {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
}

impl CliReportHandler {
    fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f32())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} nanoseconds")
            }
        }
    }

    /// Convert an optional duration into a formatted duration, filtering out if the duration is
    /// shorter than the minimum duration.
    fn format_optional_duration_above_min(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|d| *d >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl ReportHandler for CliReportHandler {
    fn title(&mut self, name: &str) {
        println!("= {name} =");
    }

    fn parse_start(&mut self) {
        // do nothing
    }

    fn parse_end(&mut self, duration_opt: Option<Duration>) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("Input parsed in {formatted_duration}");
        }
    }

    fn query_start(&mut self, query: QueryKind) {
        println!("-- {query} --");
    }

    fn query_output(
        &mut self,
        _query: QueryKind,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    ) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("{output} ({formatted_duration})");
        } else {
            println!("{output}");
        }
    }
}

/// Parse the almanac and answer the selected queries.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or answering is propagated.
fn run(input: &str, args: &Cli, handler: &mut dyn ReportHandler) -> DynamicResult<()> {
    let almanac = parse_input::<Almanac>("Almanac", input, handler, args.timed)?;

    if args.query.includes_points() {
        answer_query::<LowestSeedLocation>(&almanac, handler, args.timed)?;
    }
    if args.query.includes_ranges() {
        if args.parallel {
            answer_query::<ParallelLowestSeedRangeLocation>(&almanac, handler, args.timed)?;
        } else {
            answer_query::<LowestSeedRangeLocation>(&almanac, handler, args.timed)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Cli::parse();
    let input_str = args
        .input
        .as_deref()
        .map_or_else(get_default_input, get_input)?;
    let mut handler = CliReportHandler::new(Duration::from_millis(args.min_timing_ms));
    run(&input_str, &args, &mut handler).map_err(|dyn_error| {
        let anyhow_error = Error::from_boxed(dyn_error);
        anyhow_error.context("failed to answer almanac queries")
    })
}
