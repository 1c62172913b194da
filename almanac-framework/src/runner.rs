//! Functions and traits for parsing input and answering queries while reporting progress.
//!
//! # Quick Start
//!
//! ```
//! # use std::fmt::Display;
//! # use std::time::Duration;
//! # use almanac_framework::runner::{ReportHandler, answer_query, parse_input};
//! # use almanac_framework::{DynamicResult, ParseData, Query, QueryKind};
//! #
//! # struct Seeds(Vec<i64>);
//! # impl ParseData for Seeds {
//! #     fn parse(input: &str) -> DynamicResult<Self> {
//! #         Ok(Self(input.split_whitespace().map(str::parse).collect::<Result<_, _>>()?))
//! #     }
//! # }
//! # struct LowestSeed;
//! # impl Query for LowestSeed {
//! #     const KIND: QueryKind = QueryKind::SeedValues;
//! #     type Input = Seeds;
//! #     type Output = i64;
//! #     fn answer(input: &Seeds) -> DynamicResult<i64> {
//! #         input.0.iter().copied().min().ok_or_else(|| "no seeds".into())
//! #     }
//! # }
//! # struct Silent;
//! # impl ReportHandler for Silent {
//! #     fn title(&mut self, _name: &str) {}
//! #     fn parse_start(&mut self) {}
//! #     fn parse_end(&mut self, _duration_opt: Option<Duration>) {}
//! #     fn query_start(&mut self, _query: QueryKind) {}
//! #     fn query_output(&mut self, _: QueryKind, _: &dyn Display, _: Option<Duration>) {}
//! # }
//! # fn main() -> DynamicResult<()> {
//! let mut handler = Silent;
//! let seeds = parse_input::<Seeds>("Seeds", "79 14 55 13", &mut handler, false)?;
//! answer_query::<LowestSeed>(&seeds, &mut handler, false)?;
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;
use std::time::Duration;

use crate::{DynamicResult, ParseData, Query, QueryKind};

/// A trait for an output events handler.
///
/// Parsing input and answering queries leads to events to output through a handler as feedback and
/// logging.
pub trait ReportHandler {
    /// Called to output the name of the input being processed, before parsing starts.
    fn title(&mut self, name: &str);

    /// Called when parsing input starts.
    fn parse_start(&mut self);

    /// Called when parsing input is finished.
    ///
    /// The duration taken to parse is optionally passed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// Called when a query starts, with a [`QueryKind`] to identify the query.
    fn query_start(&mut self, query: QueryKind);

    /// Called when a query finishes to output the answer, with a [`QueryKind`] to identify the
    /// query.
    ///
    /// The duration taken to answer is optionally passed.
    fn query_output(
        &mut self,
        query: QueryKind,
        output: &dyn Display,
        duration_opt: Option<Duration>,
    );
}

/// Measure the duration of an expression.
///
/// The macro evaluates the given expression once and returns a tuple of the expression's result and
/// the elapsed [`Duration`][std::time::Duration].
macro_rules! measure_duration {
    ($expr:expr) => {{
        let start = ::std::time::Instant::now();
        let result = $expr;
        let elapsed = start.elapsed();
        (result, elapsed)
    }};
}

/// A macro to optionally measure the duration of an expression.
///
/// Evaluates to a tuple of the expression's result and an optional
/// [`Duration`][std::time::Duration], which is `None` unless `$timed` is `true`.
macro_rules! measure_with_optional_duration {
    ($expr:expr, $timed:expr) => {{
        if $timed {
            let (result, duration) = measure_duration!($expr);
            (result, Some(duration))
        } else {
            ($expr, None)
        }
    }};
}

/// Parse input, outputting events through the handler.
///
/// # Arguments
///
/// - `name` - The name of the input to output.
/// - `input` - The input string to parse.
/// - `handler` - The output handler to output events to.
/// - `timed` - A flag to measure the time to parse then output the elapsed time to the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing is propagated.
pub fn parse_input<D: ParseData>(
    name: &str,
    input: &str,
    handler: &mut dyn ReportHandler,
    timed: bool,
) -> DynamicResult<D> {
    handler.title(name);
    handler.parse_start();
    let (result, duration_opt) = measure_with_optional_duration!(D::parse(input), timed);
    let parsed = result?;
    handler.parse_end(duration_opt);
    Ok(parsed)
}

/// Answer a query, outputting events through the handler.
///
/// # Arguments
///
/// - `input` - The parsed input to answer for.
/// - `handler` - The output handler to output events to.
/// - `timed` - A flag to measure the time to answer then output the elapsed time to the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the query is propagated.
pub fn answer_query<Q: Query>(
    input: &Q::Input,
    handler: &mut dyn ReportHandler,
    timed: bool,
) -> DynamicResult<()> {
    handler.query_start(Q::KIND);
    let (result, duration_opt) = measure_with_optional_duration!(Q::answer(input), timed);
    let output = result?;
    handler.query_output(Q::KIND, &output, duration_opt);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A handler recording events as strings.
    #[derive(Default)]
    struct RecordingHandler {
        events: Vec<String>,
    }

    impl ReportHandler for RecordingHandler {
        fn title(&mut self, name: &str) {
            self.events.push(format!("title {name}"));
        }

        fn parse_start(&mut self) {
            self.events.push("parse start".to_owned());
        }

        fn parse_end(&mut self, duration_opt: Option<Duration>) {
            self.events
                .push(format!("parse end timed={}", duration_opt.is_some()));
        }

        fn query_start(&mut self, query: QueryKind) {
            self.events.push(format!("start {query}"));
        }

        fn query_output(
            &mut self,
            query: QueryKind,
            output: &dyn Display,
            duration_opt: Option<Duration>,
        ) {
            self.events.push(format!(
                "output {query}: {output} timed={}",
                duration_opt.is_some()
            ));
        }
    }

    struct Numbers(Vec<i64>);

    impl ParseData for Numbers {
        fn parse(input: &str) -> DynamicResult<Self> {
            let values = input
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<_, _>>()?;
            Ok(Self(values))
        }
    }

    struct Smallest;

    impl Query for Smallest {
        const KIND: QueryKind = QueryKind::SeedValues;
        type Input = Numbers;
        type Output = i64;

        fn answer(input: &Numbers) -> DynamicResult<i64> {
            input
                .0
                .iter()
                .copied()
                .min()
                .ok_or_else(|| "no numbers".into())
        }
    }

    #[test]
    fn test_events_in_order() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        let numbers = parse_input::<Numbers>("Numbers", "5 3 9", &mut handler, true)?;
        answer_query::<Smallest>(&numbers, &mut handler, false)?;

        assert_eq!(
            handler.events,
            vec![
                "title Numbers",
                "parse start",
                "parse end timed=true",
                "start Seed values",
                "output Seed values: 3 timed=false",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_parse_error_stops_before_parse_end() {
        let mut handler = RecordingHandler::default();
        let result = parse_input::<Numbers>("Numbers", "5 x", &mut handler, false);
        assert!(result.is_err());
        assert_eq!(handler.events, vec!["title Numbers", "parse start"]);
    }

    #[test]
    fn test_query_error_has_no_output() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        let numbers = parse_input::<Numbers>("Numbers", "", &mut handler, false)?;
        let result = answer_query::<Smallest>(&numbers, &mut handler, false);
        assert_eq!(result.err().map(|e| e.to_string()).as_deref(), Some("no numbers"));
        assert_eq!(handler.events.last().map(String::as_str), Some("start Seed values"));
        Ok(())
    }
}
