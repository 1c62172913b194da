//! Ranged value remapping through an ordered chain of stages.
//!
//! A [`Pipeline`] is built from [`Stage`]s, and a stage from [`RangeRule`]s. Each rule shifts a
//! contiguous half-open source range onto a destination range; values no rule covers pass through
//! a stage unchanged.
//!
//! Values can be mapped one at a time, or whole [`Interval`]s can be mapped at once by splitting
//! them against rule boundaries, which allows finding the lowest output of huge input ranges without
//! visiting every value.
//!
//! ```
//! use almanac_pipeline::{Pipeline, Stage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let seed_to_soil = Stage::from_triples("seed-to-soil", [(50, 98, 2), (52, 50, 48)])?;
//! let pipeline = Pipeline::new(vec![seed_to_soil]);
//!
//! assert_eq!(pipeline.map_value(79), 81);
//! assert_eq!(pipeline.minimum_over(&[(79, 14), (55, 13)])?, 57);
//! # Ok(())
//! # }
//! ```

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
    clippy::suspicious_operation_groupings,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

mod interval;
mod pipeline;
mod range_rule;
mod stage;

pub use interval::{Interval, coalesce, total_length};
pub use pipeline::{Pipeline, PipelineError};
pub use range_rule::{RangeRule, RangeRuleError, RuleOverlap};
pub use stage::Stage;
