//! Framework of traits and utilities for answering almanac queries.
//!
//! # Quick Start
//!
//! 1. Define your input type and implement [`ParseData`]:
//!
//! ```
//! # use almanac_framework::{DynamicResult, ParseData};
//! #
//! struct Seeds(Vec<i64>);
//!
//! impl ParseData for Seeds {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let seeds = input
//!             .split_whitespace()
//!             .map(str::parse)
//!             .collect::<Result<_, _>>()?;
//!         Ok(Self(seeds))
//!     }
//! }
//! ```
//!
//! 2. Implement [`Query`] for each question asked of the input:
//!
//! ```
//! # use almanac_framework::{DynamicResult, Query, QueryKind};
//! #
//! # struct Seeds(Vec<i64>);
//! #
//! struct LowestSeed;
//!
//! impl Query for LowestSeed {
//!     const KIND: QueryKind = QueryKind::SeedValues;
//!     type Input = Seeds;
//!     type Output = i64;
//!
//!     fn answer(input: &Seeds) -> DynamicResult<i64> {
//!         input.0.iter().copied().min().ok_or_else(|| "no seeds".into())
//!     }
//! }
//! ```
//!
//! 3. Use the [`runner`] module to parse input and answer queries.

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
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

pub mod parsing;
pub mod runner;

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// An enum to identify how a query interprets the seeds of an almanac.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Seeds are individual seed numbers.
    SeedValues,
    /// Seeds are pairs of a range start and a range length.
    SeedRanges,
}

impl Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SeedValues => write!(f, "Seed values"),
            Self::SeedRanges => write!(f, "Seed ranges"),
        }
    }
}

/// A question answered from parsed input.
pub trait Query {
    /// The [`QueryKind`] reported while the query runs.
    const KIND: QueryKind;

    /// The input data type passed to the query.
    ///
    /// [`Query::answer`] will accept a reference to this type, so consider avoiding reference
    /// nesting.
    type Input: ?Sized;

    /// The output data type returned from the query.
    type Output: Display;

    /// Answer the query for the given input.
    ///
    /// # Errors
    ///
    /// A query can fail on input it cannot answer for, like an empty set of seeds.
    /// It is returned as a dynamically dispatched error.
    fn answer(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// A trait for data structures that are created by parsing string input.
///
/// Queries can be passed parsed data constructed through this trait by setting [`Query::Input`] to
/// the implementing struct.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}
