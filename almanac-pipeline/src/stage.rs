//! One named conversion layer of range rules.

use rayon::prelude::*;

use crate::interval::Interval;
use crate::range_rule::{RangeRule, RangeRuleError};

/// A layer of [`RangeRule`]s converting values of one category to the next, like "seed-to-soil".
///
/// Values no rule covers map to themselves.
///
/// Rules are expected not to overlap. When they do, the rule listed earliest wins the overlapping
/// values, for both [`Stage::map_value`] and [`Stage::map_intervals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// A display name; not used for mapping.
    name: String,
    /// Rules in the order they were given.
    rules: Vec<RangeRule>,
}

impl Stage {
    /// Create a stage from a name and its rules.
    pub fn new(name: impl Into<String>, rules: Vec<RangeRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Create a stage from an iterator of rule triples: `(destination_start, source_start,
    /// length)`.
    ///
    /// # Errors
    ///
    /// Returns the [`RangeRuleError`] of the first malformed triple.
    pub fn from_triples<I>(name: impl Into<String>, triples: I) -> Result<Self, RangeRuleError>
    where
        I: IntoIterator<Item = (i64, i64, i64)>,
    {
        let rules = triples
            .into_iter()
            .map(|(destination_start, source_start, length)| {
                RangeRule::new(destination_start, source_start, length)
            })
            .collect::<Result<_, _>>()?;
        Ok(Self::new(name, rules))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rules(&self) -> &[RangeRule] {
        &self.rules
    }

    /// Map a value through the stage.
    #[must_use]
    pub fn map_value(&self, value: i64) -> i64 {
        self.rules
            .iter()
            .find_map(|rule| rule.try_map_value(value))
            // no rule affects this value, return as-is
            .unwrap_or(value)
    }

    /// Map intervals through the stage, splitting them wherever they cross rule boundaries.
    ///
    /// Each value of the input lands in exactly one output interval, so the total length is
    /// unchanged. The output is not sorted or merged, and intervals from different rules may touch
    /// or (if several rules share a destination) overlap.
    #[must_use]
    pub fn map_intervals(&self, intervals: &[Interval]) -> Vec<Interval> {
        let mut mapped = Vec::with_capacity(intervals.len());
        // fragments no rule has claimed yet
        let mut unresolved = intervals.to_vec();

        for rule in &self.rules {
            if unresolved.is_empty() {
                break;
            }

            let mut remaining = Vec::with_capacity(unresolved.len());
            for fragment in unresolved {
                if let Some(overlap) = rule.intersect(fragment) {
                    mapped.push(overlap.mapped);
                    // leftovers on either side of the rule stay unresolved for later rules
                    let (before, after) = fragment.difference(&overlap.matched);
                    remaining.extend(before);
                    remaining.extend(after);
                } else {
                    remaining.push(fragment);
                }
            }
            unresolved = remaining;
        }

        // anything left passes through unchanged
        mapped.extend(unresolved);
        mapped
    }

    /// Map intervals through the stage like [`Stage::map_intervals`], resolving each input
    /// interval on the rayon thread pool.
    ///
    /// The output holds the same intervals as [`Stage::map_intervals`], possibly in another order.
    #[must_use]
    pub fn par_map_intervals(&self, intervals: &[Interval]) -> Vec<Interval> {
        intervals
            .par_iter()
            .flat_map_iter(|interval| self.map_intervals(std::slice::from_ref(interval)))
            .collect()
    }
}
