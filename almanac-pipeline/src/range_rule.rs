//! A single contiguous remapping rule.

use crate::interval::Interval;

/// A rule shifting a contiguous source range of values onto a destination range.
///
/// The source range is the half-open `[source_start, source_start + length)`, and a value `v`
/// within it maps to `v + (destination_start - source_start)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRule {
    /// The start of the source range, inclusive.
    source_start: i64,

    /// The length of both ranges, always > 0.
    length: i64,

    /// The start of the destination range, inclusive.
    destination_start: i64,
}

/// An error constructing a [`RangeRule`] from malformed values.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RangeRuleError {
    /// A rule has a length of 0 or less. Displays the associated starts to locate in input.
    #[error(
        "range length must be > 0, found {length} (destination_start = {destination_start}, source_start = {source_start})"
    )]
    NonPositiveLength {
        destination_start: i64,
        source_start: i64,
        length: i64,
    },

    /// The exclusive end of the source range does not fit in an `i64`.
    #[error("source end overflow when calculating start + length (start = {start}, length = {length})")]
    SourceEndOverflow { start: i64, length: i64 },

    /// The exclusive end of the destination range does not fit in an `i64`.
    #[error(
        "destination end overflow when calculating start + length (start = {start}, length = {length})"
    )]
    DestinationEndOverflow { start: i64, length: i64 },
}

/// The part of an interval matched by a [`RangeRule`], along with where the rule maps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOverlap {
    /// The values of the interval within the rule's source range.
    pub matched: Interval,
    /// The image of `matched` in the rule's destination range.
    pub mapped: Interval,
}

impl RangeRule {
    /// Create a rule from the destination start, source start, and range length, in the order an
    /// almanac lists them.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeRuleError`] if the length is not positive, or if either range would end past
    /// [`i64::MAX`].
    pub fn new(
        destination_start: i64,
        source_start: i64,
        length: i64,
    ) -> Result<Self, RangeRuleError> {
        if length <= 0 {
            return Err(RangeRuleError::NonPositiveLength {
                destination_start,
                source_start,
                length,
            });
        }
        if source_start.checked_add(length).is_none() {
            return Err(RangeRuleError::SourceEndOverflow {
                start: source_start,
                length,
            });
        }
        if destination_start.checked_add(length).is_none() {
            return Err(RangeRuleError::DestinationEndOverflow {
                start: destination_start,
                length,
            });
        }

        Ok(Self {
            source_start,
            length,
            destination_start,
        })
    }

    /// The start of the source range, inclusive.
    #[must_use]
    pub fn source_start(&self) -> i64 {
        self.source_start
    }

    /// The end of the source range, exclusive.
    #[must_use]
    pub fn source_end(&self) -> i64 {
        // checked on construction
        self.source_start + self.length
    }

    /// The start of the destination range, inclusive.
    #[must_use]
    pub fn destination_start(&self) -> i64 {
        self.destination_start
    }

    /// The length of the rule's ranges.
    #[must_use]
    pub fn length(&self) -> i64 {
        self.length
    }

    /// The source range as an interval.
    #[must_use]
    pub fn source_range(&self) -> Interval {
        Interval::new(self.source_start, self.source_end())
            .unwrap_or_else(|| unreachable!("rule length is checked > 0 on construction"))
    }

    /// Whether the source range holds `value`.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.source_start <= value && value < self.source_end()
    }

    /// Map a value from the source range to the destination range.
    ///
    /// The value must be within the source range; check with [`RangeRule::contains`] first, or use
    /// [`RangeRule::try_map_value`].
    #[must_use]
    pub fn map_value(&self, value: i64) -> i64 {
        debug_assert!(self.contains(value), "{value} is outside the rule's source range");
        // offset within the range, then into the destination; both fit by construction, where
        // `destination_start - source_start` alone may not
        self.destination_start + (value - self.source_start)
    }

    /// Try to map a value with this rule.
    /// If the value is out of the source range, returns `None`.
    #[must_use]
    pub fn try_map_value(&self, value: i64) -> Option<i64> {
        self.contains(value).then(|| self.map_value(value))
    }

    /// Compute the overlap between an interval and the source range, and its mapped image.
    ///
    /// Returns `None` if the interval and source range are disjoint.
    #[must_use]
    pub fn intersect(&self, interval: Interval) -> Option<RuleOverlap> {
        let matched = interval.intersection(&self.source_range())?;
        // mapping the last value keeps the exclusive end within the checked destination end
        let mapped = Interval::new(
            self.map_value(matched.start()),
            self.map_value(matched.last()) + 1,
        )?;
        Some(RuleOverlap { matched, mapped })
    }
}
