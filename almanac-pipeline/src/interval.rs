//! Half-open integer intervals.

use std::fmt::Display;

/// A non-empty half-open interval of integers, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    // order of props relevant when deriving Ord
    /// The start of the interval, inclusive.
    start: i64,
    /// The end of the interval, exclusive.
    end: i64,
}

impl Interval {
    /// Create the interval `[start, end)`.
    ///
    /// Returns `None` if the interval would be empty (`start >= end`).
    #[must_use]
    pub fn new(start: i64, end: i64) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Create the interval holding the single value `value`.
    ///
    /// Returns `None` for [`i64::MAX`], as its exclusive end is not representable.
    #[must_use]
    pub fn point(value: i64) -> Option<Self> {
        Self::new(value, value.checked_add(1)?)
    }

    /// The start of the interval, inclusive.
    #[must_use]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// The end of the interval, exclusive.
    #[must_use]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// The last value in the interval.
    #[must_use]
    pub fn last(&self) -> i64 {
        // non-empty, so cannot underflow
        self.end - 1
    }

    /// The count of values in the interval.
    #[must_use]
    pub fn length(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    /// Whether the interval holds `value`.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.start <= value && value < self.end
    }

    /// The values held by both intervals, if any.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        Self::new(self.start.max(other.start), self.end.min(other.end))
    }

    /// The pieces of this interval lying outside `other`: the part before `other` starts and the
    /// part after `other` ends.
    ///
    /// Either piece is `None` when empty.
    #[must_use]
    pub fn difference(&self, other: &Self) -> (Option<Self>, Option<Self>) {
        let before = Self::new(self.start, self.end.min(other.start));
        let after = Self::new(self.start.max(other.end), self.end);
        (before, after)
    }

    /// Whether the intervals overlap or touch end to start.
    fn adjoins(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Sort intervals and merge any that overlap or touch, producing a minimal set of disjoint
/// intervals covering the same values.
pub fn coalesce<I>(intervals: I) -> Vec<Interval>
where
    I: IntoIterator<Item = Interval>,
{
    let mut sorted: Vec<_> = intervals.into_iter().collect();
    sorted.sort_unstable();

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(previous) if previous.adjoins(&interval) => {
                previous.end = previous.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// The summed lengths of intervals, counting overlapping values once per interval.
pub fn total_length<'a, I>(intervals: I) -> u128
where
    I: IntoIterator<Item = &'a Interval>,
{
    intervals
        .into_iter()
        .map(|interval| u128::from(interval.length()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "test intervals are written non-empty")]
    fn interval(start: i64, end: i64) -> Interval {
        Interval::new(start, end).expect("test interval should be non-empty")
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(Interval::new(5, 5), None);
        assert_eq!(Interval::new(6, 5), None);
        assert!(Interval::new(5, 6).is_some());
    }

    #[test]
    fn test_point_at_max_is_unrepresentable() {
        assert_eq!(Interval::point(i64::MAX), None);
        assert_eq!(Interval::point(-3), Some(interval(-3, -2)));
    }

    #[test]
    fn test_length_spans_full_domain() {
        assert_eq!(interval(i64::MIN, i64::MAX).length(), u64::MAX);
        assert_eq!(interval(10, 13).length(), 3);
    }

    #[test]
    fn test_intersection() {
        assert_eq!(
            interval(0, 10).intersection(&interval(5, 20)),
            Some(interval(5, 10))
        );
        assert_eq!(interval(0, 10).intersection(&interval(10, 20)), None);
    }

    #[test]
    fn test_difference_splits_around_inner_interval() {
        let (before, after) = interval(0, 10).difference(&interval(3, 6));
        assert_eq!(before, Some(interval(0, 3)));
        assert_eq!(after, Some(interval(6, 10)));
    }

    #[test]
    fn test_difference_fully_covered() {
        assert_eq!(interval(3, 6).difference(&interval(0, 10)), (None, None));
    }

    #[test]
    fn test_difference_one_side() {
        assert_eq!(
            interval(0, 10).difference(&interval(5, 15)),
            (Some(interval(0, 5)), None)
        );
        assert_eq!(
            interval(0, 10).difference(&interval(-5, 5)),
            (None, Some(interval(5, 10)))
        );
    }

    #[test]
    fn test_coalesce_merges_overlapping_and_touching() {
        let merged = coalesce([
            interval(20, 25),
            interval(0, 5),
            interval(5, 8),
            interval(3, 4),
            interval(30, 31),
            interval(24, 28),
        ]);
        assert_eq!(
            merged,
            vec![interval(0, 8), interval(20, 28), interval(30, 31)]
        );
    }

    #[test]
    fn test_coalesce_empty() {
        assert!(coalesce(Vec::new()).is_empty());
    }

    #[test]
    fn test_total_length_counts_each_interval() {
        let intervals = [interval(0, 5), interval(3, 4)];
        assert_eq!(total_length(&intervals), 6);
    }
}
