//! Folding symbol sets into contiguous runs.

use std::fmt;

use itertools::Itertools;

/// An inclusive range of code points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    /// First code point in the run.
    pub start: u32,
    /// Last code point in the run, inclusive.
    pub end: u32,
}

impl Interval {
    /// An interval holding exactly one code point.
    pub fn single(value: u32) -> Self {
        Interval {
            start: value,
            end: value,
        }
    }

    /// Number of code points covered.
    pub fn len(&self) -> u64 {
        u64::from(self.end - self.start) + 1
    }

    /// True if the interval covers a single code point.
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// True if `value` lies inside the interval.
    pub fn contains(&self, value: u32) -> bool {
        (self.start..=self.end).contains(&value)
    }
}

impl fmt::Display for Interval {
    /// Formats as a C case label operand: `0x1F600` or `0x1F600 ... 0x1F64F`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "0x{:04X}", self.start)
        } else {
            write!(f, "0x{:04X} ... 0x{:04X}", self.start, self.end)
        }
    }
}

/// Sorts `values`, drops duplicates and collapses consecutive runs.
///
/// ```
/// use seqtrie::intervals::{fold_intervals, Interval};
///
/// let runs = fold_intervals([5, 1, 2, 3, 9, 2]);
/// assert_eq!(runs, vec![
///     Interval { start: 1, end: 3 },
///     Interval { start: 5, end: 5 },
///     Interval { start: 9, end: 9 },
/// ]);
/// ```
pub fn fold_intervals(values: impl IntoIterator<Item = u32>) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = Vec::new();
    for value in values.into_iter().sorted_unstable().dedup() {
        match intervals.last_mut() {
            Some(last) if last.end.checked_add(1) == Some(value) => last.end = value,
            _ => intervals.push(Interval::single(value)),
        }
    }
    intervals
}
