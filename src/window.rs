//! Inclusive year ranges.
//!
//! A [`YearRange`] is the common currency between configuration lookups and
//! the masking functions: every coverage window resolves to one.

use serde::Serialize;
use std::fmt;

/// An inclusive range of years, `[start, end]`.
///
/// `start <= end` is not enforced. A range with `start > end` is empty and
/// is the representation of a non-overlapping intersection.
///
/// # Example
///
/// ```
/// use coverage_config::window::YearRange;
///
/// let gbd = YearRange::new(1990, 2019);
/// let census = YearRange::new(2000, 2023);
///
/// let both = gbd.intersect(census);
/// assert_eq!(both, YearRange::new(2000, 2019));
/// assert!(both.contains(2019));
/// assert!(!both.contains(2020));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct YearRange {
    /// First year in the range.
    pub start: i64,
    /// Last year in the range.
    pub end: i64,
}

impl YearRange {
    /// Creates a range from its inclusive bounds.
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Returns true when `start <= year <= end`.
    pub fn contains(&self, year: i64) -> bool {
        self.start <= year && year <= self.end
    }

    /// Returns true when no year falls inside the range.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Returns the tightest range common to both.
    ///
    /// The result may be empty; check [`YearRange::is_empty`] before use.
    pub fn intersect(self, other: YearRange) -> YearRange {
        YearRange {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        }
    }
}

impl From<(i64, i64)> for YearRange {
    fn from((start, end): (i64, i64)) -> Self {
        Self { start, end }
    }
}

impl From<YearRange> for (i64, i64) {
    fn from(range: YearRange) -> Self {
        (range.start, range.end)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
