//! Core reduction types and traits
//!
//! This module defines the per-range [`Summary`], the half-open
//! [`PartitionRange`] it is computed over, and the [`RangeReducer`] seam the
//! parallel aggregator dispatches through.

use std::fmt;

use crate::errors::{Result, SqMinMaxError};

/// Sum of squares, minimum and maximum over a range of `i8` elements.
///
/// `min` and `max` are only meaningful when `count > 0`. The empty summary
/// holds the fold identities (`i8::MAX` for `min`, `i8::MIN` for `max`) so it
/// can be combined with anything without changing the result; use
/// [`Summary::min_value`] / [`Summary::max_value`] to read them safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Summary {
    /// Sum of the squared elements, accumulated in 64 bits
    pub sum: i64,
    /// Smallest element seen
    pub min: i8,
    /// Largest element seen
    pub max: i8,
    /// Number of elements folded in
    pub count: usize,
}

impl Summary {
    /// Identity of [`Summary::combine`]; the result of reducing an empty range
    pub const EMPTY: Summary = Summary {
        sum: 0,
        min: i8::MAX,
        max: i8::MIN,
        count: 0,
    };

    /// Summary of a single element
    #[must_use]
    pub const fn of(value: i8) -> Self {
        let wide = value as i64;
        Self {
            sum: wide * wide,
            min: value,
            max: value,
            count: 1,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Minimum element, or `None` for an empty summary
    #[must_use]
    pub const fn min_value(&self) -> Option<i8> {
        if self.is_empty() {
            None
        } else {
            Some(self.min)
        }
    }

    /// Maximum element, or `None` for an empty summary
    #[must_use]
    pub const fn max_value(&self) -> Option<i8> {
        if self.is_empty() {
            None
        } else {
            Some(self.max)
        }
    }

    /// Folds one element into the summary
    pub fn push(&mut self, value: i8) {
        let wide = i64::from(value);
        self.sum += wide * wide;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
        self.count += 1;
    }

    /// Merges two partial summaries.
    ///
    /// Associative and commutative, with [`Summary::EMPTY`] as identity, so
    /// partials may be folded in any completion order.
    #[must_use]
    pub fn combine(self, other: Summary) -> Summary {
        Summary {
            sum: self.sum + other.sum,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            count: self.count + other.count,
        }
    }
}

impl Default for Summary {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min_value(), self.max_value()) {
            (Some(min), Some(max)) => write!(f, "{{sum: {}, min: {}, max: {}}}", self.sum, min, max),
            _ => write!(f, "{{sum: {}, min: n/a, max: n/a}}", self.sum),
        }
    }
}

/// Half-open index range `[lo, hi)` into an array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionRange {
    pub lo: usize,
    pub hi: usize,
}

impl PartitionRange {
    #[must_use]
    pub const fn new(lo: usize, hi: usize) -> Self {
        Self { lo, hi }
    }

    /// Builds a range from signed bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SqMinMaxError::InvalidRange`] if either bound is negative or
    /// `lo > hi`. The length check against a concrete array happens in
    /// [`PartitionRange::validate`].
    pub fn from_signed(lo: i64, hi: i64) -> Result<Self> {
        let invalid = || SqMinMaxError::InvalidRange { lo, hi, len: 0 };
        if lo > hi {
            return Err(invalid());
        }
        let lo_index = usize::try_from(lo).map_err(|_| invalid())?;
        let hi_index = usize::try_from(hi).map_err(|_| invalid())?;
        Ok(Self::new(lo_index, hi_index))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.hi.saturating_sub(self.lo)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.hi <= self.lo
    }

    /// Checks `lo <= hi <= len`
    ///
    /// # Errors
    ///
    /// Returns [`SqMinMaxError::InvalidRange`] when the bounds do not fit.
    pub fn validate(&self, len: usize) -> Result<()> {
        if self.lo > self.hi || self.hi > len {
            return Err(SqMinMaxError::InvalidRange {
                lo: to_signed(self.lo),
                hi: to_signed(self.hi),
                len,
            });
        }
        Ok(())
    }
}

fn to_signed(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

impl fmt::Display for PartitionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lo, self.hi)
    }
}

/// Computes a [`Summary`] over one range of an array.
///
/// The parallel aggregator calls this from worker threads, hence `Sync`.
pub trait RangeReducer: Sync {
    /// Reduce `data[range.lo..range.hi]`
    ///
    /// # Errors
    ///
    /// Returns an error if the range does not fit the array, or if the
    /// implementation fails for any other reason.
    fn reduce_range(&self, data: &[i8], range: PartitionRange) -> Result<Summary>;
}

/// The production reducer: a single ascending pass over the range
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredSumMinMax;

impl RangeReducer for SquaredSumMinMax {
    fn reduce_range(&self, data: &[i8], range: PartitionRange) -> Result<Summary> {
        super::sequential::reduce(data, range.lo, range.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_with_empty_is_identity() {
        let s = Summary::of(-7).combine(Summary::of(3));
        assert_eq!(s.combine(Summary::EMPTY), s);
        assert_eq!(Summary::EMPTY.combine(s), s);
    }

    #[test]
    fn empty_summary_has_no_extrema() {
        assert!(Summary::EMPTY.is_empty());
        assert_eq!(Summary::EMPTY.min_value(), None);
        assert_eq!(Summary::EMPTY.max_value(), None);
        assert_eq!(Summary::EMPTY.to_string(), "{sum: 0, min: n/a, max: n/a}");
    }

    #[test]
    fn push_matches_of() {
        let mut s = Summary::EMPTY;
        s.push(-128);
        assert_eq!(s, Summary::of(-128));
        assert_eq!(s.sum, 16384);
    }

    #[test]
    fn from_signed_rejects_negative_bounds() {
        assert!(matches!(
            PartitionRange::from_signed(-1, 4),
            Err(SqMinMaxError::InvalidRange { lo: -1, hi: 4, .. })
        ));
        assert!(PartitionRange::from_signed(0, -2).is_err());
        assert!(PartitionRange::from_signed(5, 2).is_err());
        assert_eq!(PartitionRange::from_signed(2, 5), Ok(PartitionRange::new(2, 5)));
    }

    #[test]
    fn validate_checks_upper_bound() {
        assert!(PartitionRange::new(0, 3).validate(3).is_ok());
        assert_eq!(
            PartitionRange::new(1, 4).validate(3),
            Err(SqMinMaxError::InvalidRange { lo: 1, hi: 4, len: 3 })
        );
    }
}
