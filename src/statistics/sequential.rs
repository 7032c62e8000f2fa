//! Single-threaded range reduction
//!
//! [`reduce`] is the leaf of the parallel aggregation and also the sequential
//! baseline the benchmark compares against.

use crate::errors::Result;

use super::operations::{PartitionRange, Summary};

/// Computes sum of squares, minimum and maximum over `data[lo..hi]`.
///
/// Elements are visited in ascending index order. Minimum and maximum are
/// seeded from the first element of the range, and each square is widened
/// to `i64` before accumulation. An empty range (`lo == hi`) returns
/// [`Summary::EMPTY`].
///
/// # Errors
///
/// Returns [`SqMinMaxError::InvalidRange`](crate::errors::SqMinMaxError::InvalidRange)
/// if `lo > hi` or `hi > data.len()`.
pub fn reduce(data: &[i8], lo: usize, hi: usize) -> Result<Summary> {
    let range = PartitionRange::new(lo, hi);
    range.validate(data.len())?;

    let slice = &data[lo..hi];
    let Some((&first, rest)) = slice.split_first() else {
        return Ok(Summary::EMPTY);
    };

    let mut summary = Summary::of(first);
    for &value in rest {
        summary.push(value);
    }
    Ok(summary)
}

/// [`reduce`] over a [`PartitionRange`]
///
/// # Errors
///
/// Same as [`reduce`].
pub fn reduce_range(data: &[i8], range: PartitionRange) -> Result<Summary> {
    reduce(data, range.lo, range.hi)
}
