//! Sum-of-squares, minimum and maximum reductions
//!
//! # Organization
//!
//! This module is organized into submodules:
//! - [`operations`]: The [`Summary`] value, ranges and the [`RangeReducer`] trait
//! - [`sequential`]: Single-pass reduction over one range
//! - [`parallel`]: Partitioning and the fan-out/fan-in aggregator

pub mod operations;
pub mod parallel;
pub mod sequential;

// Re-export the main types and functions for convenience
pub use operations::{PartitionRange, RangeReducer, SquaredSumMinMax, Summary};
pub use parallel::{parallel_reduce, partition, ParallelAggregator};
pub use sequential::{reduce, reduce_range};
