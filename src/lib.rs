//! SqMinMax: sum of squares, minimum and maximum over byte arrays
//!
//! Computes `{Σ v², min, max}` over an `i8` array both sequentially and with a
//! divide-and-conquer parallel reduction, and measures the speed-up.
//!
//! ## Key Features
//!
//! - **Range Reduction**: A single ascending pass with a 64-bit accumulator
//! - **Parallel Aggregation**: Fixed contiguous partitions on a Rayon worker pool,
//!   with the calling thread reducing the last partition itself
//! - **Failure Propagation**: A failed or panicking partition fails the whole run
//! - **Benchmarking**: Timing, speed-up and a textual report
//!
//! ## Module Organization
//!
//! - [`statistics`]: The reduction itself, sequential and parallel
//! - [`parallel`]: Thread count configuration and environment info
//! - [`data`]: Random input synthesis
//! - [`benchmark`]: Timing and reporting
//! - [`cli`]: Command-line arguments
//! - [`errors`]: Centralized error handling
//!
//! ## Usage
//!
//! ```rust
//! use sq_min_max::prelude::*;
//!
//! let data = [2, -3, 5];
//! let whole = reduce(&data, 0, data.len()).unwrap();
//! let parallel = parallel_reduce(&data, 2).unwrap();
//!
//! assert_eq!(whole, parallel);
//! assert_eq!((whole.sum, whole.min, whole.max), (38, -3, 5));
//! ```

pub mod benchmark;
pub mod cli;
pub mod data;
pub mod errors;
pub mod parallel;
pub mod statistics;

pub use errors::*;
pub use statistics::{
    parallel_reduce, partition, reduce, reduce_range, ParallelAggregator, PartitionRange,
    RangeReducer, SquaredSumMinMax, Summary,
};

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::errors::{Result, SqMinMaxError};
    pub use crate::parallel::ParallelConfig;
    pub use crate::statistics::{
        parallel_reduce, partition, reduce, ParallelAggregator, PartitionRange, RangeReducer,
        Summary,
    };
}
