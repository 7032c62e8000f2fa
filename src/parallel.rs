//! Parallel processing configuration
//!
//! The thread count is always explicit: [`ParallelConfig`] either carries a
//! user-chosen value or resolves to the number of logical CPUs, and the
//! [`ParallelAggregator`] is built from the resolved value.

use log::info;

use crate::errors::{Result, SqMinMaxError};
use crate::statistics::ParallelAggregator;

/// Configuration for parallel processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallelConfig {
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    /// Create a new parallel configuration
    pub fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// Create a configuration that uses all available CPU cores
    pub fn all_cores() -> Self {
        Self {
            num_threads: Some(num_cpus::get()),
        }
    }

    /// Create a configuration that uses a specific number of threads
    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Thread count this configuration runs with
    ///
    /// # Errors
    ///
    /// Returns [`SqMinMaxError::InvalidArgument`] if an explicit count of zero
    /// was requested.
    pub fn resolved_threads(&self) -> Result<usize> {
        match self.num_threads {
            Some(0) => Err(SqMinMaxError::invalid_argument(
                "thread count must be at least 1",
            )),
            Some(n) => Ok(n),
            None => Ok(num_cpus::get().max(1)),
        }
    }

    /// Build the aggregator and its worker pool for this configuration
    ///
    /// # Errors
    ///
    /// See [`ParallelConfig::resolved_threads`] and [`ParallelAggregator::new`].
    pub fn build_aggregator(&self) -> Result<ParallelAggregator> {
        let threads = self.resolved_threads()?;
        let aggregator = ParallelAggregator::new(threads)?;

        if self.num_threads.is_some() {
            info!("Configured parallel reduction with {} threads", threads);
        } else {
            info!("Using {} threads (one per logical CPU)", threads);
        }

        Ok(aggregator)
    }
}

/// Get information about the current parallel configuration
pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        available_cores: num_cpus::get(),
        physical_cores: num_cpus::get_physical(),
        available_parallelism: std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
    }
}

/// Information about the parallel processing environment
#[derive(Debug, Clone)]
pub struct ParallelInfo {
    pub available_cores: usize,
    pub physical_cores: usize,
    pub available_parallelism: usize,
}

impl ParallelInfo {
    /// Log parallel processing information
    pub fn log_info(&self) {
        info!(
            "Logical CPUs: {}, physical cores: {}, available parallelism: {}",
            self.available_cores, self.physical_cores, self.available_parallelism
        );
    }
}
