//! Parallel divide-and-conquer reduction
//!
//! The array is cut into `T` contiguous partitions. The first `T - 1` run on a
//! dedicated worker pool, the last runs on the calling thread, and the partial
//! [`Summary`] values are folded as they arrive.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crossbeam_channel::unbounded;
use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::errors::{Result, SqMinMaxError};

use super::operations::{PartitionRange, RangeReducer, SquaredSumMinMax, Summary};

/// Splits `[0, len)` into `thread_count` contiguous partitions.
///
/// Every partition but the last spans `len / thread_count` elements; the last
/// one absorbs the remainder. When `len < thread_count` the leading partitions
/// are empty.
///
/// # Errors
///
/// Returns [`SqMinMaxError::InvalidArgument`] if `thread_count` is zero.
pub fn partition(len: usize, thread_count: usize) -> Result<Vec<PartitionRange>> {
    if thread_count == 0 {
        return Err(SqMinMaxError::invalid_argument(
            "thread count must be at least 1",
        ));
    }

    let range = len / thread_count;
    let last = thread_count - 1;
    let mut partitions: Vec<PartitionRange> = (0..last)
        .map(|i| PartitionRange::new(i * range, i * range + range))
        .collect();
    partitions.push(PartitionRange::new(last * range, len));
    Ok(partitions)
}

/// Fan-out/fan-in aggregator with a fixed thread count.
///
/// Owns a pool of `thread_count - 1` worker threads, so repeated runs reuse
/// the same threads. With a thread count of one no pool is built and the whole
/// array is reduced on the caller.
#[derive(Debug)]
pub struct ParallelAggregator {
    thread_count: usize,
    pool: Option<ThreadPool>,
}

impl ParallelAggregator {
    /// Create an aggregator for `thread_count` partitions
    ///
    /// # Errors
    ///
    /// Returns [`SqMinMaxError::InvalidArgument`] for a zero thread count and
    /// [`SqMinMaxError::ThreadPoolError`] if the worker pool cannot be built.
    pub fn new(thread_count: usize) -> Result<Self> {
        if thread_count == 0 {
            return Err(SqMinMaxError::invalid_argument(
                "thread count must be at least 1",
            ));
        }

        let pool = if thread_count > 1 {
            let workers = thread_count - 1;
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("sqminmax-worker-{i}"))
                .build()
                .map_err(|e| {
                    SqMinMaxError::ThreadPoolError(format!(
                        "Failed to build worker pool with {} threads: {}",
                        workers, e
                    ))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self { thread_count, pool })
    }

    /// Number of partitions, including the one run on the caller
    #[must_use]
    pub const fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// Sum of squares, minimum and maximum of `data`
    ///
    /// # Errors
    ///
    /// Returns [`SqMinMaxError::TaskFailure`] if any partition fails.
    pub fn aggregate(&self, data: &[i8]) -> Result<Summary> {
        self.aggregate_with(data, &SquaredSumMinMax)
    }

    /// Runs `reducer` over every partition of `data` and folds the results.
    ///
    /// Blocks once, after dispatching the worker partitions and reducing the
    /// caller's own partition, until every worker has reported. A partition
    /// that returns an error, panics, or exits without reporting turns the
    /// whole aggregation into a [`SqMinMaxError::TaskFailure`]; if several
    /// fail, the lowest partition index is reported.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn aggregate_with<R>(&self, data: &[i8], reducer: &R) -> Result<Summary>
    where
        R: RangeReducer + ?Sized,
    {
        let partitions = partition(data.len(), self.thread_count)?;
        let inline_index = self.thread_count - 1;
        let (dispatched, inline) = partitions.split_at(inline_index);
        let inline = inline[0];

        debug!(
            "Reducing {} elements in {} partitions of {} (last {})",
            data.len(),
            self.thread_count,
            data.len() / self.thread_count,
            inline.len()
        );
        if data.len() < self.thread_count {
            debug!(
                "{} partitions for {} elements; leading partitions are empty",
                self.thread_count,
                data.len()
            );
        }

        let Some(pool) = &self.pool else {
            return run_partition(reducer, data, inline_index, inline);
        };

        let (tx, rx) = unbounded::<(usize, Result<Summary>)>();

        pool.in_place_scope(|scope| {
            for (index, &range) in dispatched.iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let outcome = run_partition(reducer, data, index, range);
                    // The receiver lives until every worker has finished.
                    let _ = tx.send((index, outcome));
                });
            }
            drop(tx);

            let mut failures = Vec::new();
            let mut total = match run_partition(reducer, data, inline_index, inline) {
                Ok(summary) => summary,
                Err(error) => {
                    failures.push((inline_index, error));
                    Summary::EMPTY
                }
            };

            // Ends once every worker's sender has been dropped.
            let mut reported = vec![false; dispatched.len()];
            for (index, outcome) in rx.iter() {
                reported[index] = true;
                match outcome {
                    Ok(summary) => total = total.combine(summary),
                    Err(error) => failures.push((index, error)),
                }
            }

            for (index, _) in reported.iter().enumerate().filter(|(_, seen)| !**seen) {
                let range = dispatched[index];
                failures.push((
                    index,
                    task_failure(index, range, "worker exited without reporting a result".into()),
                ));
            }

            match failures.into_iter().min_by_key(|(index, _)| *index) {
                Some((_, error)) => Err(error),
                None => Ok(total),
            }
        })
    }
}

/// Reduces `data` with `thread_count` partitions on a freshly built pool.
///
/// Prefer keeping a [`ParallelAggregator`] around for repeated runs.
///
/// # Errors
///
/// See [`ParallelAggregator::new`] and [`ParallelAggregator::aggregate`].
pub fn parallel_reduce(data: &[i8], thread_count: usize) -> Result<Summary> {
    ParallelAggregator::new(thread_count)?.aggregate(data)
}

fn run_partition<R>(reducer: &R, data: &[i8], index: usize, range: PartitionRange) -> Result<Summary>
where
    R: RangeReducer + ?Sized,
{
    match panic::catch_unwind(AssertUnwindSafe(|| reducer.reduce_range(data, range))) {
        Ok(Ok(summary)) => Ok(summary),
        Ok(Err(error)) => Err(task_failure(index, range, error.to_string())),
        Err(payload) => Err(task_failure(index, range, panic_message(payload.as_ref()))),
    }
}

fn task_failure(partition: usize, range: PartitionRange, reason: String) -> SqMinMaxError {
    SqMinMaxError::TaskFailure {
        partition,
        lo: range.lo,
        hi: range.hi,
        reason,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_absorbs_remainder_in_last() {
        let parts = partition(10, 3).unwrap();
        assert_eq!(
            parts,
            vec![
                PartitionRange::new(0, 3),
                PartitionRange::new(3, 6),
                PartitionRange::new(6, 10),
            ]
        );
    }

    #[test]
    fn partition_more_threads_than_elements() {
        let parts = partition(2, 4).unwrap();
        assert_eq!(parts.len(), 4);
        assert!(parts[..3].iter().all(PartitionRange::is_empty));
        assert_eq!(parts[3], PartitionRange::new(0, 2));
    }

    #[test]
    fn partition_rejects_zero_threads() {
        assert!(matches!(
            partition(5, 0),
            Err(SqMinMaxError::InvalidArgument { .. })
        ));
        assert!(ParallelAggregator::new(0).is_err());
    }

    #[test]
    fn single_thread_builds_no_pool() {
        let aggregator = ParallelAggregator::new(1).unwrap();
        assert!(aggregator.pool.is_none());
        let s = aggregator.aggregate(&[2, -3, 5]).unwrap();
        assert_eq!((s.sum, s.min, s.max), (38, -3, 5));
    }

    #[test]
    fn panic_payloads_are_described() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "panicked: boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "panicked: bang");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "panicked");
    }
}
