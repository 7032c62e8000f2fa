//! Sequential versus parallel timing and the console report

use std::fmt::{self, Write as _};
use std::time::{Duration, Instant};

use log::debug;

use crate::errors::{Result, SqMinMaxError};
use crate::statistics::{reduce, ParallelAggregator, Summary};

/// A value together with the wall-clock time it took to produce
#[derive(Debug, Clone, Copy)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// Run `f` and measure it
pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

/// Outcome of one sequential run and one parallel run over the same array
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub size: usize,
    pub threads: usize,
    pub sequential: Timed<Summary>,
    pub parallel: Timed<Summary>,
}

impl BenchmarkReport {
    /// Sequential time divided by parallel time
    #[must_use]
    pub fn speedup(&self) -> f64 {
        let seq = self.sequential.elapsed.as_secs_f64();
        let par = self.parallel.elapsed.as_secs_f64();
        if par > 0.0 {
            seq / par
        } else if seq > 0.0 {
            f64::INFINITY
        } else {
            1.0
        }
    }

    /// Checks that both runs produced the same summary
    ///
    /// # Errors
    ///
    /// Returns [`SqMinMaxError::ResultMismatch`] when they differ.
    pub fn verify(&self) -> Result<()> {
        if self.sequential.value == self.parallel.value {
            Ok(())
        } else {
            Err(SqMinMaxError::ResultMismatch {
                sequential: self.sequential.value,
                parallel: self.parallel.value,
            })
        }
    }

    /// Textual report printed by the command-line tool
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "Sequential squared sum, min, max")?;
        write_summary(out, &self.sequential)?;
        writeln!(out)?;

        writeln!(out, "Parallel squared sum, min, max")?;
        writeln!(out, "Number of threads = {}", self.threads)?;
        write_summary(out, &self.parallel)?;
        writeln!(out)?;

        writeln!(out, "Speed-up: {:.6}", self.speedup())
    }
}

fn write_summary(out: &mut String, timed: &Timed<Summary>) -> fmt::Result {
    let summary = &timed.value;
    writeln!(out, "Squared Sum is: {}", summary.sum)?;
    writeln!(out, "Min value is: {}", display_extremum(summary.min_value()))?;
    writeln!(out, "Max value is: {}", display_extremum(summary.max_value()))?;
    writeln!(out, "Completed in {:.6} sec", timed.elapsed.as_secs_f64())
}

fn display_extremum(value: Option<i8>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

/// Reduce `data` sequentially, then through `aggregator`, timing both
///
/// # Errors
///
/// Propagates any reduction failure.
pub fn run_benchmark(data: &[i8], aggregator: &ParallelAggregator) -> Result<BenchmarkReport> {
    let sequential = timed(|| reduce(data, 0, data.len()));
    let sequential = Timed {
        value: sequential.value?,
        elapsed: sequential.elapsed,
    };
    debug!("Sequential pass finished in {:?}", sequential.elapsed);

    let parallel = timed(|| aggregator.aggregate(data));
    let parallel = Timed {
        value: parallel.value?,
        elapsed: parallel.elapsed,
    };
    debug!("Parallel pass finished in {:?}", parallel.elapsed);

    Ok(BenchmarkReport {
        size: data.len(),
        threads: aggregator.thread_count(),
        sequential,
        parallel,
    })
}
