//! Centralized error handling for SqMinMax
//!
//! Every fallible operation in the crate returns [`Result`], carrying a
//! [`SqMinMaxError`] that names the offending bounds or partition.

use std::fmt;

use crate::statistics::Summary;

/// Main error type for SqMinMax operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqMinMaxError {
    /// Malformed user input: array size or thread count
    InvalidArgument { message: String },

    /// A range violates `0 <= lo <= hi <= len`
    InvalidRange { lo: i64, hi: i64, len: usize },

    /// A dispatched partition failed or never reported
    TaskFailure {
        partition: usize,
        lo: usize,
        hi: usize,
        reason: String,
    },

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Sequential and parallel runs disagree
    ResultMismatch { sequential: Summary, parallel: Summary },
}

impl fmt::Display for SqMinMaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqMinMaxError::InvalidArgument { message } => write!(f, "Invalid argument: {}", message),
            SqMinMaxError::InvalidRange { lo, hi, len } => write!(
                f,
                "Invalid range [{}, {}) for array of length {}",
                lo, hi, len
            ),
            SqMinMaxError::TaskFailure {
                partition,
                lo,
                hi,
                reason,
            } => write!(
                f,
                "Partition {} over [{}, {}) failed: {}",
                partition, lo, hi, reason
            ),
            SqMinMaxError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            SqMinMaxError::ResultMismatch {
                sequential,
                parallel,
            } => write!(
                f,
                "Parallel result {} does not match sequential result {}",
                parallel, sequential
            ),
        }
    }
}

impl std::error::Error for SqMinMaxError {}

impl SqMinMaxError {
    /// Shorthand for an [`SqMinMaxError::InvalidArgument`]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SqMinMaxError::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Result type alias for SqMinMax operations
pub type Result<T> = std::result::Result<T, SqMinMaxError>;
