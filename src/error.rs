//! Error types for batch construction, simulation and reporting.

use thiserror::Error;

use crate::models::{ProcessId, Ticks};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors raised while building batches, simulating or reporting.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScheduleError {
    /// A process descriptor failed construction-time checks.
    #[error("invalid process {id}: {reason}")]
    InvalidProcess { id: ProcessId, reason: String },

    /// A selector was asked to pick from a ready set with no eligible process.
    ///
    /// The engine's admit and idle-advance transitions make this unreachable;
    /// seeing it means the engine itself is broken.
    #[error("no eligible process in the ready set at t={clock}")]
    EmptyReadySet { clock: Ticks },

    /// Metrics were requested for a batch with no completed processes.
    #[error("cannot aggregate metrics over an empty batch")]
    EmptyBatch,

    /// Metrics were requested for a batch that still has unfinished processes.
    #[error("process {id} has not terminated")]
    Unfinished { id: ProcessId },

    /// Running a process would push the clock past `Ticks::MAX`.
    #[error("process {id} would finish after the last representable tick")]
    TimeOverflow { id: ProcessId },

    /// Reading input or writing a report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input or output could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScheduleError {
    /// Creates an invalid process error.
    pub fn invalid_process(id: ProcessId, reason: impl Into<String>) -> Self {
        Self::InvalidProcess {
            id,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScheduleError::invalid_process(3, "burst time must be at least 1 (got 0)");
        assert_eq!(
            err.to_string(),
            "invalid process 3: burst time must be at least 1 (got 0)"
        );
        assert_eq!(
            ScheduleError::EmptyReadySet { clock: 7 }.to_string(),
            "no eligible process in the ready set at t=7"
        );
        assert_eq!(
            ScheduleError::EmptyBatch.to_string(),
            "cannot aggregate metrics over an empty batch"
        );
        assert_eq!(
            ScheduleError::TimeOverflow { id: 2 }.to_string(),
            "process 2 would finish after the last representable tick"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ScheduleError = io.into();
        assert!(matches!(err, ScheduleError::Io(_)));
    }
}
