//! Schedule-subsystem error type.

use thiserror::Error;

/// Errors produced by `av-schedule`.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("schedule parse error: {0}")]
    Parse(String),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
