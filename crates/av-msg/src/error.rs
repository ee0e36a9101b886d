//! Messaging-subsystem error type.

use thiserror::Error;

/// Errors produced by `av-msg`.
///
/// Every variant is recoverable by dropping the offending broadcast; none
/// should terminate an agent.
#[derive(Debug, Error)]
pub enum MsgError {
    #[error("topic {0:?} is on neither status channel")]
    UnknownTopic(String),

    #[error("bad sender segment {0:?} in vehicle status topic")]
    BadSender(String),

    #[error("payload codec error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MsgResult<T> = Result<T, MsgError>;
