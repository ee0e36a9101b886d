//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into `AvError`
//! via `From` impls, or keep them separate and wrap `AvError` as one variant.
//! Both patterns are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::ids::{VehicleId, WaypointId};

/// The top-level error type for `av-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum AvError {
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("waypoint {0} not found")]
    WaypointNotFound(WaypointId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `av-*` crates.
pub type AvResult<T> = Result<T, AvError>;
