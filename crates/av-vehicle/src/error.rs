//! Vehicle-agent error type.
//!
//! Only construction can fail.  Once an agent exists, every runtime condition
//! (empty route, blocked path, exhausted schedule, stale observation) is
//! absorbed into "no movement this tick" rather than surfaced as an error.

use thiserror::Error;

use av_core::{ArrowId, WaypointId};

/// Errors produced when constructing a [`VehicleAgent`](crate::VehicleAgent).
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("spawn waypoint {waypoint} is not on arrow {arrow}")]
    NotOnArrow {
        waypoint: WaypointId,
        arrow:    ArrowId,
    },

    #[error("no arrow references waypoint {0}; the vehicle would be unroutable")]
    IsolatedWaypoint(WaypointId),

    #[error("the map has no waypoints to spawn on")]
    EmptyMap,
}

pub type AgentResult<T> = Result<T, AgentError>;
