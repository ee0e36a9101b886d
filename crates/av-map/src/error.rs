//! Map-subsystem error type.

use thiserror::Error;

use av_core::{ArrowId, WaypointId};

/// Errors produced by `av-map`.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("route names no arrows")]
    EmptyRoute,

    #[error("waypoint {waypoint} is not on arrow {arrow}")]
    WaypointNotOnArrow {
        waypoint: WaypointId,
        arrow:    ArrowId,
    },

    #[error("arrows {a} and {b} do not share a junction waypoint")]
    DisconnectedArrows { a: ArrowId, b: ArrowId },

    #[error("an arrow needs at least two waypoints, got {0}")]
    ArrowTooShort(usize),

    #[error("waypoint {0} is not in the map")]
    UnknownWaypoint(WaypointId),

    #[error("arrow {0} is not in the map")]
    UnknownArrow(ArrowId),
}

pub type MapResult<T> = Result<T, MapError>;
