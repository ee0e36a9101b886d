//! Status payload types and the decoded broadcast variant.

use av_core::{ArrowId, Phase, Point, RouteCode, VehicleId, WaypointId};

// ── SignalState ───────────────────────────────────────────────────────────────

/// Light state of a traffic signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalState {
    Green,
    Yellow,
    Red,
}

impl SignalState {
    /// `true` only for GREEN — YELLOW already commits a vehicle to stop.
    #[inline]
    pub fn is_passable(self) -> bool {
        matches!(self, SignalState::Green)
    }
}

impl std::fmt::Display for SignalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalState::Green => write!(f, "green"),
            SignalState::Yellow => write!(f, "yellow"),
            SignalState::Red => write!(f, "red"),
        }
    }
}

// ── Status payloads ───────────────────────────────────────────────────────────

/// One vehicle's broadcast status snapshot.
///
/// Peers only act on `waypoint` (the hazard evaluator matches it against
/// monitored routes); the remaining fields let externals render or audit the
/// fleet without another query path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VehicleStatusMsg {
    /// Last waypoint the vehicle passed.
    pub waypoint: WaypointId,
    /// Arrow the vehicle is currently on.
    pub arrow: ArrowId,
    /// Site position.
    pub position: Point,
    /// Heading in radians.
    pub yaw: f32,
    /// Current speed in m/s.
    pub velocity_mps: f32,
    /// Motion phase (STOP / MOVE).
    pub phase: Phase,
}

/// One traffic signal's broadcast status.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TrafficSignalStatusMsg {
    /// The stretch this signal governs: `arrows[0]` is the governed entry
    /// arrow and `start` the stop-line waypoint on it.
    pub route_code: RouteCode,
    /// Current light state.
    pub state: SignalState,
}

// ── Broadcast ─────────────────────────────────────────────────────────────────

/// A decoded broadcast — the tagged result of [`decode`](crate::decode).
///
/// Carrying the sender id alongside the vehicle payload is what lets an agent
/// drop its own private echo without string inspection.
#[derive(Clone, Debug, PartialEq)]
pub enum Broadcast {
    Vehicle {
        sender: VehicleId,
        status: VehicleStatusMsg,
    },
    TrafficSignal {
        status: TrafficSignalStatusMsg,
    },
}
