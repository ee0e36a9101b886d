//! `VehicleAgent` — per-vehicle state, status ingestion, and the STOP/MOVE
//! phase state machine.

use rustc_hash::FxHashMap;
use tracing::info;

use av_core::{ArrowId, Phase, Point, RouteCode, Timestamp, VehicleId, WaypointId};
use av_map::RoadMap;
use av_msg::{Broadcast, TrafficSignalStatusMsg, VehicleStatusMsg};
use av_schedule::{LegAction, Schedule};

use crate::{AgentError, AgentResult};

/// One simulated vehicle on the shared road network.
///
/// The agent exclusively owns its schedule and both observation tables.  The
/// tables are written only by [`observe`](Self::observe) and read only by the
/// hazard evaluator; the per-tick update and message delivery must be
/// serialized by the host (one event loop per agent).
pub struct VehicleAgent {
    pub(crate) id: VehicleId,

    // ── Pose ──────────────────────────────────────────────────────────────
    pub(crate) position: Point,
    pub(crate) yaw: f32,
    pub(crate) arrow: ArrowId,
    pub(crate) waypoint: WaypointId,
    /// Waypoint occupied before the last successful step.
    pub(crate) prev_waypoint: WaypointId,

    // ── Motion ────────────────────────────────────────────────────────────
    pub(crate) velocity_mps: f32,
    /// Fixed tick interval in seconds.
    pub(crate) dt_secs: f32,
    pub(crate) phase: Phase,
    pub(crate) schedule: Schedule,

    // ── Observation tables (never expired) ────────────────────────────────
    pub(crate) peers: FxHashMap<VehicleId, VehicleStatusMsg>,
    pub(crate) signals: FxHashMap<RouteCode, TrafficSignalStatusMsg>,
}

impl VehicleAgent {
    /// Keep at least this far behind a vehicle ahead, in metres.
    pub const LOWER_INTER_VEHICLE_DISTANCE_M: f32 = 3.0;
    /// Stop at least this far before a non-green signal's stop line.
    pub const LOWER_INTER_SIGNAL_DISTANCE_M: f32 = 1.0;
    /// Hazard lookahead bound for the monitored route, in metres.
    pub const DEFAULT_LOOKAHEAD_M: f32 = 100.0;
    /// Velocity ramp-up cap, in m/s².
    pub const ACCELERATION_MAX_MPS2: f32 = 0.3;

    // ── Construction ──────────────────────────────────────────────────────

    /// Place a vehicle at `waypoint` on `arrow` with the waypoint's canonical
    /// pose.
    pub fn new(
        id:           VehicleId,
        map:          &RoadMap,
        waypoint:     WaypointId,
        arrow:        ArrowId,
        velocity_mps: f32,
        dt_secs:      f32,
        schedule:     Schedule,
    ) -> AgentResult<Self> {
        let yaw = map
            .yaw(arrow, waypoint)
            .ok_or(AgentError::NotOnArrow { waypoint, arrow })?;
        Ok(Self {
            id,
            position: map.position(waypoint),
            yaw,
            arrow,
            waypoint,
            prev_waypoint: waypoint,
            velocity_mps,
            dt_secs,
            phase: Phase::Stop,
            schedule,
            peers: FxHashMap::default(),
            signals: FxHashMap::default(),
        })
    }

    /// Place a vehicle at the mapped waypoint nearest to `pos`.
    pub fn spawn_near(
        id:           VehicleId,
        map:          &RoadMap,
        pos:          Point,
        velocity_mps: f32,
        dt_secs:      f32,
        schedule:     Schedule,
    ) -> AgentResult<Self> {
        let waypoint = map.nearest_waypoint(pos).ok_or(AgentError::EmptyMap)?;
        let arrow = map
            .containing_arrow(waypoint)
            .ok_or(AgentError::IsolatedWaypoint(waypoint))?;
        Self::new(id, map, waypoint, arrow, velocity_mps, dt_secs, schedule)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn arrow(&self) -> ArrowId {
        self.arrow
    }

    pub fn waypoint(&self) -> WaypointId {
        self.waypoint
    }

    pub fn prev_waypoint(&self) -> WaypointId {
        self.prev_waypoint
    }

    pub fn velocity_mps(&self) -> f32 {
        self.velocity_mps
    }

    pub fn dt_secs(&self) -> f32 {
        self.dt_secs
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Read-only view of the peer observation table.
    pub fn peers(&self) -> &FxHashMap<VehicleId, VehicleStatusMsg> {
        &self.peers
    }

    /// Read-only view of the signal observation table.
    pub fn signals(&self) -> &FxHashMap<RouteCode, TrafficSignalStatusMsg> {
        &self.signals
    }

    /// The agent's own status snapshot for broadcasting.
    pub fn status(&self) -> VehicleStatusMsg {
        VehicleStatusMsg {
            waypoint:     self.waypoint,
            arrow:        self.arrow,
            position:     self.position,
            yaw:          self.yaw,
            velocity_mps: self.velocity_mps,
            phase:        self.phase,
        }
    }

    // ── Status ingestion ──────────────────────────────────────────────────

    /// Record one decoded broadcast into the observation tables.
    ///
    /// This is the dispatch table: each channel variant routes to its
    /// handler.  The handlers are the only writers of either table.
    pub fn observe(&mut self, broadcast: Broadcast) {
        match broadcast {
            Broadcast::Vehicle { sender, status } => self.handle_vehicle_status(sender, status),
            Broadcast::TrafficSignal { status } => self.handle_signal_status(status),
        }
    }

    /// Vehicle-status channel handler.
    ///
    /// The agent's own private echo is dropped; a peer's entry is overwritten
    /// wholesale, never merged, so re-delivery of the same broadcast is a
    /// no-op.
    pub fn handle_vehicle_status(&mut self, sender: VehicleId, status: VehicleStatusMsg) {
        if sender == self.id {
            return;
        }
        self.peers.insert(sender, status);
    }

    /// Traffic-signal channel handler.  Overwrites by governed route code.
    pub fn handle_signal_status(&mut self, status: TrafficSignalStatusMsg) {
        self.signals.insert(status.route_code.clone(), status);
    }

    // ── Per-tick update ───────────────────────────────────────────────────

    /// Run one tick of the phase state machine at wall-clock instant `now`.
    ///
    /// All reads happen before any mutation is committed, so an interrupted
    /// host can always re-run a tick from the prior state.
    pub fn update_status(&mut self, map: &RoadMap, now: Timestamp) {
        match self.phase {
            Phase::Stop => self.update_stopped(now),
            Phase::Move => self.update_moving(map, now),
        }
    }

    /// STOP: leave for the front MOVE leg immediately, or once a WAIT leg's
    /// window has run out — provided more legs remain.  A final WAIT leg is
    /// never discarded; the agent holds.
    fn update_stopped(&mut self, now: Timestamp) {
        let Some(front) = self.schedule.front() else {
            return; // exhausted schedule: hold phase, take no action
        };
        match front.action {
            LegAction::Move => {
                info!(vehicle = %self.id, "departing on MOVE leg");
                self.phase = Phase::Move;
            }
            LegAction::Wait => {
                if now >= front.window.end && self.schedule.len() > 1 {
                    self.schedule.finish_front(now);
                    info!(vehicle = %self.id, "wait window over, departing");
                    self.phase = Phase::Move;
                }
            }
        }
    }

    /// MOVE: advance by the hazard-bounded step, run the velocity controller,
    /// and settle onto the goal when the front leg's goal waypoint is reached.
    fn update_moving(&mut self, map: &RoadMap, now: Timestamp) {
        self.update_pose(map);
        self.update_velocity(map);
        if self.is_achieved() {
            self.snap_to_goal(map);
            self.schedule.finish_front(now);
            info!(vehicle = %self.id, waypoint = %self.waypoint, "reached leg goal");
            self.phase = Phase::Stop;
        }
    }

    /// `true` once the current waypoint is the front leg's goal waypoint.
    fn is_achieved(&self) -> bool {
        self.schedule
            .front()
            .is_some_and(|leg| self.waypoint == leg.route.goal)
    }

    /// Clear discrete-stepping overshoot: put the pose exactly on the goal
    /// waypoint's canonical position and heading, on the leg's last arrow.
    fn snap_to_goal(&mut self, map: &RoadMap) {
        let Some(front) = self.schedule.front() else {
            return;
        };
        let Some(&last_arrow) = front.route.arrows.last() else {
            return;
        };
        self.waypoint = front.route.goal;
        self.arrow = last_arrow;
        self.position = map.position(front.route.goal);
        if let Some(yaw) = map.yaw(last_arrow, front.route.goal) {
            self.yaw = yaw;
        }
    }
}
