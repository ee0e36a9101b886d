//! Motion planning: monitored routes, movable distance, pose advancement,
//! and the velocity controller.

use tracing::trace;

use av_map::{RoadMap, Route};
use av_schedule::LegAction;

use crate::agent::VehicleAgent;
use crate::hazard::{inter_signal_distance, inter_vehicle_distance};

impl VehicleAgent {
    // ── Monitored route ───────────────────────────────────────────────────

    /// The remaining stretch of the front leg's route, starting at the
    /// agent's current waypoint and sliced to `lookahead_m`.
    ///
    /// Recomputed fresh on every call; never stored.  `None` when the bound
    /// is non-positive, the schedule is empty, or no positive-length stretch
    /// remains — all treated by the planner as "nowhere to go".
    pub(crate) fn monitored_route(&self, map: &RoadMap, lookahead_m: f32) -> Option<Route> {
        if lookahead_m <= 0.0 {
            return None;
        }
        let front = self.schedule.front()?;

        // Arrows still ahead of the agent.  Right after a leg change the
        // agent's arrow belongs to the previous leg, in which case the new
        // leg is ahead in full.
        let idx = front
            .route
            .arrows
            .iter()
            .position(|&a| a == self.arrow)
            .unwrap_or(0);
        let remaining = front.route.arrows[idx..].to_vec();

        // Monitor through to the end of the leg's final arrow, so hazards
        // just past the goal waypoint still register.
        let &last_arrow = remaining.last()?;
        let &monitor_goal = map.arrow_waypoint_ids(last_arrow).last()?;

        let route = map.route(self.waypoint, monitor_goal, remaining).ok()?;
        map.sliced_route(&route, lookahead_m)
    }

    // ── Movable distance ──────────────────────────────────────────────────

    /// Upper bound on this tick's forward progress, in metres.
    ///
    /// Zero unless the front leg is a `Move` leg.  Two-pass computation:
    /// first the inter-vehicle bound over the default lookahead, then the
    /// signal check over a route re-sliced to that bound — a non-green
    /// signal beyond a blocking vehicle must not be credited as reachable.
    ///
    /// May be negative (a hazard inside the safety margin); the caller's
    /// `min` with the velocity step turns that into "no movement".
    pub(crate) fn movable_distance(&self, map: &RoadMap) -> f32 {
        let Some(front) = self.schedule.front() else {
            return 0.0;
        };
        if front.action != LegAction::Move {
            return 0.0;
        }

        let Some(monitored) = self.monitored_route(map, Self::DEFAULT_LOOKAHEAD_M) else {
            return 0.0;
        };

        let mut movable = match inter_vehicle_distance(map, &monitored, &self.peers) {
            Some(d) => d - Self::LOWER_INTER_VEHICLE_DISTANCE_M,
            None => map.route_length(&monitored),
        };

        // Second pass: tighten the lookahead to the vehicle-limited bound.
        let Some(tightened) = self.monitored_route(map, movable) else {
            return 0.0;
        };
        if let Some(d) = inter_signal_distance(map, &tightened, self.waypoint, &self.signals) {
            movable = movable.min(d - Self::LOWER_INTER_SIGNAL_DISTANCE_M);
        }

        trace!(vehicle = %self.id, movable, "movable distance");
        movable
    }

    // ── Pose advancement ──────────────────────────────────────────────────

    /// Advance the pose by `min(velocity · dt, movable)`, if that is
    /// positive.
    pub(crate) fn update_pose(&mut self, map: &RoadMap) {
        let movable = self.movable_distance(map);
        let step = (self.velocity_mps * self.dt_secs).min(movable);
        if step <= 0.0 {
            return;
        }

        let Some(front) = self.schedule.front() else {
            return;
        };
        let Ok(leg_route) = map.route(
            front.route.start,
            front.route.goal,
            front.route.arrows.clone(),
        ) else {
            return; // malformed leg route: hold position
        };

        self.prev_waypoint = self.waypoint;
        let (position, waypoint, arrow) = map.moved_position(self.position, step, &leg_route);
        self.position = position;
        self.waypoint = waypoint;
        self.arrow = arrow;
        if let Some(yaw) = map.yaw(arrow, waypoint) {
            self.yaw = yaw;
        }
    }

    // ── Velocity controller ───────────────────────────────────────────────

    /// Track the posted speed limit: ramp up under the acceleration cap,
    /// snap down immediately when the limit drops below the current speed.
    ///
    /// Runs every MOVE tick independent of hazard distances.
    pub(crate) fn update_velocity(&mut self, map: &RoadMap) {
        let limit = map.speed_limit(self.waypoint);
        if self.velocity_mps < limit {
            self.velocity_mps +=
                (Self::ACCELERATION_MAX_MPS2 * self.dt_secs).min(limit - self.velocity_mps);
        } else if limit < self.velocity_mps {
            self.velocity_mps = limit;
        }
    }
}
