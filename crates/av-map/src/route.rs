//! `Route` and the geometry queries a vehicle's motion planner runs per tick.
//!
//! # Conventions
//!
//! A route's waypoint sequence is the concatenation of its arrows' waypoint
//! sequences in travel order, clipped to `[start, goal]`, with the shared
//! junction waypoint between consecutive arrows counted once.
//!
//! A vehicle's "current waypoint" is the **last waypoint passed**, so
//! [`RoadMap::moved_position`] reports the waypoint at or behind the advanced
//! position, and arrival at the route goal means the goal waypoint itself was
//! passed.

use av_core::{ArrowId, Point, WaypointId};

use crate::map::RoadMap;
use crate::{MapError, MapResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered arrow sequence from a start waypoint to a goal waypoint.
///
/// Routes are cheap values recomputed freely; the map never stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Entry waypoint; must lie on the first arrow.
    pub start: WaypointId,
    /// Exit waypoint; must lie on the last arrow.
    pub goal: WaypointId,
    /// Arrows to traverse in order.  Never empty.
    pub arrows: Vec<ArrowId>,
}

// ── Geometry queries ──────────────────────────────────────────────────────────

impl RoadMap {
    /// Build a validated [`Route`] over `arrows` from `start` to `goal`.
    ///
    /// Checks that `start` lies on the first arrow, `goal` on the last, and
    /// that consecutive arrows share their junction waypoint.
    pub fn route(
        &self,
        start:  WaypointId,
        goal:   WaypointId,
        arrows: Vec<ArrowId>,
    ) -> MapResult<Route> {
        let (&first, &last) = match (arrows.first(), arrows.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(MapError::EmptyRoute),
        };
        if let Some(&bad) = arrows.iter().find(|a| a.index() >= self.arrow_count()) {
            return Err(MapError::UnknownArrow(bad));
        }
        if !self.arrow_waypoint_ids(first).contains(&start) {
            return Err(MapError::WaypointNotOnArrow { waypoint: start, arrow: first });
        }
        if !self.arrow_waypoint_ids(last).contains(&goal) {
            return Err(MapError::WaypointNotOnArrow { waypoint: goal, arrow: last });
        }
        for pair in arrows.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let a_end = self.arrow_waypoint_ids(a).last();
            let b_start = self.arrow_waypoint_ids(b).first();
            if a_end != b_start {
                return Err(MapError::DisconnectedArrows { a, b });
            }
        }
        Ok(Route { start, goal, arrows })
    }

    /// The route's waypoint sequence in travel order.
    pub fn route_waypoint_ids(&self, route: &Route) -> Vec<WaypointId> {
        self.waypoints_with_arrows(route)
            .into_iter()
            .map(|(wp, _)| wp)
            .collect()
    }

    /// Along-route length of a waypoint prefix: the sum of consecutive
    /// waypoint-to-waypoint distances.
    pub fn distance_of_waypoints(&self, waypoints: &[WaypointId]) -> f32 {
        waypoints
            .windows(2)
            .map(|w| self.position(w[0]).distance_m(self.position(w[1])))
            .sum()
    }

    /// Total along-route length of `route` from its start to its goal.
    pub fn route_length(&self, route: &Route) -> f32 {
        self.distance_of_waypoints(&self.route_waypoint_ids(route))
    }

    /// Truncate `route` to the longest waypoint prefix whose along-route
    /// length stays within `max_distance_m`.
    ///
    /// Returns `None` when `max_distance_m` is non-positive or no
    /// positive-length prefix fits — callers treat that as "nowhere to go".
    /// A bound at or beyond the route's length returns the whole route.
    pub fn sliced_route(&self, route: &Route, max_distance_m: f32) -> Option<Route> {
        if max_distance_m <= 0.0 {
            return None;
        }
        let pairs = self.waypoints_with_arrows(route);
        if pairs.len() < 2 {
            return None;
        }

        // Furthest waypoint index still within the bound.
        let mut cum = 0.0f32;
        let mut cut = 0usize;
        for i in 1..pairs.len() {
            cum += self.position(pairs[i - 1].0).distance_m(self.position(pairs[i].0));
            if cum > max_distance_m {
                break;
            }
            cut = i;
        }
        if cut == 0 {
            return None;
        }

        let (goal, last_arrow) = pairs[cut];
        let arrows_end = route.arrows.iter().position(|&a| a == last_arrow)?;
        Some(Route {
            start:  route.start,
            goal,
            arrows: route.arrows[..=arrows_end].to_vec(),
        })
    }

    /// Advance `distance_m` along `route` from `pos` (which lies on or near
    /// the route polyline).
    ///
    /// Returns the new position, the last waypoint passed, and the arrow the
    /// vehicle is on.  Progress clamps at the route goal; a vehicle can never
    /// step past the end of its route.
    pub fn moved_position(
        &self,
        pos:        Point,
        distance_m: f32,
        route:      &Route,
    ) -> (Point, WaypointId, ArrowId) {
        let pairs = self.waypoints_with_arrows(route);
        let Some(&(first_wp, first_arrow)) = pairs.first() else {
            return (self.position(route.start), route.start, ArrowId::INVALID);
        };
        if pairs.len() < 2 {
            // Degenerate single-waypoint route: snap to it.
            return (self.position(first_wp), first_wp, first_arrow);
        }

        let pts: Vec<Point> = pairs.iter().map(|&(wp, _)| self.position(wp)).collect();
        let mut cum = vec![0.0f32; pts.len()];
        for i in 1..pts.len() {
            cum[i] = cum[i - 1] + pts[i - 1].distance_m(pts[i]);
        }
        let total = cum[pts.len() - 1];

        // Locate `pos` on the polyline: nearest segment wins.
        let mut best_d2 = f32::MAX;
        let mut along = 0.0f32;
        for i in 0..pts.len() - 1 {
            let (d2, t) = project_onto_segment(pos, pts[i], pts[i + 1]);
            if d2 < best_d2 {
                best_d2 = d2;
                along = cum[i] + t * (cum[i + 1] - cum[i]);
            }
        }

        let target = (along + distance_m).clamp(0.0, total);
        if target >= total {
            let (wp, arrow) = pairs[pairs.len() - 1];
            return (pts[pts.len() - 1], wp, arrow);
        }

        // Segment containing `target`: largest i with cum[i] <= target.
        let i = cum.partition_point(|&c| c <= target) - 1;
        let seg_len = cum[i + 1] - cum[i];
        let t = if seg_len > 0.0 { (target - cum[i]) / seg_len } else { 0.0 };
        let p = pts[i].lerp(pts[i + 1], t);

        // Last waypoint passed is pairs[i]; the occupied segment enters
        // pairs[i + 1], whose arrow is the one the vehicle is on.
        (p, pairs[i].0, pairs[i + 1].1)
    }

    // ── Internal ──────────────────────────────────────────────────────────

    /// Travel-ordered `(waypoint, arrow)` pairs of `route`, clipped to
    /// `[start, goal]`.  Each waypoint is paired with the arrow of the
    /// segment entering it (the first waypoint with the first arrow).
    fn waypoints_with_arrows(&self, route: &Route) -> Vec<(WaypointId, ArrowId)> {
        let mut out: Vec<(WaypointId, ArrowId)> = Vec::new();
        for (k, &arrow) in route.arrows.iter().enumerate() {
            let wps = self.arrow_waypoint_ids(arrow);
            let begin = if k == 0 {
                // Clip everything before the entry waypoint.
                match wps.iter().position(|&w| w == route.start) {
                    Some(i) => i,
                    None => 0,
                }
            } else {
                // Junction waypoint already contributed by the previous arrow.
                1
            };
            out.extend(wps[begin..].iter().map(|&wp| (wp, arrow)));
        }

        // Clip everything past the goal (it may sit mid-arrow).
        if let Some(end) = out.iter().rposition(|&(wp, _)| wp == route.goal) {
            out.truncate(end + 1);
        }
        out
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Project `p` onto segment `ab`.  Returns the squared perpendicular distance
/// and the clamped parameter `t ∈ [0, 1]` along the segment.
fn project_onto_segment(p: Point, a: Point, b: Point) -> (f32, f32) {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let q = a.lerp(b, t);
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    (dx * dx + dy * dy, t)
}
