//! Hazard-distance evaluators.
//!
//! Both evaluators are pure functions of the monitored route and the
//! observation tables: no mutation, no I/O.  "No hazard found" is `None`,
//! which downstream logic treats as "does not constrain" — there is no
//! float-max sentinel.

use rustc_hash::FxHashMap;

use av_core::{RouteCode, VehicleId, WaypointId};
use av_map::{RoadMap, Route};
use av_msg::{TrafficSignalStatusMsg, VehicleStatusMsg};

/// Along-route distance to the nearest peer vehicle on `monitored`.
///
/// Walks the monitored route's waypoints in travel order and stops at the
/// first one some peer last reported as its own.  The agent's current
/// waypoint is included in the walk: a peer sitting on it yields distance 0.
pub fn inter_vehicle_distance(
    map:       &RoadMap,
    monitored: &Route,
    peers:     &FxHashMap<VehicleId, VehicleStatusMsg>,
) -> Option<f32> {
    if peers.is_empty() {
        return None;
    }
    let waypoint_ids = map.route_waypoint_ids(monitored);
    for (i, wp) in waypoint_ids.iter().enumerate() {
        if peers.values().any(|peer| peer.waypoint == *wp) {
            return Some(map.distance_of_waypoints(&waypoint_ids[..=i]));
        }
    }
    None
}

/// Along-route distance to the stop line of the nearest non-green signal on
/// `monitored`.
///
/// A signal blocks when its governed entry arrow appears in the monitored
/// arrow sequence and the agent has not already passed the stop-line waypoint
/// on that arrow (`own_waypoint` order comparison).  The first blocking arrow
/// in travel order wins; two signals governing the same arrow resolve in
/// table iteration order.
pub fn inter_signal_distance(
    map:          &RoadMap,
    monitored:    &Route,
    own_waypoint: WaypointId,
    signals:      &FxHashMap<RouteCode, TrafficSignalStatusMsg>,
) -> Option<f32> {
    let blocking: Vec<&RouteCode> = signals
        .values()
        .filter(|s| !s.state.is_passable())
        .map(|s| &s.route_code)
        .collect();
    if blocking.is_empty() {
        return None;
    }

    for (i, &arrow) in monitored.arrows.iter().enumerate() {
        for code in &blocking {
            if !code.arrows.contains(&arrow) || code.governed_arrow() != arrow {
                continue;
            }

            // Skip a stop line the agent is already beyond on this arrow.
            let wp_ids = map.arrow_waypoint_ids(arrow);
            let Some(stop_idx) = wp_ids.iter().position(|&w| w == code.start) else {
                continue; // stop line not on its own governed arrow: ignore
            };
            let own_idx = wp_ids.iter().position(|&w| w == own_waypoint);
            if own_idx.is_some_and(|own| own > stop_idx) {
                continue;
            }

            // Truncate the monitored route at the stop line.
            let truncated =
                map.route(monitored.start, code.start, monitored.arrows[..=i].to_vec());
            let Ok(truncated) = truncated else {
                continue;
            };
            return Some(map.route_length(&truncated));
        }
    }
    None
}
