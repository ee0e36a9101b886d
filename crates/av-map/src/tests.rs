//! Unit tests for av-map.

use av_core::{ArrowId, Point, WaypointId};

use crate::{MapError, RoadMap, RoadMapBuilder, Route};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// A straight two-arrow corridor along the x axis, waypoints every 10 m:
///
/// ```text
/// w0 ──► w1 ──► w2 ──► w3 ──► w4        arrow 0: w0..w2, arrow 1: w2..w4
/// x=0    10     20     30     40
/// ```
fn corridor() -> RoadMap {
    let mut b = RoadMapBuilder::new();
    let wps: Vec<WaypointId> = (0..5)
        .map(|i| b.add_waypoint(Point::new(i as f32 * 10.0, 0.0), 8.3))
        .collect();
    b.add_arrow(vec![wps[0], wps[1], wps[2]]).unwrap();
    b.add_arrow(vec![wps[2], wps[3], wps[4]]).unwrap();
    b.build()
}

fn full_route(map: &RoadMap) -> Route {
    map.route(WaypointId(0), WaypointId(4), vec![ArrowId(0), ArrowId(1)])
        .unwrap()
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn dimensions_and_csr_slices() {
        let map = corridor();
        assert_eq!(map.waypoint_count(), 5);
        assert_eq!(map.arrow_count(), 2);
        assert_eq!(
            map.arrow_waypoint_ids(ArrowId(0)),
            &[WaypointId(0), WaypointId(1), WaypointId(2)]
        );
        assert_eq!(
            map.arrow_waypoint_ids(ArrowId(1)),
            &[WaypointId(2), WaypointId(3), WaypointId(4)]
        );
    }

    #[test]
    fn rejects_short_arrow() {
        let mut b = RoadMapBuilder::new();
        let w = b.add_waypoint(Point::new(0.0, 0.0), 5.0);
        assert!(matches!(b.add_arrow(vec![w]), Err(MapError::ArrowTooShort(1))));
    }

    #[test]
    fn rejects_unknown_waypoint() {
        let mut b = RoadMapBuilder::new();
        let w = b.add_waypoint(Point::new(0.0, 0.0), 5.0);
        let err = b.add_arrow(vec![w, WaypointId(9)]);
        assert!(matches!(err, Err(MapError::UnknownWaypoint(WaypointId(9)))));
    }

    #[test]
    fn empty_map() {
        let map = RoadMap::empty();
        assert!(map.is_empty());
        assert_eq!(map.arrow_count(), 0);
        assert!(map.nearest_waypoint(Point::new(0.0, 0.0)).is_none());
    }
}

// ── Waypoint and arrow queries ────────────────────────────────────────────────

#[cfg(test)]
mod queries {
    use super::*;

    #[test]
    fn nearest_waypoint_snaps() {
        let map = corridor();
        assert_eq!(map.nearest_waypoint(Point::new(11.0, 2.0)), Some(WaypointId(1)));
        assert_eq!(map.nearest_waypoint(Point::new(38.0, -1.0)), Some(WaypointId(4)));
    }

    #[test]
    fn containing_arrow_prefers_first() {
        let map = corridor();
        assert_eq!(map.containing_arrow(WaypointId(0)), Some(ArrowId(0)));
        // Junction waypoint is on both arrows; the first one wins.
        assert_eq!(map.containing_arrow(WaypointId(2)), Some(ArrowId(0)));
        assert_eq!(map.containing_arrow(WaypointId(3)), Some(ArrowId(1)));
    }

    #[test]
    fn yaw_points_along_travel_direction() {
        let map = corridor();
        assert_eq!(map.yaw(ArrowId(0), WaypointId(0)), Some(0.0));
        // Last waypoint keeps the final segment's heading.
        assert_eq!(map.yaw(ArrowId(1), WaypointId(4)), Some(0.0));
        // Not on this arrow.
        assert_eq!(map.yaw(ArrowId(1), WaypointId(0)), None);
    }

    #[test]
    fn speed_limit_lookup() {
        let map = corridor();
        assert_eq!(map.speed_limit(WaypointId(3)), 8.3);
    }
}

// ── Route construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod routes {
    use super::*;

    #[test]
    fn validates_endpoints_and_connectivity() {
        let map = corridor();
        assert!(full_route(&map).arrows.len() == 2);

        // Start not on first arrow.
        let err = map.route(WaypointId(3), WaypointId(4), vec![ArrowId(0), ArrowId(1)]);
        assert!(matches!(err, Err(MapError::WaypointNotOnArrow { .. })));

        // Goal not on last arrow.
        let err = map.route(WaypointId(0), WaypointId(3), vec![ArrowId(0)]);
        assert!(matches!(err, Err(MapError::WaypointNotOnArrow { .. })));

        // No arrows at all.
        assert!(matches!(
            map.route(WaypointId(0), WaypointId(0), vec![]),
            Err(MapError::EmptyRoute)
        ));
    }

    #[test]
    fn rejects_disconnected_arrows() {
        let mut b = RoadMapBuilder::new();
        let w: Vec<WaypointId> = (0..4)
            .map(|i| b.add_waypoint(Point::new(i as f32, 0.0), 5.0))
            .collect();
        b.add_arrow(vec![w[0], w[1]]).unwrap();
        b.add_arrow(vec![w[2], w[3]]).unwrap(); // does not start at w1
        let map = b.build();
        let err = map.route(w[0], w[3], vec![ArrowId(0), ArrowId(1)]);
        assert!(matches!(err, Err(MapError::DisconnectedArrows { .. })));
    }

    #[test]
    fn waypoint_sequence_dedups_junction() {
        let map = corridor();
        let route = full_route(&map);
        let wps = map.route_waypoint_ids(&route);
        assert_eq!(
            wps,
            (0..5).map(WaypointId).collect::<Vec<_>>(),
            "junction w2 must appear exactly once"
        );
    }

    #[test]
    fn waypoint_sequence_clips_to_start_and_goal() {
        let map = corridor();
        // Start mid-arrow, goal mid-arrow.
        let route = map
            .route(WaypointId(1), WaypointId(3), vec![ArrowId(0), ArrowId(1)])
            .unwrap();
        let wps = map.route_waypoint_ids(&route);
        assert_eq!(wps, vec![WaypointId(1), WaypointId(2), WaypointId(3)]);
    }

    #[test]
    fn lengths_and_prefix_distances() {
        let map = corridor();
        let route = full_route(&map);
        assert_eq!(map.route_length(&route), 40.0);
        let wps = map.route_waypoint_ids(&route);
        assert_eq!(map.distance_of_waypoints(&wps[..3]), 20.0);
        assert_eq!(map.distance_of_waypoints(&wps[..1]), 0.0);
    }
}

// ── Slicing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod slicing {
    use super::*;

    #[test]
    fn bound_between_waypoints_keeps_last_within() {
        let map = corridor();
        let route = full_route(&map);
        // 25 m reaches w2 (20 m) but not w3 (30 m).
        let sliced = map.sliced_route(&route, 25.0).unwrap();
        assert_eq!(sliced.goal, WaypointId(2));
        assert_eq!(sliced.arrows, vec![ArrowId(0)]);
        assert_eq!(map.route_length(&sliced), 20.0);
    }

    #[test]
    fn bound_exactly_on_waypoint_includes_it() {
        let map = corridor();
        let route = full_route(&map);
        let sliced = map.sliced_route(&route, 30.0).unwrap();
        assert_eq!(sliced.goal, WaypointId(3));
        assert_eq!(sliced.arrows, vec![ArrowId(0), ArrowId(1)]);
    }

    #[test]
    fn generous_bound_returns_whole_route() {
        let map = corridor();
        let route = full_route(&map);
        let sliced = map.sliced_route(&route, 500.0).unwrap();
        assert_eq!(sliced, route);
    }

    #[test]
    fn non_positive_or_too_tight_bound_is_none() {
        let map = corridor();
        let route = full_route(&map);
        assert!(map.sliced_route(&route, 0.0).is_none());
        assert!(map.sliced_route(&route, -3.0).is_none());
        // 5 m does not reach the first next waypoint at 10 m.
        assert!(map.sliced_route(&route, 5.0).is_none());
    }
}

// ── Advancement ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod advancement {
    use super::*;

    #[test]
    fn step_within_one_segment() {
        let map = corridor();
        let route = full_route(&map);
        let (pos, wp, arrow) = map.moved_position(Point::new(0.0, 0.0), 4.0, &route);
        assert_eq!(pos, Point::new(4.0, 0.0));
        assert_eq!(wp, WaypointId(0), "no waypoint passed yet");
        assert_eq!(arrow, ArrowId(0));
    }

    #[test]
    fn step_across_waypoints_updates_last_passed() {
        let map = corridor();
        let route = full_route(&map);
        let (pos, wp, arrow) = map.moved_position(Point::new(4.0, 0.0), 12.0, &route);
        assert_eq!(pos, Point::new(16.0, 0.0));
        assert_eq!(wp, WaypointId(1));
        assert_eq!(arrow, ArrowId(0));
    }

    #[test]
    fn crossing_the_junction_changes_arrow() {
        let map = corridor();
        let route = full_route(&map);
        let (pos, wp, arrow) = map.moved_position(Point::new(16.0, 0.0), 9.0, &route);
        assert_eq!(pos, Point::new(25.0, 0.0));
        assert_eq!(wp, WaypointId(2));
        assert_eq!(arrow, ArrowId(1), "segment past the junction belongs to arrow 1");
    }

    #[test]
    fn clamps_at_route_goal() {
        let map = corridor();
        let route = full_route(&map);
        let (pos, wp, arrow) = map.moved_position(Point::new(35.0, 0.0), 50.0, &route);
        assert_eq!(pos, Point::new(40.0, 0.0));
        assert_eq!(wp, WaypointId(4));
        assert_eq!(arrow, ArrowId(1));
    }

    #[test]
    fn landing_exactly_on_a_waypoint_passes_it() {
        let map = corridor();
        let route = full_route(&map);
        let (pos, wp, _) = map.moved_position(Point::new(0.0, 0.0), 10.0, &route);
        assert_eq!(pos, Point::new(10.0, 0.0));
        assert_eq!(wp, WaypointId(1));
    }

    #[test]
    fn off_axis_position_projects_onto_route() {
        let map = corridor();
        let route = full_route(&map);
        // 1 m beside the corridor at x=12: projects to s=12, advance 3 → 15.
        let (pos, wp, _) = map.moved_position(Point::new(12.0, 1.0), 3.0, &route);
        assert_eq!(pos, Point::new(15.0, 0.0));
        assert_eq!(wp, WaypointId(1));
    }
}
