//! Synthetic 200 m corridor with a signalized junction at the 120 m mark.

use av_core::{ArrowId, Point, WaypointId};
use av_map::{RoadMap, RoadMapBuilder};

/// Waypoint spacing in metres.
pub const SPACING_M: f32 = 5.0;

/// Speed limit on the approach (arrow 0).
pub const APPROACH_LIMIT_MPS: f32 = 8.3; // ~30 km/h

/// Speed limit past the junction (arrow 1).
pub const EXIT_LIMIT_MPS: f32 = 11.1; // ~40 km/h

/// The junction waypoint — also the signal's stop line.
pub const JUNCTION: WaypointId = WaypointId(24);

pub const APPROACH: ArrowId = ArrowId(0);
pub const EXIT: ArrowId = ArrowId(1);

/// Build the corridor: waypoints every 5 m along the x axis,
/// arrow 0 = w0..w24 (0–120 m), arrow 1 = w24..w40 (120–200 m).
pub fn build_map() -> RoadMap {
    let mut b = RoadMapBuilder::with_capacity(41, 2);
    let wps: Vec<WaypointId> = (0..=40)
        .map(|i| {
            let limit = if i <= JUNCTION.0 { APPROACH_LIMIT_MPS } else { EXIT_LIMIT_MPS };
            b.add_waypoint(Point::new(i as f32 * SPACING_M, 0.0), limit)
        })
        .collect();
    b.add_arrow(wps[0..=24].to_vec()).expect("approach arrow");
    b.add_arrow(wps[24..=40].to_vec()).expect("exit arrow");
    b.build()
}
