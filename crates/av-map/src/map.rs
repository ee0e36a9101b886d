//! Road map representation and builder.
//!
//! # Data layout
//!
//! Arrows are stored in **Compressed Sparse Row (CSR)** form: given an
//! `ArrowId a`, its waypoint sequence occupies the slice
//!
//! ```text
//! arrow_wp_ids[ arrow_wp_start[a] .. arrow_wp_start[a+1] ]
//! ```
//!
//! Per-waypoint data (`waypoint_pos`, `waypoint_speed_limit`) is indexed by
//! `WaypointId`.  Iterating an arrow's waypoints is a contiguous memory scan,
//! which is what the hazard evaluator's inner loops do every tick.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(x, y)` to the nearest `WaypointId`.  Used
//! when spawning a vehicle from a raw site position rather than a known
//! waypoint.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use av_core::{ArrowId, Point, WaypointId};

use crate::{MapError, MapResult};

// ── R-tree waypoint entry ─────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, y]` point with the
/// associated `WaypointId`.
#[derive(Clone)]
struct WaypointEntry {
    point: [f32; 2],
    id: WaypointId,
}

impl RTreeObject for WaypointEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for WaypointEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RoadMap ───────────────────────────────────────────────────────────────────

/// The road network: waypoint arrays, arrow polylines in CSR form, and a
/// spatial index for waypoint snapping.
///
/// Do not construct directly; use [`RoadMapBuilder`].
pub struct RoadMap {
    // ── Waypoint data ─────────────────────────────────────────────────────
    /// Site position of each waypoint.  Indexed by `WaypointId`.
    pub waypoint_pos: Vec<Point>,

    /// Posted speed limit at each waypoint, in m/s.
    pub waypoint_speed_limit: Vec<f32>,

    // ── CSR arrow polylines ───────────────────────────────────────────────
    /// CSR row pointer.  Waypoints of arrow `a` are at
    /// `arrow_wp_ids[arrow_wp_start[a] .. arrow_wp_start[a+1]]`.
    /// Length = `arrow_count + 1`.
    arrow_wp_start: Vec<u32>,

    /// Flattened waypoint sequences of all arrows, in arrow order.
    arrow_wp_ids: Vec<WaypointId>,

    /// First arrow whose sequence contains each waypoint;
    /// `ArrowId::INVALID` for waypoints no arrow references.
    waypoint_arrow: Vec<ArrowId>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<WaypointEntry>,
}

impl RoadMap {
    /// Construct an empty map with no waypoints or arrows.
    ///
    /// Any route request against an empty map fails; useful only as a
    /// placeholder.
    pub fn empty() -> Self {
        RoadMapBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn waypoint_count(&self) -> usize {
        self.waypoint_pos.len()
    }

    pub fn arrow_count(&self) -> usize {
        self.arrow_wp_start.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.waypoint_pos.is_empty()
    }

    // ── Waypoint queries ──────────────────────────────────────────────────

    /// Canonical site position of `waypoint`.
    #[inline]
    pub fn position(&self, waypoint: WaypointId) -> Point {
        self.waypoint_pos[waypoint.index()]
    }

    /// Posted speed limit at `waypoint`, in m/s.
    #[inline]
    pub fn speed_limit(&self, waypoint: WaypointId) -> f32 {
        self.waypoint_speed_limit[waypoint.index()]
    }

    /// An arrow whose sequence contains `waypoint`, or `None` if no arrow
    /// references it.  When several do, the lowest-numbered arrow wins.
    pub fn containing_arrow(&self, waypoint: WaypointId) -> Option<ArrowId> {
        match self.waypoint_arrow.get(waypoint.index()) {
            Some(&a) if a != ArrowId::INVALID => Some(a),
            _ => None,
        }
    }

    // ── Arrow queries ─────────────────────────────────────────────────────

    /// Ordered waypoint sequence of `arrow`.
    ///
    /// This is a contiguous CSR slice — no heap allocation.
    #[inline]
    pub fn arrow_waypoint_ids(&self, arrow: ArrowId) -> &[WaypointId] {
        let start = self.arrow_wp_start[arrow.index()] as usize;
        let end   = self.arrow_wp_start[arrow.index() + 1] as usize;
        &self.arrow_wp_ids[start..end]
    }

    /// Heading at `waypoint` while traversing `arrow`, in radians.
    ///
    /// Points toward the next waypoint on the arrow; at the arrow's last
    /// waypoint it keeps the direction of the final segment.  `None` if
    /// `waypoint` is not on `arrow`.
    pub fn yaw(&self, arrow: ArrowId, waypoint: WaypointId) -> Option<f32> {
        let wps = self.arrow_waypoint_ids(arrow);
        let i = wps.iter().position(|&w| w == waypoint)?;
        let (from, to) = if i + 1 < wps.len() {
            (wps[i], wps[i + 1])
        } else {
            (wps[i - 1], wps[i])
        };
        Some(self.position(from).heading_to(self.position(to)))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The `WaypointId` nearest to `pos`.
    ///
    /// Returns `None` only if the map has no waypoints.
    pub fn nearest_waypoint(&self, pos: Point) -> Option<WaypointId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| e.id)
    }
}

// ── RoadMapBuilder ────────────────────────────────────────────────────────────

/// Construct a [`RoadMap`] incrementally, then call [`build`](Self::build).
///
/// Waypoints must be added before the arrows that reference them; `add_arrow`
/// validates waypoint ids eagerly so `build()` is infallible.
///
/// # Example
///
/// ```
/// use av_core::Point;
/// use av_map::RoadMapBuilder;
///
/// let mut b = RoadMapBuilder::new();
/// let w0 = b.add_waypoint(Point::new(0.0, 0.0), 8.3);
/// let w1 = b.add_waypoint(Point::new(25.0, 0.0), 8.3);
/// b.add_arrow(vec![w0, w1]).unwrap();
/// let map = b.build();
/// assert_eq!(map.waypoint_count(), 2);
/// assert_eq!(map.arrow_count(), 1);
/// ```
pub struct RoadMapBuilder {
    positions:    Vec<Point>,
    speed_limits: Vec<f32>,
    arrows:       Vec<Vec<WaypointId>>,
}

impl RoadMapBuilder {
    pub fn new() -> Self {
        Self {
            positions:    Vec::new(),
            speed_limits: Vec::new(),
            arrows:       Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of waypoints and arrows.
    pub fn with_capacity(waypoints: usize, arrows: usize) -> Self {
        Self {
            positions:    Vec::with_capacity(waypoints),
            speed_limits: Vec::with_capacity(waypoints),
            arrows:       Vec::with_capacity(arrows),
        }
    }

    /// Add a waypoint and return its `WaypointId` (sequential from 0).
    pub fn add_waypoint(&mut self, pos: Point, speed_limit_mps: f32) -> WaypointId {
        let id = WaypointId(self.positions.len() as u32);
        self.positions.push(pos);
        self.speed_limits.push(speed_limit_mps);
        id
    }

    /// Add a directed arrow traced by `waypoints` (travel order).
    ///
    /// Requires at least two waypoints, all previously added.
    pub fn add_arrow(&mut self, waypoints: Vec<WaypointId>) -> MapResult<ArrowId> {
        if waypoints.len() < 2 {
            return Err(MapError::ArrowTooShort(waypoints.len()));
        }
        if let Some(&bad) = waypoints.iter().find(|w| w.index() >= self.positions.len()) {
            return Err(MapError::UnknownWaypoint(bad));
        }
        let id = ArrowId(self.arrows.len() as u32);
        self.arrows.push(waypoints);
        Ok(id)
    }

    pub fn waypoint_count(&self) -> usize {
        self.positions.len()
    }

    pub fn arrow_count(&self) -> usize {
        self.arrows.len()
    }

    /// Consume the builder and produce a [`RoadMap`].
    ///
    /// Time complexity: O(W log W) for the R-tree bulk load plus O(total
    /// arrow waypoints) for the CSR arrays.
    pub fn build(self) -> RoadMap {
        let waypoint_count = self.positions.len();

        // Build CSR row pointer and flat waypoint array.
        let mut arrow_wp_start = Vec::with_capacity(self.arrows.len() + 1);
        let mut arrow_wp_ids = Vec::new();
        arrow_wp_start.push(0u32);
        for wps in &self.arrows {
            arrow_wp_ids.extend_from_slice(wps);
            arrow_wp_start.push(arrow_wp_ids.len() as u32);
        }

        // Reverse index: first arrow referencing each waypoint.
        let mut waypoint_arrow = vec![ArrowId::INVALID; waypoint_count];
        for (a, wps) in self.arrows.iter().enumerate() {
            for &wp in wps {
                if waypoint_arrow[wp.index()] == ArrowId::INVALID {
                    waypoint_arrow[wp.index()] = ArrowId(a as u32);
                }
            }
        }

        // Bulk-load R-tree for O(W log W) construction (faster than W inserts).
        let entries: Vec<WaypointEntry> = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| WaypointEntry {
                point: [pos.x, pos.y],
                id: WaypointId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadMap {
            waypoint_pos: self.positions,
            waypoint_speed_limit: self.speed_limits,
            arrow_wp_start,
            arrow_wp_ids,
            waypoint_arrow,
            spatial_idx,
        }
    }
}

impl Default for RoadMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
