//! `av-map` — road network and route geometry for the `rust_av` framework.
//!
//! # Data model
//!
//! The network is a set of **waypoints** (point locations carrying a posted
//! speed limit) connected by **arrows** — directed road segments traced by an
//! ordered waypoint sequence of length ≥ 2.  Consecutive arrows share their
//! junction waypoint: the last waypoint of one arrow is the first waypoint of
//! the next.
//!
//! A [`Route`] strings arrows together from a start waypoint to a goal
//! waypoint.  All distance, slicing, and advancement queries a vehicle's
//! motion planner needs are methods on [`RoadMap`]; see `route.rs`.
//!
//! # Modules
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | `map`     | [`RoadMap`], [`RoadMapBuilder`], spatial index    |
//! | `route`   | [`Route`] and the geometry query methods          |
//! | `error`   | [`MapError`]                                      |

pub mod error;
pub mod map;
pub mod route;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{MapError, MapResult};
pub use map::{RoadMap, RoadMapBuilder};
pub use route::Route;
