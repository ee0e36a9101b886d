//! `av-core` — foundational types for the `rust_av` vehicle simulation
//! framework.
//!
//! This crate is a dependency of every other `av-*` crate.  It intentionally
//! has no `av-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`ids`]        | `VehicleId`, `WaypointId`, `ArrowId`                  |
//! | [`geo`]        | `Point`, Euclidean distance, heading                  |
//! | [`time`]       | `Timestamp`, `SimClock`, `SimConfig`                  |
//! | [`route_code`] | `RouteCode` — the textual sub-route encoding          |
//! | [`phase`]      | `Phase` (STOP / MOVE)                                 |
//! | [`error`]      | `AvError`, `AvResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `av-msg`.                                      |

pub mod error;
pub mod geo;
pub mod ids;
pub mod phase;
pub mod route_code;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{AvError, AvResult};
pub use geo::Point;
pub use ids::{ArrowId, VehicleId, WaypointId};
pub use phase::Phase;
pub use route_code::RouteCode;
pub use time::{SimClock, SimConfig, Timestamp};
