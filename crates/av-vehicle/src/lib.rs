//! `av-vehicle` — the motion-control core of the `rust_av` framework.
//!
//! # What one agent does every tick
//!
//! ```text
//! update_status(map, now)
//! ├─ STOP: front leg MOVE            → phase MOVE
//! │        front leg WAIT, expired,
//! │        more legs behind it       → drop leg, re-anchor plan, phase MOVE
//! └─ MOVE: movable ← motion planner (hazard distances − safety margins)
//!          step ← min(velocity · dt, movable); advance pose if step > 0
//!          velocity ← velocity controller (limit-capped ramp)
//!          goal waypoint reached     → snap pose, drop leg, re-anchor, STOP
//! ```
//!
//! Status ingestion runs between ticks: [`VehicleAgent::observe`] overwrites
//! the per-peer and per-signal observation tables from decoded broadcasts and
//! is the only writer of either.  The hazard evaluator reads them; nothing
//! expires them.
//!
//! # Modules
//!
//! | Module   | Contents                                                 |
//! |----------|----------------------------------------------------------|
//! | `agent`  | [`VehicleAgent`]: state, ingestion, phase state machine  |
//! | `hazard` | Pure hazard-distance evaluators                          |
//! | `motion` | Monitored routes, movable distance, velocity controller  |
//! | `error`  | [`AgentError`]                                           |

pub mod agent;
pub mod error;
pub mod hazard;
pub mod motion;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::VehicleAgent;
pub use error::{AgentError, AgentResult};
pub use hazard::{inter_signal_distance, inter_vehicle_distance};
