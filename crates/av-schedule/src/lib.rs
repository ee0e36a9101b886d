//! `av-schedule` — multi-leg vehicle schedules for the `rust_av` framework.
//!
//! # Leg model
//!
//! A vehicle's plan is an ordered sequence of [`ScheduleLeg`]s, earliest
//! first.  Each leg is one activity — drive a sub-route (`Move`) or hold
//! position (`Wait`) — inside a wall-clock [`TimeWindow`].  Legs are consumed
//! strictly from the front and never reordered; the only in-place mutation is
//! the drift re-anchoring performed when a leg completes, which shifts every
//! remaining window forward (or backward) by the same amount so the new front
//! leg starts exactly when the previous one finished.
//!
//! # Modules
//!
//! | Module   | Contents                                        |
//! |----------|-------------------------------------------------|
//! | `leg`    | [`LegAction`], [`TimeWindow`], [`ScheduleLeg`], [`Schedule`] |
//! | `loader` | CSV loading of per-vehicle schedules            |
//! | `error`  | [`ScheduleError`]                               |

pub mod error;
pub mod leg;
pub mod loader;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ScheduleError, ScheduleResult};
pub use leg::{LegAction, Schedule, ScheduleLeg, TimeWindow};
pub use loader::{load_schedules_csv, load_schedules_reader};
