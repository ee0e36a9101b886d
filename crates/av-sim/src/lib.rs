//! `av-sim` — lock-step simulation host for the `rust_av` framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Signals  — controllers advance their light cycles and publish status.
//!   ② Deliver  — drain the status bus, decode each broadcast once, hand it
//!                to every agent's observation tables (decode failures are
//!                dropped and debug-logged).
//!   ③ Update   — every agent runs its phase state machine at clock.now()
//!                (parallel with the `parallel` feature; agents are disjoint).
//!   ④ Publish  — every agent's status snapshot goes onto the bus, to be
//!                delivered at the start of the next tick.
//! ```
//!
//! Message delivery and the per-tick update never overlap for one agent —
//! that is the single-writer discipline the motion core requires.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                            |
//! |------------|---------------------------------------------------|
//! | `parallel` | Runs the update phase on Rayon's thread pool.     |

pub mod builder;
pub mod bus;
pub mod error;
pub mod logging;
pub mod observer;
pub mod signal;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use bus::StatusBus;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use signal::SignalController;
pub use sim::Sim;
