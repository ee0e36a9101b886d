//! Simulation time model.
//!
//! # Design
//!
//! Schedule windows are anchored to wall-clock time (Unix seconds), because
//! a vehicle's plan is coordinated with external parties that live on wall
//! time.  The simulation itself advances in fixed-interval ticks; `SimClock`
//! holds the mapping:
//!
//!   now = start_unix_secs + current_tick * tick_interval_secs
//!
//! Nothing in the framework ever reads the host clock — `now` is always
//! computed from the tick counter and passed down explicitly, so every
//! transition is reproducible from `(state, now)` alone.

use std::fmt;

// ── Timestamp ─────────────────────────────────────────────────────────────────

/// A wall-clock instant in Unix seconds.
///
/// Stored as `f64`: schedule arithmetic needs sub-second resolution and Unix
/// epochs exceed `f32` precision by six orders of magnitude.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub f64);

impl Timestamp {
    /// Seconds elapsed from `earlier` to `self`.  Negative if `self` is
    /// before `earlier`.
    #[inline]
    pub fn since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<f64> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, secs: f64) -> Timestamp {
        Timestamp(self.0 + secs)
    }
}

impl std::ops::Sub for Timestamp {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: Timestamp) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{:.3}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and wall-clock seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: f64,
    /// How many real seconds one tick represents.  Default: 1.0.
    pub tick_interval_secs: f32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: u64,
}

impl SimClock {
    /// Create a clock starting at `start_unix_secs` with the given resolution.
    pub fn new(start_unix_secs: f64, tick_interval_secs: f32) -> Self {
        Self {
            start_unix_secs,
            tick_interval_secs,
            current_tick: 0,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick += 1;
    }

    /// The wall-clock instant corresponding to `current_tick`.
    #[inline]
    pub fn now(&self) -> Timestamp {
        Timestamp(self.start_unix_secs + self.current_tick as f64 * self.tick_interval_secs as f64)
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick as f64 * self.tick_interval_secs as f64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {} ({})", self.current_tick, self.now())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built by the host application and passed to the simulation
/// runner.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Unix timestamp for tick 0.
    pub start_unix_secs: f64,

    /// Seconds per tick.  Every vehicle's motion step and velocity ramp use
    /// this interval; it must match the `dt` the agents were built with.
    pub tick_interval_secs: f32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Call the snapshot observer hook every N ticks.  1 = every tick;
    /// 0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> u64 {
        self.total_ticks
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.tick_interval_secs)
    }
}
