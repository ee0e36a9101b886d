//! Core schedule types: `LegAction`, `TimeWindow`, `ScheduleLeg`, `Schedule`.

use std::collections::VecDeque;

use av_core::{RouteCode, Timestamp};

// ── LegAction ─────────────────────────────────────────────────────────────────

/// What a vehicle does during one schedule leg.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LegAction {
    /// Drive the leg's sub-route to its goal waypoint.
    Move,
    /// Hold position until the leg's window ends.
    Wait,
}

// ── TimeWindow ────────────────────────────────────────────────────────────────

/// The wall-clock window of one leg.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end:   Timestamp,
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Window length in seconds.
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.end - self.start
    }

    /// The same window moved `drift_secs` later (earlier if negative).
    #[inline]
    pub fn shifted_by(&self, drift_secs: f64) -> TimeWindow {
        TimeWindow {
            start: self.start + drift_secs,
            end:   self.end + drift_secs,
        }
    }
}

// ── ScheduleLeg ───────────────────────────────────────────────────────────────

/// One planned activity: an action, the sub-route it concerns, and the
/// wall-clock window it is planned for.
///
/// `Wait` legs still carry a route — its goal waypoint is where the vehicle
/// is expected to hold.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleLeg {
    pub action: LegAction,
    pub route:  RouteCode,
    pub window: TimeWindow,
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// An ordered leg sequence, earliest first, consumed strictly from the front.
///
/// The schedule is owned exclusively by its vehicle agent; nothing else
/// mutates it.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    legs: VecDeque<ScheduleLeg>,
}

impl Schedule {
    /// Build a schedule from legs in planned order.
    pub fn new(legs: impl Into<VecDeque<ScheduleLeg>>) -> Self {
        Self { legs: legs.into() }
    }

    /// A schedule with no legs.  An agent holding one takes no action.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// The leg currently being executed, if any.
    #[inline]
    pub fn front(&self) -> Option<&ScheduleLeg> {
        self.legs.front()
    }

    /// Read-only iterator over the remaining legs in planned order.
    pub fn legs(&self) -> impl Iterator<Item = &ScheduleLeg> {
        self.legs.iter()
    }

    /// Append a leg at the back of the plan.
    pub fn push_back(&mut self, leg: ScheduleLeg) {
        self.legs.push_back(leg);
    }

    // ── Drift re-anchoring ────────────────────────────────────────────────

    /// Shift every remaining leg's window — the front included — by
    /// `drift_secs`, preserving order, count, and each window's duration.
    pub fn shift_by(&mut self, drift_secs: f64) {
        for leg in &mut self.legs {
            leg.window = leg.window.shifted_by(drift_secs);
        }
    }

    /// Drop the completed front leg and re-anchor the rest of the plan to
    /// `now`: the new front leg's window is moved to start exactly at `now`,
    /// and every later leg shifts by the same drift.
    ///
    /// The drift is negative when the leg finished ahead of plan; later legs
    /// then pull forward.  Returns the discarded leg, or `None` if the
    /// schedule was already empty (nothing changes in that case).
    pub fn finish_front(&mut self, now: Timestamp) -> Option<ScheduleLeg> {
        let done = self.legs.pop_front()?;
        if let Some(front) = self.legs.front() {
            let drift_secs = now - front.window.start;
            self.shift_by(drift_secs);
        }
        Some(done)
    }
}

impl From<Vec<ScheduleLeg>> for Schedule {
    fn from(legs: Vec<ScheduleLeg>) -> Self {
        Self { legs: legs.into() }
    }
}
