//! `SignalController` — a cycling traffic signal publishing its state.

use av_core::{RouteCode, Timestamp};
use av_msg::{SignalState, TrafficSignalStatusMsg};

use crate::{SimError, SimResult};

/// Drives one traffic signal through a fixed light cycle and decides when a
/// status broadcast is due.
///
/// A status is published whenever the light changes and additionally every
/// `republish_interval_secs`, so late-joining vehicles converge on the
/// current state without a request channel.
pub struct SignalController {
    /// The governed stretch: entry arrow + stop-line waypoint.
    route_code: RouteCode,
    /// The light cycle as `(state, duration_secs)` entries, looped forever.
    cycle: Vec<(SignalState, f64)>,
    cycle_idx: usize,
    /// When the current cycle entry began.
    entered_at: Timestamp,
    last_published: Option<Timestamp>,
    republish_interval_secs: f64,
}

impl SignalController {
    /// Default gap between repeat broadcasts of an unchanged state.
    pub const DEFAULT_REPUBLISH_SECS: f64 = 10.0;

    /// Create a controller starting on the first cycle entry at `started_at`.
    ///
    /// The cycle must be non-empty with strictly positive durations.
    pub fn new(
        route_code: RouteCode,
        cycle: Vec<(SignalState, f64)>,
        started_at: Timestamp,
    ) -> SimResult<Self> {
        if cycle.is_empty() {
            return Err(SimError::Config("signal cycle must not be empty".into()));
        }
        if cycle.iter().any(|&(_, d)| d <= 0.0) {
            return Err(SimError::Config(
                "signal cycle durations must be positive".into(),
            ));
        }
        Ok(Self {
            route_code,
            cycle,
            cycle_idx: 0,
            entered_at: started_at,
            last_published: None,
            republish_interval_secs: Self::DEFAULT_REPUBLISH_SECS,
        })
    }

    /// Override the repeat-broadcast interval.
    pub fn with_republish_interval(mut self, secs: f64) -> Self {
        self.republish_interval_secs = secs;
        self
    }

    /// The current light state.
    pub fn state(&self) -> SignalState {
        self.cycle[self.cycle_idx].0
    }

    /// The governed route code.
    pub fn route_code(&self) -> &RouteCode {
        &self.route_code
    }

    /// Advance the cycle to `now`; returns a status message when one is due
    /// (state change, first call, or republish interval elapsed).
    pub fn update(&mut self, now: Timestamp) -> Option<TrafficSignalStatusMsg> {
        let mut changed = false;
        // Walk forward through however many entries `now` has passed.
        while now.since(self.entered_at) >= self.cycle[self.cycle_idx].1 {
            self.entered_at = self.entered_at + self.cycle[self.cycle_idx].1;
            self.cycle_idx = (self.cycle_idx + 1) % self.cycle.len();
            changed = true;
        }

        let due = match self.last_published {
            None => true,
            Some(at) => changed || now.since(at) >= self.republish_interval_secs,
        };
        if !due {
            return None;
        }
        self.last_published = Some(now);
        Some(TrafficSignalStatusMsg {
            route_code: self.route_code.clone(),
            state:      self.state(),
        })
    }
}
