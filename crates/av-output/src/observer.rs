//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use av_core::SimConfig;
use av_sim::SimObserver;
use av_vehicle::VehicleAgent;

use crate::row::{PoseRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes pose snapshots and tick summaries to any
/// [`OutputWriter`] backend (CSV, SQLite).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:             W,
    start_unix_secs:    f64,
    tick_interval_secs: f32,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            start_unix_secs:    config.start_unix_secs,
            tick_interval_secs: config.tick_interval_secs,
            last_error:         None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn unix_time(&self, tick: u64) -> f64 {
        self.start_unix_secs + tick as f64 * self.tick_interval_secs as f64
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: u64, moved: usize) {
        let row = TickSummaryRow {
            tick,
            unix_time_secs: self.unix_time(tick),
            moved_vehicles: moved as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: u64, vehicles: &[VehicleAgent]) {
        let rows: Vec<PoseRow> = vehicles
            .iter()
            .map(|v| PoseRow {
                vehicle_id:   v.id().0,
                tick,
                x:            v.position().x,
                y:            v.position().y,
                yaw:          v.yaw(),
                velocity_mps: v.velocity_mps(),
                moving:       v.phase().is_moving(),
                waypoint:     v.waypoint().0,
                arrow:        v.arrow().0,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_poses(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
