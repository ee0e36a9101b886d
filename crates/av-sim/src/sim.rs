//! The `Sim` struct and its tick loop.

use tracing::debug;

use av_core::{SimClock, SimConfig, Timestamp};
use av_map::RoadMap;
use av_msg::{encode_signal_status, encode_vehicle_status};
use av_vehicle::VehicleAgent;

use crate::{SignalController, SimObserver, SimResult, StatusBus};

/// The main simulation runner.
///
/// Owns the road map, the fleet, the signal controllers, and the status bus,
/// and drives the four-phase tick loop (see the crate docs).  Create via
/// [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, tick interval, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// The shared road network.  Read-only for the whole run.
    pub map: RoadMap,

    /// The fleet, indexed by spawn order.
    pub vehicles: Vec<VehicleAgent>,

    /// Traffic signal controllers.
    pub signals: Vec<SignalController>,

    /// The broadcast transport connecting everything above.
    pub bus: StatusBus,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        loop {
            let tick = self.clock.current_tick;
            if tick >= self.config.end_tick() {
                break;
            }

            observer.on_tick_start(tick);
            let moved = self.process_tick(self.clock.now())?;
            observer.on_tick_end(tick, moved);
            if self.config.snapshot_interval_ticks > 0
                && tick.is_multiple_of(self.config.snapshot_interval_ticks)
            {
                observer.on_snapshot(tick, &self.vehicles);
            }

            self.clock.advance();
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let tick = self.clock.current_tick;
            observer.on_tick_start(tick);
            let moved = self.process_tick(self.clock.now())?;
            observer.on_tick_end(tick, moved);
            if self.config.snapshot_interval_ticks > 0
                && tick.is_multiple_of(self.config.snapshot_interval_ticks)
            {
                observer.on_snapshot(tick, &self.vehicles);
            }
            self.clock.advance();
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Timestamp) -> SimResult<usize> {
        // ── Phase 1: signal controllers publish ───────────────────────────
        for controller in &mut self.signals {
            if let Some(status) = controller.update(now) {
                let (topic, payload) = encode_signal_status(&status)?;
                self.bus.publish(topic, payload);
            }
        }

        // ── Phase 2: deliver queued broadcasts ────────────────────────────
        //
        // Each broadcast is decoded once and fanned out to every agent's
        // observation tables; agents drop their own echo themselves.
        // Undecodable broadcasts are dropped here — the agents never see
        // them (decode error policy: drop and log).
        for (topic, payload) in self.bus.drain() {
            match av_msg::decode(&topic, &payload) {
                Ok(broadcast) => {
                    for vehicle in &mut self.vehicles {
                        vehicle.observe(broadcast.clone());
                    }
                }
                Err(error) => {
                    debug!(%topic, %error, "dropping undecodable broadcast");
                }
            }
        }

        // ── Phase 3: per-vehicle update ───────────────────────────────────
        //
        // Agents share nothing but the read-only map, so the update phase
        // fans out cleanly.  Delivery (above) and update never overlap for
        // one agent: that is the single-writer discipline the core requires.
        let before: Vec<_> = self.vehicles.iter().map(|v| v.position()).collect();

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let map = &self.map;
            self.vehicles
                .par_iter_mut()
                .for_each(|vehicle| vehicle.update_status(map, now));
        }

        #[cfg(not(feature = "parallel"))]
        for vehicle in &mut self.vehicles {
            vehicle.update_status(&self.map, now);
        }

        let moved = self
            .vehicles
            .iter()
            .zip(&before)
            .filter(|&(ref v, &b)| v.position() != b)
            .count();

        // ── Phase 4: vehicles publish their status ────────────────────────
        //
        // Queued now, delivered at the start of the next tick — peers always
        // act on last tick's fleet state, like any broadcast transport.
        for vehicle in &self.vehicles {
            let (topic, payload) = encode_vehicle_status(vehicle.id(), &vehicle.status())?;
            self.bus.publish(topic, payload);
        }

        Ok(moved)
    }
}
