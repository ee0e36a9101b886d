//! Simulation observer trait for progress reporting and data collection.

use av_vehicle::VehicleAgent;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: u64, moved: usize) {
///         if tick % self.interval == 0 {
///             println!("tick {tick}: {moved} vehicles moved");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: u64) {}

    /// Called at the end of each tick.
    ///
    /// `moved` is the number of vehicles whose position changed this tick.
    fn on_tick_end(&mut self, _tick: u64, _moved: usize) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`).
    ///
    /// Provides read-only access to the full fleet so output writers can
    /// record a pose snapshot without the sim knowing any specific format.
    fn on_snapshot(&mut self, _tick: u64, _vehicles: &[VehicleAgent]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: u64) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
