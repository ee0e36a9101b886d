//! Fluent builder for constructing a [`Sim`].

use std::collections::HashSet;

use av_core::SimConfig;
use av_map::RoadMap;
use av_vehicle::VehicleAgent;

use crate::{SignalController, Sim, SimError, SimResult, StatusBus};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, tick interval, …
/// - [`RoadMap`] — the shared network
///
/// # Optional inputs
///
/// | Method        | Default          |
/// |---------------|------------------|
/// | `.vehicle(v)` | empty fleet      |
/// | `.signal(s)`  | no signals       |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, map)
///     .vehicle(car_a)
///     .vehicle(car_b)
///     .signal(junction_signal)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:   SimConfig,
    map:      RoadMap,
    vehicles: Vec<VehicleAgent>,
    signals:  Vec<SignalController>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, map: RoadMap) -> Self {
        Self {
            config,
            map,
            vehicles: Vec::new(),
            signals:  Vec::new(),
        }
    }

    /// Add one vehicle to the fleet.
    pub fn vehicle(mut self, vehicle: VehicleAgent) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    /// Add one traffic signal controller.
    pub fn signal(mut self, controller: SignalController) -> Self {
        self.signals.push(controller);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    ///
    /// Vehicle tick intervals must match the configured interval — the
    /// velocity ramp and step size both scale with it — and vehicle ids must
    /// be unique, or echo filtering breaks down.
    pub fn build(self) -> SimResult<Sim> {
        let mut seen = HashSet::new();
        for vehicle in &self.vehicles {
            if !seen.insert(vehicle.id()) {
                return Err(SimError::DuplicateVehicle(vehicle.id()));
            }
            if vehicle.dt_secs() != self.config.tick_interval_secs {
                return Err(SimError::Config(format!(
                    "vehicle {} uses dt = {} s but the sim ticks every {} s",
                    vehicle.id(),
                    vehicle.dt_secs(),
                    self.config.tick_interval_secs
                )));
            }
        }

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            map:      self.map,
            vehicles: self.vehicles,
            signals:  self.signals,
            bus:      StatusBus::new(),
        })
    }
}
