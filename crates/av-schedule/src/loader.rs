//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per schedule leg, legs of one vehicle in planned order:
//!
//! ```csv
//! vehicle_id,action,start_secs,end_secs,route
//! 0,move,1000.0,1060.0,0:0-1:4
//! 0,wait,1060.0,1120.0,4:1:4
//! 1,move,1000.0,1090.0,2:3:7
//! ```
//!
//! **`action`** is `move` or `wait`; **`route`** is a textual
//! [`RouteCode`](av_core::RouteCode) (`start:arrow-…-arrow:goal`); the window
//! bounds are Unix seconds.
//!
//! Vehicles absent from the file receive an empty [`Schedule`].

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use av_core::Timestamp;

use crate::leg::{LegAction, Schedule, ScheduleLeg, TimeWindow};
use crate::ScheduleError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LegRecord {
    vehicle_id: u32,
    action:     String,
    start_secs: f64,
    end_secs:   f64,
    route:      String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-vehicle [`Schedule`]s from a CSV file.
///
/// Returns a `Vec` of length `vehicle_count`, indexed by `VehicleId`.
/// Vehicles with no rows in the file receive [`Schedule::empty`].
pub fn load_schedules_csv(
    path: &Path,
    vehicle_count: usize,
) -> Result<Vec<Schedule>, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_schedules_reader(file, vehicle_count)
}

/// Like [`load_schedules_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for inlined fixtures.
pub fn load_schedules_reader<R: Read>(
    reader: R,
    vehicle_count: usize,
) -> Result<Vec<Schedule>, ScheduleError> {
    // ── Parse CSV rows ────────────────────────────────────────────────────
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_vehicle: HashMap<u32, Vec<LegRecord>> = HashMap::new();

    for result in csv_reader.deserialize::<LegRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        by_vehicle.entry(row.vehicle_id).or_default().push(row);
    }

    // ── Build one Schedule per vehicle ────────────────────────────────────
    let mut schedules: Vec<Schedule> = Vec::with_capacity(vehicle_count);

    for i in 0..vehicle_count as u32 {
        match by_vehicle.remove(&i) {
            None => schedules.push(Schedule::empty()),
            Some(rows) => {
                let legs: Vec<ScheduleLeg> = rows
                    .into_iter()
                    .map(|r| {
                        Ok(ScheduleLeg {
                            action: parse_action(&r.action)?,
                            route:  r.route.parse().map_err(|e| {
                                ScheduleError::Parse(format!("vehicle {i}: {e}"))
                            })?,
                            window: TimeWindow::new(
                                Timestamp(r.start_secs),
                                Timestamp(r.end_secs),
                            ),
                        })
                    })
                    .collect::<Result<_, ScheduleError>>()?;

                schedules.push(Schedule::from(legs));
            }
        }
    }

    Ok(schedules)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_action(s: &str) -> Result<LegAction, ScheduleError> {
    match s.trim() {
        "move" => Ok(LegAction::Move),
        "wait" => Ok(LegAction::Wait),
        other => Err(ScheduleError::Parse(format!(
            "invalid action {other:?}: expected \"move\" or \"wait\""
        ))),
    }
}
