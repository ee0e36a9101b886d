//! corridor — smallest end-to-end demo for the rust_av framework.
//!
//! Two vehicles share a 200 m corridor with a signalized junction at 120 m.
//! Vehicle 0 drives the whole corridor and has to negotiate both the red
//! light and vehicle 1, which sits parked mid-approach before departing on
//! its own delayed schedule.  Pose traces land in `./output/`.

mod map;

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};

use av_core::{Point, SimConfig, Timestamp, VehicleId, WaypointId};
use av_msg::SignalState;
use av_output::{CsvWriter, SimOutputObserver};
use av_schedule::load_schedules_reader;
use av_sim::{logging, SignalController, SimBuilder};
use av_vehicle::VehicleAgent;

use map::build_map;

// ── Constants ─────────────────────────────────────────────────────────────────

const VEHICLE_COUNT:      usize = 2;
const TICK_INTERVAL_SECS: f32   = 1.0;
const TOTAL_TICKS:        u64   = 240;
const INITIAL_SPEED_MPS:  f32   = 0.0;
const OUTPUT_DIR:         &str  = "./output";

// ── Schedules ─────────────────────────────────────────────────────────────────

// Vehicle 0 drives the full corridor from t=0.
// Vehicle 1 holds at w12 (60 m) for 40 s, then follows.
const SCHEDULE_CSV: &str = "\
vehicle_id,action,start_secs,end_secs,route\n\
0,move,0.0,120.0,0:0-1:40\n\
0,wait,120.0,150.0,40:1:40\n\
1,wait,0.0,40.0,12:0:12\n\
1,move,40.0,200.0,12:0-1:40\n\
";

fn main() -> Result<()> {
    let _log_guard = logging::init_stdout_logging();

    // ── World ─────────────────────────────────────────────────────────────
    let map = build_map();
    let schedules = load_schedules_reader(Cursor::new(SCHEDULE_CSV), VEHICLE_COUNT)
        .context("parsing inline schedule CSV")?;
    let mut schedules = schedules.into_iter();

    // Vehicle 0 spawns from a raw site position (snapped to the nearest
    // waypoint); vehicle 1 is placed directly on its holding waypoint.
    let v0 = VehicleAgent::spawn_near(
        VehicleId(0),
        &map,
        Point::new(0.8, 0.4),
        INITIAL_SPEED_MPS,
        TICK_INTERVAL_SECS,
        schedules.next().unwrap_or_default(),
    )?;
    let v1 = VehicleAgent::new(
        VehicleId(1),
        &map,
        WaypointId(12),
        map::APPROACH,
        INITIAL_SPEED_MPS,
        TICK_INTERVAL_SECS,
        schedules.next().unwrap_or_default(),
    )?;

    // Junction signal: red 30 s / green 30 s, governing the exit arrow.
    let signal = SignalController::new(
        format!("{}:{}:{}", map::JUNCTION.0, map::EXIT.0, 40).parse()?,
        vec![(SignalState::Red, 30.0), (SignalState::Green, 30.0)],
        Timestamp(0.0),
    )?;

    // ── Sim ───────────────────────────────────────────────────────────────
    let config = SimConfig {
        start_unix_secs:         0.0,
        tick_interval_secs:      TICK_INTERVAL_SECS,
        total_ticks:             TOTAL_TICKS,
        snapshot_interval_ticks: 1,
    };

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR)).context("opening output CSVs")?;
    let mut observer = SimOutputObserver::new(writer, &config);

    let mut sim = SimBuilder::new(config, map)
        .vehicle(v0)
        .vehicle(v1)
        .signal(signal)
        .build()?;

    sim.run(&mut observer)?;
    if let Some(e) = observer.take_error() {
        anyhow::bail!("output writer failed: {e}");
    }

    // ── Report ────────────────────────────────────────────────────────────
    println!("simulated {TOTAL_TICKS} ticks ({})", sim.clock);
    for v in &sim.vehicles {
        println!(
            "  vehicle {}: {} at {} ({} legs left, {:.1} m/s)",
            v.id().0,
            v.phase(),
            v.position(),
            v.schedule().len(),
            v.velocity_mps(),
        );
    }
    println!("pose traces written to {OUTPUT_DIR}/");
    Ok(())
}
