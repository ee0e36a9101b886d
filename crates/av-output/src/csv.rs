//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `vehicle_poses.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, PoseRow, TickSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    poses:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut poses = Writer::from_path(dir.join("vehicle_poses.csv"))?;
        poses.write_record([
            "vehicle_id",
            "tick",
            "x",
            "y",
            "yaw",
            "velocity_mps",
            "moving",
            "waypoint",
            "arrow",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "unix_time_secs", "moved_vehicles"])?;

        Ok(Self {
            poses,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_poses(&mut self, rows: &[PoseRow]) -> OutputResult<()> {
        for row in rows {
            self.poses.write_record(&[
                row.vehicle_id.to_string(),
                row.tick.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.yaw.to_string(),
                row.velocity_mps.to_string(),
                (row.moving as u8).to_string(),
                row.waypoint.to_string(),
                row.arrow.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.moved_vehicles.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.poses.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
