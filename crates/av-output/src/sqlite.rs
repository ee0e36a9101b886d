//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `vehicle_poses` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, PoseRow, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS vehicle_poses (
                 vehicle_id   INTEGER NOT NULL,
                 tick         INTEGER NOT NULL,
                 x            REAL    NOT NULL,
                 y            REAL    NOT NULL,
                 yaw          REAL    NOT NULL,
                 velocity_mps REAL    NOT NULL,
                 moving       INTEGER NOT NULL,
                 waypoint     INTEGER NOT NULL,
                 arrow        INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick           INTEGER PRIMARY KEY,
                 unix_time_secs REAL    NOT NULL,
                 moved_vehicles INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_poses(&mut self, rows: &[PoseRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO vehicle_poses \
                 (vehicle_id, tick, x, y, yaw, velocity_mps, moving, waypoint, arrow) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.vehicle_id,
                    row.tick,
                    row.x,
                    row.y,
                    row.yaw,
                    row.velocity_mps,
                    row.moving as i64,
                    row.waypoint,
                    row.arrow,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, unix_time_secs, moved_vehicles) \
             VALUES (?1, ?2, ?3)",
            rusqlite::params![row.tick, row.unix_time_secs, row.moved_vehicles],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
