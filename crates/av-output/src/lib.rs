//! `av-output` — simulation output writers for the rust_av framework.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | Files created                                  |
//! |-----------|-------------|------------------------------------------------|
//! | *(none)*  | CSV         | `vehicle_poses.csv`, `tick_summaries.csv`      |
//! | `sqlite`  | SQLite      | `output.db`                                    |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `av_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use av_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{PoseRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
