//! `ds-output` — simulation output writers for the rust_ds framework.
//!
//! Three backends are provided:
//!
//! | Feature   | Backend | Files created                                                                      |
//! |-----------|---------|------------------------------------------------------------------------------------|
//! | *(none)*  | CSV     | `agent_snapshots.csv`, `tick_summaries.csv`, `collisions.csv`, `run_log.csv`       |
//! | *(none)*  | JSON    | `agent_snapshots.jsonl`, `tick_summaries.jsonl`, `run_result.json`                 |
//! | `sqlite`  | SQLite  | `output.db`                                                                        |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ds_sim::SimObserver`.  A pair
//! `(A, B)` of writers is itself a writer, so one run can feed two backends.
//!
//! Output is export only: nothing written here is ever read back by the
//! simulation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ds_output::{CsvWriter, JsonWriter, SimOutputObserver};
//!
//! let writer = (CsvWriter::new(dir)?, JsonWriter::new(dir)?);
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use json::JsonWriter;
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, CollisionRow, LogRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
