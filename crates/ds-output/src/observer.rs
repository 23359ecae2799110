//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ds_agent::AgentStore;
use ds_core::{SimConfig, Tick};
use ds_result::RunResult;
use ds_sim::{SimObserver, TickStats};
use tracing::warn;

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots, tick summaries and the
/// final run result to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:             W,
    base_resolution_ms: u32,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the
    /// tick-to-milliseconds conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            base_resolution_ms: config.base_resolution_ms,
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

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, stats: &TickStats) {
        let row = TickSummaryRow {
            tick:        stats.tick.0,
            steps:       stats.steps as u64,
            live_agents: stats.live_agents as u64,
            spawned:     stats.spawned as u64,
            collisions:  stats.collisions as u64,
            events:      stats.events as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        let time_ms = tick.0 * self.base_resolution_ms as u64;
        let rows = AgentSnapshotRow::all(tick, time_ms, agents);
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, result: &RunResult) {
        let written = self.writer.write_result(result);
        self.store_err(written);
        let finished = self.writer.finish();
        self.store_err(finished);
    }
}
