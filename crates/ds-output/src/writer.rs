//! The `OutputWriter` trait implemented by all backend writers.

use ds_result::RunResult;

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV, JSON and SQLite writers.
///
/// Errors never reach the simulation: [`SimOutputObserver`](crate::SimOutputObserver)
/// stores the first one for [`take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write the finalized run result (collisions and run log).
    fn write_result(&mut self, result: &RunResult) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Fan out to two writers.  Both always see every call; the first error is
/// returned.
impl<A: OutputWriter, B: OutputWriter> OutputWriter for (A, B) {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        let a = self.0.write_snapshots(rows);
        let b = self.1.write_snapshots(rows);
        a.and(b)
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let a = self.0.write_tick_summary(row);
        let b = self.1.write_tick_summary(row);
        a.and(b)
    }

    fn write_result(&mut self, result: &RunResult) -> OutputResult<()> {
        let a = self.0.write_result(result);
        let b = self.1.write_result(result);
        a.and(b)
    }

    fn finish(&mut self) -> OutputResult<()> {
        let a = self.0.finish();
        let b = self.1.finish();
        a.and(b)
    }
}
