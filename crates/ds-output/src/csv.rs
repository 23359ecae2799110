//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`
//! - `collisions.csv`
//! - `run_log.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use ds_result::RunResult;

use crate::row::{CollisionRow, LogRow};
use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// Writes simulation output to CSV files.
pub struct CsvWriter {
    snapshots:  Writer<File>,
    summaries:  Writer<File>,
    collisions: Writer<File>,
    log:        Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(["agent_id", "tick", "time_ms", "kind", "live", "x", "y", "yaw", "velocity"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "steps", "live_agents", "spawned", "collisions", "events"])?;

        let mut collisions = Writer::from_path(dir.join("collisions.csv"))?;
        collisions.write_record(["tick", "agent_id", "other_id", "x", "y", "yaw", "vx", "vy", "distance"])?;

        let mut log = Writer::from_path(dir.join("run_log.csv"))?;
        log.write_record(["tick", "kind", "agents", "detail"])?;

        Ok(Self {
            snapshots,
            summaries,
            collisions,
            log,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.time_ms.to_string(),
                row.kind.to_string(),
                (row.live as u8).to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.yaw.to_string(),
                row.velocity.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.steps.to_string(),
            row.live_agents.to_string(),
            row.spawned.to_string(),
            row.collisions.to_string(),
            row.events.to_string(),
        ])?;
        Ok(())
    }

    fn write_result(&mut self, result: &RunResult) -> OutputResult<()> {
        for c in result.collisions.iter().map(CollisionRow::from) {
            self.collisions.write_record(&[
                c.tick.to_string(),
                c.agent_id.to_string(),
                c.other_id.to_string(),
                c.x.to_string(),
                c.y.to_string(),
                c.yaw.to_string(),
                c.vx.to_string(),
                c.vy.to_string(),
                c.distance.to_string(),
            ])?;
        }
        for row in result.log.iter().map(LogRow::from) {
            self.log.write_record(&[row.tick.to_string(), row.kind.to_string(), row.agents, row.detail])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.collisions.flush()?;
        self.log.flush()?;
        Ok(())
    }
}
