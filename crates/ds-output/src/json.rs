//! JSON output backend.
//!
//! Snapshots and tick summaries are streamed as JSON Lines
//! (`agent_snapshots.jsonl`, `tick_summaries.jsonl`); the finalized result is
//! written once as `run_result.json` in the format of
//! [`RunResult::to_json`](ds_result::RunResult::to_json).

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ds_result::RunResult;
use serde::Serialize;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

pub struct JsonWriter {
    dir:       PathBuf,
    snapshots: BufWriter<File>,
    summaries: BufWriter<File>,
    finished:  bool,
}

impl JsonWriter {
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            dir:       dir.to_path_buf(),
            snapshots: BufWriter::new(File::create(dir.join("agent_snapshots.jsonl"))?),
            summaries: BufWriter::new(File::create(dir.join("tick_summaries.jsonl"))?),
            finished:  false,
        })
    }
}

fn write_line<T: Serialize>(out: &mut BufWriter<File>, value: &T) -> OutputResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

impl OutputWriter for JsonWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            write_line(&mut self.snapshots, row)?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        write_line(&mut self.summaries, row)
    }

    fn write_result(&mut self, result: &RunResult) -> OutputResult<()> {
        fs::write(self.dir.join("run_result.json"), result.to_json()?)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
