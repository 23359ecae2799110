//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! the tables `agent_snapshots`, `tick_summaries`, `collisions`, `run_log`
//! and a one-row `run` table.

use std::path::Path;

use ds_result::RunResult;
use rusqlite::Connection;

use crate::row::{CollisionRow, LogRow};
use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

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
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 agent_id INTEGER NOT NULL,
                 tick     INTEGER NOT NULL,
                 time_ms  INTEGER NOT NULL,
                 kind     TEXT    NOT NULL,
                 live     INTEGER NOT NULL,
                 x        REAL    NOT NULL,
                 y        REAL    NOT NULL,
                 yaw      REAL    NOT NULL,
                 velocity REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick        INTEGER PRIMARY KEY,
                 steps       INTEGER NOT NULL,
                 live_agents INTEGER NOT NULL,
                 spawned     INTEGER NOT NULL,
                 collisions  INTEGER NOT NULL,
                 events      INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS collisions (
                 tick     INTEGER NOT NULL,
                 agent_id INTEGER NOT NULL,
                 other_id INTEGER NOT NULL,
                 x        REAL    NOT NULL,
                 y        REAL    NOT NULL,
                 yaw      REAL    NOT NULL,
                 vx       REAL    NOT NULL,
                 vy       REAL    NOT NULL,
                 distance REAL    NOT NULL,
                 PRIMARY KEY (agent_id, tick)
             );
             CREATE TABLE IF NOT EXISTS run_log (
                 seq    INTEGER PRIMARY KEY,
                 tick   INTEGER NOT NULL,
                 kind   TEXT    NOT NULL,
                 agents TEXT    NOT NULL,
                 detail TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS run (
                 library_id TEXT    NOT NULL,
                 seed       INTEGER NOT NULL,
                 final_tick INTEGER NOT NULL,
                 status     TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (agent_id, tick, time_ms, kind, live, x, y, yaw, velocity) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.tick as i64,
                    row.time_ms as i64,
                    row.kind,
                    row.live as i64,
                    row.x,
                    row.y,
                    row.yaw,
                    row.velocity,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, steps, live_agents, spawned, collisions, events) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick as i64,
                row.steps as i64,
                row.live_agents as i64,
                row.spawned as i64,
                row.collisions as i64,
                row.events as i64,
            ],
        )?;
        Ok(())
    }

    fn write_result(&mut self, result: &RunResult) -> OutputResult<()> {
        let status = serde_json::to_string(&result.status)?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO run (library_id, seed, final_tick, status) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![result.library_id, result.seed as i64, result.final_tick.0 as i64, status],
        )?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO collisions \
                 (tick, agent_id, other_id, x, y, yaw, vx, vy, distance) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for c in result.collisions.iter().map(CollisionRow::from) {
                stmt.execute(rusqlite::params![
                    c.tick as i64,
                    c.agent_id,
                    c.other_id,
                    c.x,
                    c.y,
                    c.yaw,
                    c.vx,
                    c.vy,
                    c.distance,
                ])?;
            }
        }
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO run_log (seq, tick, kind, agents, detail) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (seq, row) in result.log.iter().map(LogRow::from).enumerate() {
                stmt.execute(rusqlite::params![seq as i64, row.tick as i64, row.kind, row.agents, row.detail])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
