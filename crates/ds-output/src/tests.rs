//! Integration tests for ds-output.

#[cfg(test)]
fn tmp() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

#[cfg(test)]
fn snap_row(agent_id: u32, tick: u64) -> crate::AgentSnapshotRow {
    crate::AgentSnapshotRow {
        agent_id,
        tick,
        time_ms:  tick * 100,
        kind:     "car",
        live:     true,
        x:        agent_id as f64 * 10.0,
        y:        0.0,
        yaw:      0.0,
        velocity: 12.5,
    }
}

#[cfg(test)]
fn summary_row(tick: u64) -> crate::TickSummaryRow {
    crate::TickSummaryRow { tick, steps: 4, live_agents: 2, spawned: 0, collisions: 1, events: 0 }
}

/// A finished run with one collision pair and two log entries.
#[cfg(test)]
fn sample_result() -> ds_result::RunResult {
    use ds_core::{AgentId, ScenarioEvent, Tick, Vec2};
    use ds_result::{CollisionEvent, CollisionRecord, Occurrence, RunResult, RunStatus};

    let record = |x: f64| CollisionRecord {
        position: Vec2::new(x, 0.0),
        yaw:      0.0,
        velocity: Vec2::new(3.0, 0.0),
        distance: 0.25,
    };
    RunResult {
        library_id: "default".into(),
        seed:       7,
        final_tick: Tick(40),
        status:     RunStatus::Completed,
        collisions: vec![
            CollisionEvent { tick: Tick(12), agent: AgentId(0), other: AgentId(1), record: record(4.0) },
            CollisionEvent { tick: Tick(12), agent: AgentId(1), other: AgentId(0), record: record(0.0) },
        ],
        log: vec![
            Occurrence::Event(ScenarioEvent {
                tick:       Tick(12),
                name:       "crash".into(),
                agents:     vec![AgentId(0), AgentId(1)],
                terminates: false,
            }),
            Occurrence::Note { tick: Tick(13), agent: AgentId(1), text: "braking".into() },
        ],
    }
}

// ── Row conversion ────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use ds_core::{AgentId, SpawnItemId, TerminationCause, Tick};
    use ds_result::Occurrence;

    use crate::{CollisionRow, LogRow};

    #[test]
    fn collision_row_describes_other() {
        let result = super::sample_result();
        let row = CollisionRow::from(&result.collisions[0]);
        assert_eq!((row.tick, row.agent_id, row.other_id), (12, 0, 1));
        assert_eq!(row.x, 4.0);
        assert_eq!(row.vx, 3.0);
        assert_eq!(row.distance, 0.25);
    }

    #[test]
    fn log_row_flattens_agents() {
        let result = super::sample_result();
        let row = LogRow::from(&result.log[0]);
        assert_eq!(row.kind, "event");
        assert_eq!(row.agents, "0;1");
        assert_eq!(row.detail, "crash");
    }

    #[test]
    fn log_row_details() {
        let failure = Occurrence::SpawnFailure {
            tick:    Tick(3),
            item:    SpawnItemId(9),
            reason:  "occupied".into(),
            dropped: true,
        };
        let row = LogRow::from(&failure);
        assert_eq!(row.agents, "");
        assert_eq!(row.detail, "spawn#9: occupied (dropped)");

        let end = Occurrence::Termination {
            tick:  Tick(8),
            cause: TerminationCause::Component {
                agent:     AgentId(2),
                component: "quitter".into(),
                reason:    "done".into(),
            },
        };
        let row = LogRow::from(&end);
        assert_eq!(row.kind, "termination");
        assert_eq!(row.agents, "2");
        assert!(row.detail.contains("quitter"), "{}", row.detail);
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use crate::csv::CsvWriter;
    use crate::writer::OutputWriter;

    use super::{sample_result, snap_row, summary_row, tmp};

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        for name in ["agent_snapshots.csv", "tick_summaries.csv", "collisions.csv", "run_log.csv"] {
            assert!(dir.path().join(name).exists(), "{name}");
        }
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("agent_snapshots.csv")),
            ["agent_id", "tick", "time_ms", "kind", "live", "x", "y", "yaw", "velocity"]
        );
        assert_eq!(
            headers(dir.path().join("collisions.csv")),
            ["tick", "agent_id", "other_id", "x", "y", "yaw", "vx", "vy", "distance"]
        );
        assert_eq!(headers(dir.path().join("run_log.csv")), ["tick", "kind", "agents", "detail"]);
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][1], "5");    // tick
        assert_eq!(&rows[0][2], "500");  // time_ms
        assert_eq!(&rows[2][0], "2");
        assert_eq!(&rows[2][5], "20");   // x
    }

    #[test]
    fn csv_tick_summary() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "4");
    }

    #[test]
    fn csv_result_files() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_result(&sample_result()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("collisions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!((&rows[1][1], &rows[1][2]), ("1", "0"));

        let mut rdr = csv::Reader::from_path(dir.path().join("run_log.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][1], "note");
        assert_eq!(&rows[1][3], "braking");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

// ── JSON tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod json_tests {
    use ds_result::RunResult;

    use crate::json::JsonWriter;
    use crate::writer::OutputWriter;

    use super::{sample_result, snap_row, summary_row, tmp};

    #[test]
    fn snapshots_are_json_lines() {
        let dir = tmp();
        let mut w = JsonWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 0), snap_row(1, 0)]).unwrap();
        w.write_tick_summary(&summary_row(0)).unwrap();
        w.finish().unwrap();

        let text = std::fs::read_to_string(dir.path().join("agent_snapshots.jsonl")).unwrap();
        let lines: Vec<serde_json::Value> =
            text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["agent_id"], 1);
        assert_eq!(lines[1]["kind"], "car");
        assert_eq!(lines[1]["velocity"], 12.5);

        let summaries = std::fs::read_to_string(dir.path().join("tick_summaries.jsonl")).unwrap();
        assert_eq!(summaries.lines().count(), 1);
    }

    #[test]
    fn run_result_file_reads_back() {
        let dir = tmp();
        let mut w = JsonWriter::new(dir.path()).unwrap();
        let result = sample_result();
        w.write_result(&result).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let text = std::fs::read_to_string(dir.path().join("run_result.json")).unwrap();
        assert_eq!(RunResult::from_json(&text).unwrap(), result);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use ds_agent::{AgentStoreBuilder, KinematicState, VehicleParams};
    use ds_component::Component;
    use ds_component::library::KinematicDynamics;
    use ds_core::{AgentKind, SimConfig, Vec2};
    use ds_result::RunResult;
    use ds_sim::SimBuilder;

    use crate::{CsvWriter, JsonWriter, SimOutputObserver};

    use super::tmp;

    #[test]
    fn head_on_run_writes_all_backends() {
        let config = SimConfig {
            horizon_ticks: 30,
            seed: 1,
            snapshot_interval_ticks: 10,
            ..SimConfig::default()
        };
        let car = |x: f64, yaw: f64| KinematicState::at(Vec2::new(x, 0.0), yaw, 10.0);
        let agents = AgentStoreBuilder::new()
            .agent(AgentKind::Car, VehicleParams::passenger_car(), car(0.0, 0.0))
            .agent(AgentKind::Car, VehicleParams::passenger_car(), car(50.0, std::f64::consts::PI))
            .build();
        let pipelines: Vec<Vec<Box<dyn Component>>> = vec![
            vec![Box::new(KinematicDynamics::new())],
            vec![Box::new(KinematicDynamics::new())],
        ];
        let mut sim = SimBuilder::new(config.clone(), agents, pipelines).build().unwrap();

        let dir = tmp();
        let writer = (CsvWriter::new(dir.path()).unwrap(), JsonWriter::new(dir.path()).unwrap());
        let mut obs = SimOutputObserver::new(writer, &config);
        let result = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Snapshots at ticks 0, 10 and 20 for two agents.
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        assert_eq!(rdr.records().count(), 6);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 30);

        // Centres are closer than one car length on ticks 22 to 26.
        let mut rdr = csv::Reader::from_path(dir.path().join("collisions.csv")).unwrap();
        assert_eq!(rdr.records().count(), 10);
        assert_eq!(result.collisions.len(), 10);

        let text = std::fs::read_to_string(dir.path().join("run_result.json")).unwrap();
        let written = RunResult::from_json(&text).unwrap();
        assert_eq!(written, result);
        assert!(written.is_completed());
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    use super::{sample_result, snap_row, summary_row, tmp};

    fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_rows_written() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 1), snap_row(1, 1)]).unwrap();
        w.write_tick_summary(&summary_row(1)).unwrap();
        w.write_result(&sample_result()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        assert_eq!(count(&conn, "agent_snapshots"), 2);
        assert_eq!(count(&conn, "tick_summaries"), 1);
        assert_eq!(count(&conn, "collisions"), 2);
        assert_eq!(count(&conn, "run_log"), 2);

        let (final_tick, status): (i64, String) = conn
            .query_row("SELECT final_tick, status FROM run", [], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap();
        assert_eq!(final_tick, 40);
        assert!(status.contains("completed"), "{status}");
    }

    #[test]
    fn duplicate_collision_key_rejected() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let mut result = sample_result();
        result.collisions.push(result.collisions[0]);
        assert!(w.write_result(&result).is_err());
    }
}
