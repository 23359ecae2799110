//! Unit tests for ds-result.

use ds_agent::KinematicState;
use ds_core::{AgentId, ScenarioEvent, SpawnItemId, TerminationCause, Tick, Vec2};

use crate::{
    CollisionRecord, Occurrence, ResultError, RunResult, RunResultAccumulator, RunStatus,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn record(x: f64, distance: f64) -> CollisionRecord {
    CollisionRecord::of_state(&KinematicState::at(Vec2::new(x, 0.0), 0.0, 10.0), distance)
}

fn filled() -> RunResultAccumulator {
    let mut acc = RunResultAccumulator::new("lib-a", 42);
    acc.add_collision_agent(Tick(22), AgentId(0), AgentId(1), record(27.0, 0.5)).unwrap();
    acc.add_collision_agent(Tick(22), AgentId(1), AgentId(0), record(23.0, 0.5)).unwrap();
    acc.record(Occurrence::Event(ScenarioEvent {
        tick: Tick(22),
        name: "crash".into(),
        agents: vec![AgentId(0), AgentId(1)],
        terminates: false,
    }))
    .unwrap();
    acc
}

// ── Collision bookkeeping ─────────────────────────────────────────────────────

#[cfg(test)]
mod collisions {
    use super::*;

    #[test]
    fn record_captures_velocity_vector() {
        let state = KinematicState::at(Vec2::new(1.0, 2.0), std::f64::consts::PI, 10.0);
        let r = CollisionRecord::of_state(&state, 0.3);
        assert!((r.velocity.x + 10.0).abs() < 1e-9);
        assert_eq!(r.position, Vec2::new(1.0, 2.0));
        assert_eq!(r.distance, 0.3);
    }

    #[test]
    fn duplicate_is_rejected_without_corruption() {
        let mut acc = filled();
        let before = acc.collisions().to_vec();

        let err = acc
            .add_collision_agent(Tick(22), AgentId(0), AgentId(5), record(99.0, 3.0))
            .unwrap_err();
        assert_eq!(err, ResultError::DuplicateCollisionRecord { agent: AgentId(0), tick: Tick(22) });
        assert_eq!(acc.collisions(), before.as_slice());
        assert_eq!(acc.collision(AgentId(0), Tick(22)).unwrap().other, AgentId(1));
    }

    #[test]
    fn same_agent_on_other_tick_is_fine() {
        let mut acc = filled();
        acc.add_collision_agent(Tick(23), AgentId(0), AgentId(1), record(26.0, 2.5)).unwrap();
        assert!(acc.has_collision(AgentId(0), Tick(23)));
        assert_eq!(acc.collisions().len(), 3);
    }

    #[test]
    fn lookup_by_key() {
        let acc = filled();
        assert!(acc.has_collision(AgentId(1), Tick(22)));
        assert!(!acc.has_collision(AgentId(1), Tick(21)));
        assert!(acc.collision(AgentId(2), Tick(22)).is_none());
    }
}

// ── Finalize ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod finalize {
    use super::*;

    #[test]
    fn finalize_twice_is_identical() {
        let mut acc = filled();
        let first = acc.finalize(Tick(600), RunStatus::Completed).to_json().unwrap();
        let second = acc.finalize(Tick(999), RunStatus::Aborted).to_json().unwrap();
        assert_eq!(first, second);
        assert_eq!(acc.result().unwrap().collisions.len(), 2);
        assert_eq!(acc.result().unwrap().final_tick, Tick(600));
    }

    #[test]
    fn no_appends_after_finalize() {
        let mut acc = filled();
        acc.finalize(Tick(30), RunStatus::Completed);
        assert_eq!(
            acc.add_collision_agent(Tick(30), AgentId(3), AgentId(4), record(0.0, 1.0)),
            Err(ResultError::Finalized)
        );
        assert_eq!(
            acc.record(Occurrence::Note { tick: Tick(30), agent: AgentId(0), text: "late".into() }),
            Err(ResultError::Finalized)
        );
        assert_eq!(acc.result().unwrap().log.len(), 1);
    }

    #[test]
    fn empty_run() {
        let mut acc = RunResultAccumulator::new("empty", 0);
        let result = acc.finalize(Tick(0), RunStatus::Completed);
        assert!(result.collisions.is_empty());
        assert!(result.is_completed());
    }
}

// ── Serialization ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod json {
    use super::*;

    #[test]
    fn result_survives_json() {
        let mut acc = filled();
        acc.record(Occurrence::SpawnFailure {
            tick:    Tick(5),
            item:    SpawnItemId(3),
            reason:  "position occupied".into(),
            dropped: false,
        })
        .unwrap();
        let cause = TerminationCause::Event { name: "crash".into(), agents: vec![AgentId(0)] };
        acc.record(Occurrence::Termination { tick: Tick(22), cause: cause.clone() }).unwrap();
        let result = acc.finalize(Tick(23), RunStatus::Terminated { cause }).clone();

        let json = result.to_json().unwrap();
        assert!(json.contains("\"kind\": \"spawn_failure\""));
        assert!(json.contains("\"status\": \"terminated\""));
        assert_eq!(RunResult::from_json(&json).unwrap(), result);
    }

    #[test]
    fn occurrence_accessors() {
        let note = Occurrence::Note { tick: Tick(4), agent: AgentId(2), text: "x".into() };
        assert_eq!(note.tick(), Tick(4));
        assert_eq!(note.kind(), "note");
        assert_eq!(note.agents(), vec![AgentId(2)]);

        let diag = Occurrence::Diagnostic { tick: Tick(1), agent: None, component: None, message: "m".into() };
        assert!(diag.agents().is_empty());
    }

    #[test]
    fn collisions_for_agent() {
        let mut acc = filled();
        let result = acc.finalize(Tick(30), RunStatus::Completed);
        assert_eq!(result.collisions_for(AgentId(1)).count(), 1);
        assert_eq!(result.collision_at(AgentId(0), Tick(22)).unwrap().record.distance, 0.5);
    }
}
