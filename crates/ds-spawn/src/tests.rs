//! Unit tests for ds-spawn.

use ds_agent::{AgentStore, AgentStoreBuilder, KinematicState, VehicleParams};
use ds_component::library::KinematicDynamics;
use ds_component::{Component, ComponentCategory, ComponentSpec, NoopComponent};
use ds_core::{AgentId, AgentKind, SpawnItemId, Tick, Vec2};
use ds_signal::InputDecl;

use crate::{PipelineFactory, SpawnError, SpawnItem, SpawnPoint, SpawnPolicy, SpawnQueue};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn item(id: u32, x: f64, tick: u64) -> SpawnItem {
    SpawnItem::new(
        SpawnItemId(id),
        AgentKind::Car,
        KinematicState::at(Vec2::new(x, 0.0), 0.0, 10.0),
        Tick(tick),
    )
}

fn one_car_at(x: f64) -> AgentStore {
    AgentStoreBuilder::new()
        .agent(AgentKind::Car, VehicleParams::passenger_car(), KinematicState::at(Vec2::new(x, 0.0), 0.0, 0.0))
        .build()
}

fn dynamics_only(_: &SpawnItem) -> Result<Vec<Box<dyn Component>>, String> {
    Ok(vec![Box::new(KinematicDynamics::new())])
}

// ── SpawnQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;

    #[test]
    fn drains_only_due_items_in_order() {
        let mut q = SpawnQueue::new();
        q.push(item(2, 0.0, 10));
        q.push(item(0, 0.0, 5));
        q.push(item(1, 0.0, 5));
        q.push(item(3, 0.0, 20));
        assert_eq!(q.len(), 4);
        assert_eq!(q.next_tick(), Some(Tick(5)));

        assert!(q.drain_due(Tick(4)).is_empty());
        let due: Vec<u32> = q.drain_due(Tick(10)).iter().map(|i| i.id.0).collect();
        assert_eq!(due, vec![0, 1, 2]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(20)));
    }

    #[test]
    fn empty_queue() {
        let mut q = SpawnQueue::new();
        assert!(q.is_empty());
        assert!(q.drain_due(Tick(100)).is_empty());
        assert_eq!(q.next_tick(), None);
    }
}

// ── SpawnItem ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod item {
    use super::*;

    #[test]
    fn valid_item() {
        assert!(item(0, 0.0, 0).validate().is_ok());
    }

    #[test]
    fn malformed_items() {
        let zero_width = item(0, 0.0, 0).with_params(VehicleParams { width: 0.0, ..VehicleParams::default() });
        assert!(matches!(zero_width.validate(), Err(SpawnError::Malformed { .. })));

        let mut reversing = item(1, 0.0, 0);
        reversing.state.velocity = -1.0;
        assert!(reversing.validate().is_err());

        let mut nan = item(2, 0.0, 0);
        nan.state.position.x = f64::NAN;
        assert!(nan.validate().is_err());

        let self_ref = item(3, 0.0, 0).with_reference(SpawnItemId(3));
        assert!(self_ref.validate().is_err());
    }

    #[test]
    fn schedule_rejects_malformed() {
        let mut point = SpawnPoint::new("north", SpawnPolicy::Drop);
        let bad = item(0, 0.0, 5).with_params(VehicleParams { length: -1.0, ..VehicleParams::default() });
        let err = point.schedule(bad).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(point.pending(), 0);
    }
}

// ── SpawnPoint ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod point {
    use super::*;

    #[test]
    fn spawned_agent_is_inactive_until_next_tick() {
        let mut agents = one_car_at(-100.0);
        let mut point = SpawnPoint::new("entry", SpawnPolicy::Drop);
        point.schedule(item(7, 0.0, 50)).unwrap();
        let mut factory = dynamics_only;

        let quiet = point.process(Tick(49), &mut agents, &mut factory, 100, 1).unwrap();
        assert!(quiet.is_empty());

        let outcome = point.process(Tick(50), &mut agents, &mut factory, 100, 1).unwrap();
        assert_eq!(outcome.spawned.len(), 1);
        let spawned = &outcome.spawned[0];
        assert_eq!(spawned.agent, AgentId(1));
        assert_eq!(spawned.item, SpawnItemId(7));
        assert_eq!(spawned.pipeline.agent(), AgentId(1));
        assert!(!agents.is_live(AgentId(1)));
        assert_eq!(agents.active_from[1], Tick(51));
        assert_eq!(point.spawned_count(), 1);
    }

    #[test]
    fn occupied_position_is_retried() {
        let mut agents = one_car_at(0.0);
        let mut point = SpawnPoint::new("entry", SpawnPolicy::Retry { delay_ticks: 2, max_attempts: 3 });
        point.schedule(item(0, 1.0, 10)).unwrap();
        let mut factory = dynamics_only;

        let first = point.process(Tick(10), &mut agents, &mut factory, 100, 0).unwrap();
        assert_eq!(first.failures.len(), 1);
        assert!(!first.failures[0].dropped);
        assert!(matches!(first.failures[0].error, SpawnError::PositionOccupied { by: AgentId(0), .. }));
        assert_eq!(point.pending(), 1);

        // Blocker moves away before the retry.
        agents.kinematics[0].position = Vec2::new(-50.0, 0.0);
        assert!(point.process(Tick(11), &mut agents, &mut factory, 100, 0).unwrap().is_empty());
        let retry = point.process(Tick(12), &mut agents, &mut factory, 100, 0).unwrap();
        assert_eq!(retry.spawned.len(), 1);
        assert_eq!(agents.active_from[1], Tick(13));
    }

    #[test]
    fn retries_run_out() {
        let mut agents = one_car_at(0.0);
        let mut point = SpawnPoint::new("entry", SpawnPolicy::Retry { delay_ticks: 1, max_attempts: 3 });
        point.schedule(item(0, 0.0, 0)).unwrap();
        let mut factory = dynamics_only;

        let mut dropped_at = None;
        for t in 0..10 {
            let out = point.process(Tick(t), &mut agents, &mut factory, 100, 0).unwrap();
            if out.failures.iter().any(|f| f.dropped) {
                dropped_at = Some(t);
                break;
            }
        }
        assert_eq!(dropped_at, Some(2));
        assert_eq!(point.pending(), 0);
        assert_eq!(agents.count, 1);
    }

    #[test]
    fn drop_policy_gives_up_at_once() {
        let mut agents = one_car_at(0.0);
        let mut point = SpawnPoint::new("entry", SpawnPolicy::Drop);
        point.schedule(item(0, 0.0, 0)).unwrap();
        let out = point.process(Tick(0), &mut agents, &mut dynamics_only, 100, 0).unwrap();
        assert!(out.failures[0].dropped);
        assert_eq!(point.pending(), 0);
    }

    #[test]
    fn pending_spawn_blocks_second_spawn_on_same_spot() {
        let mut agents = AgentStore::new();
        let mut point = SpawnPoint::new("entry", SpawnPolicy::Drop);
        point.schedule(item(0, 0.0, 3)).unwrap();
        point.schedule(item(1, 0.5, 3)).unwrap();
        let out = point.process(Tick(3), &mut agents, &mut dynamics_only, 100, 0).unwrap();
        assert_eq!(out.spawned.len(), 1);
        assert!(matches!(out.failures[0].error, SpawnError::PositionOccupied { by: AgentId(0), .. }));
    }

    #[test]
    fn capacity_limit() {
        let mut agents = AgentStore::new();
        let mut point = SpawnPoint::new("entry", SpawnPolicy::default()).with_capacity_limit(1);
        point.schedule(item(0, 0.0, 0)).unwrap();
        point.schedule(item(1, 50.0, 0)).unwrap();
        let out = point.process(Tick(0), &mut agents, &mut dynamics_only, 100, 0).unwrap();
        assert_eq!(out.spawned.len(), 1);
        assert!(matches!(out.failures[0].error, SpawnError::Capacity { limit: 1, .. }));
        assert!(out.failures[0].dropped);
    }

    #[test]
    fn factory_failure_is_recoverable() {
        let mut agents = AgentStore::new();
        let mut point = SpawnPoint::new("entry", SpawnPolicy::Drop);
        point.schedule(item(0, 0.0, 0)).unwrap();
        let mut exhausted = |_: &SpawnItem| -> Result<Vec<Box<dyn Component>>, String> {
            Err("no licences left".into())
        };
        let out = point.process(Tick(0), &mut agents, &mut exhausted, 100, 0).unwrap();
        assert!(matches!(out.failures[0].error, SpawnError::Factory { .. }));
        assert!(agents.is_empty());
    }

    #[test]
    fn unresolvable_pipeline_is_fatal_and_leaves_store_untouched() {
        let mut agents = AgentStore::new();
        let mut point = SpawnPoint::new("entry", SpawnPolicy::default());
        point.schedule(item(0, 0.0, 0)).unwrap();
        let mut broken = |_: &SpawnItem| -> Result<Vec<Box<dyn Component>>, String> {
            let spec = ComponentSpec::new("orphan", ComponentCategory::Algorithm).input(InputDecl::fresh("nobody"));
            Ok(vec![Box::new(NoopComponent::with_spec(spec))])
        };
        let err = point.process(Tick(0), &mut agents, &mut broken, 100, 0).err().unwrap();
        assert!(matches!(err, SpawnError::Pipeline { .. }));
        assert!(err.is_fatal());
        assert!(agents.is_empty());
    }

    #[test]
    fn factory_trait_object() {
        struct Counting(usize);
        impl PipelineFactory for Counting {
            fn build(&mut self, _: &SpawnItem) -> Result<Vec<Box<dyn Component>>, String> {
                self.0 += 1;
                Ok(vec![])
            }
        }
        let mut agents = AgentStore::new();
        let mut point = SpawnPoint::new("entry", SpawnPolicy::Drop);
        point.schedule(item(0, 0.0, 0)).unwrap();
        point.schedule(item(1, 20.0, 0)).unwrap();
        let mut factory = Counting(0);
        point.process(Tick(0), &mut agents, &mut factory, 100, 0).unwrap();
        assert_eq!(factory.0, 2);
    }
}
