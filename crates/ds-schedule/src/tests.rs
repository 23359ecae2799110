//! Unit tests for ds-schedule.

use ds_component::{AgentPipeline, Component, ComponentCategory, ComponentSpec, NoopComponent};
use ds_core::{AgentId, Tick};
use ds_signal::InputDecl;

use crate::{ScheduleError, Scheduler, resolve_plan};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Spec with `reads` as fresh inputs and `writes` as outputs.
fn comp(
    name:     &str,
    category: ComponentCategory,
    priority: i32,
    reads:    &[&str],
    writes:   &[&str],
) -> ComponentSpec {
    let mut spec = ComponentSpec::new(name, category).priority(priority);
    spec.inputs = reads.iter().map(|&r| InputDecl::fresh(r)).collect();
    spec.outputs = writes.iter().map(|&w| w.into()).collect();
    spec
}

fn pipeline(agent: u32, specs: Vec<ComponentSpec>) -> AgentPipeline {
    let components: Vec<Box<dyn Component>> =
        specs.into_iter().map(|s| Box::new(NoopComponent::with_spec(s)) as Box<dyn Component>).collect();
    AgentPipeline::resolve(AgentId(agent), components, 100, 0).unwrap()
}

/// `(agent, component name)` in plan order.
fn order(tick: u64, pipelines: &[&AgentPipeline]) -> Vec<(u32, String)> {
    let plan = resolve_plan(Tick(tick), pipelines).unwrap();
    plan.iter()
        .map(|s| {
            let p = pipelines.iter().find(|p| p.agent() == s.agent).unwrap();
            (s.agent.0, p.component_name(s.slot).to_owned())
        })
        .collect()
}

fn names(order: &[(u32, String)]) -> Vec<&str> {
    order.iter().map(|(_, n)| n.as_str()).collect()
}

use ComponentCategory::{Action, Algorithm, Dynamics, Sensor};

// ── Ordering ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ordering {
    use super::*;

    #[test]
    fn producer_runs_before_consumer_despite_priority() {
        let p = pipeline(0, vec![
            comp("consumer", Algorithm, 0, &["x"], &[]),
            comp("producer", Sensor, 100, &[], &["x"]),
        ]);
        assert_eq!(names(&order(0, &[&p])), vec!["producer", "consumer"]);
    }

    #[test]
    fn ascending_priority_across_agents() {
        let a = pipeline(0, vec![comp("slow", Sensor, 5, &[], &[])]);
        let b = pipeline(1, vec![comp("fast", Sensor, 1, &[], &[])]);
        assert_eq!(order(0, &[&a, &b]), vec![(1, "fast".into()), (0, "slow".into())]);
    }

    #[test]
    fn ties_break_by_agent_then_category() {
        let a = pipeline(0, vec![
            comp("dyn", Dynamics, 0, &[], &[]),
            comp("act", Action, 0, &[], &[]),
            comp("sense", Sensor, 0, &[], &[]),
        ]);
        let b = pipeline(1, vec![comp("sense", Sensor, 0, &[], &[])]);
        assert_eq!(
            order(0, &[&b, &a]),
            vec![
                (0, "sense".into()),
                (0, "act".into()),
                (0, "dyn".into()),
                (1, "sense".into()),
            ]
        );
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = pipeline(0, vec![comp("s", Sensor, 3, &[], &["x"]), comp("c", Algorithm, 0, &["x"], &[])]);
        let b = pipeline(1, vec![comp("s", Sensor, 1, &[], &[])]);
        let c = pipeline(2, vec![comp("s", Sensor, 1, &[], &[])]);
        assert_eq!(order(0, &[&a, &b, &c]), order(0, &[&c, &a, &b]));
    }

    #[test]
    fn full_driving_chain() {
        let p = pipeline(0, vec![
            comp("dynamics", Dynamics, 0, &["accel_cmd"], &[]),
            comp("actuator", Action, 0, &["accel_request"], &["accel_cmd"]),
            comp("driver", Algorithm, 0, &["front_gap"], &["accel_request"]),
            comp("sensor", Sensor, 0, &[], &["front_gap"]),
        ]);
        assert_eq!(names(&order(0, &[&p])), vec!["sensor", "driver", "actuator", "dynamics"]);
    }

    #[test]
    fn library_actuator_runs_before_dynamics() {
        use ds_component::library::{Actuator, CruiseDriver, EventTriggeredBrake, FrontSensor, KinematicDynamics};

        // Priority 5 holds the brake, and so the actuator, behind priority-0
        // dynamics unless the command edge orders them.
        let components: Vec<Box<dyn Component>> = vec![
            Box::new(FrontSensor::default()),
            Box::new(CruiseDriver::new(30.0)),
            Box::new(Actuator::new()),
            Box::new(KinematicDynamics::new()),
            Box::new(EventTriggeredBrake::new("stop", 6.0)),
        ];
        let p = AgentPipeline::resolve(AgentId(0), components, 100, 0).unwrap();
        assert_eq!(
            names(&order(0, &[&p])),
            vec!["front_sensor", "cruise_driver", "event_brake", "actuator", "kinematic_dynamics"]
        );
    }

    #[test]
    fn stale_input_adds_no_edge() {
        let mut consumer = comp("consumer", Sensor, 0, &[], &[]);
        consumer.inputs.push(InputDecl::fresh("x").stale());
        let p = pipeline(0, vec![consumer, comp("producer", Dynamics, 9, &[], &["x"])]);
        assert_eq!(names(&order(0, &[&p])), vec!["consumer", "producer"]);
    }
}

// ── Due filter ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod due {
    use super::*;

    #[test]
    fn slow_component_skips_ticks() {
        let p = pipeline(0, vec![
            comp("every", Sensor, 0, &[], &[]),
            comp("third", Algorithm, 0, &[], &[]).cycle_ms(300),
        ]);
        assert_eq!(names(&order(0, &[&p])), vec!["every", "third"]);
        assert_eq!(names(&order(1, &[&p])), vec!["every"]);
        assert_eq!(names(&order(2, &[&p])), vec!["every"]);
        assert_eq!(names(&order(3, &[&p])), vec!["every", "third"]);
    }

    #[test]
    fn producer_not_due_leaves_consumer_free() {
        let p = pipeline(0, vec![
            comp("producer", Sensor, 9, &[], &["x"]).cycle_ms(200),
            comp("consumer", Algorithm, 0, &["x"], &[]),
        ]);
        assert_eq!(names(&order(0, &[&p])), vec!["producer", "consumer"]);
        assert_eq!(names(&order(1, &[&p])), vec!["consumer"]);
    }

    #[test]
    fn empty_pipeline_set() {
        let plan = resolve_plan(Tick(0), &[]).unwrap();
        assert!(plan.is_empty());
    }
}

// ── Cycles ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cycles {
    use super::*;

    #[test]
    fn three_way_cycle_is_rejected() {
        let p = pipeline(4, vec![
            comp("a", Algorithm, 0, &["b_out"], &["a_out"]),
            comp("b", Algorithm, 0, &["c_out"], &["b_out"]),
            comp("c", Algorithm, 0, &["a_out"], &["c_out"]),
            comp("bystander", Sensor, 0, &[], &[]),
        ]);
        let err = resolve_plan(Tick(7), &[&p]).unwrap_err();
        let ScheduleError::CyclicDependency { tick, agent, components } = err;
        assert_eq!(tick, Tick(7));
        assert_eq!(agent, AgentId(4));
        assert_eq!(components, vec!["a", "b", "c"]);
    }

    #[test]
    fn downstream_consumers_are_not_named() {
        let p = pipeline(1, vec![
            comp("a", Algorithm, 0, &["c_out"], &["a_out"]),
            comp("blocked", Action, 0, &["a_out"], &["d_out"]),
            comp("b", Algorithm, 0, &["a_out"], &["b_out"]),
            comp("c", Algorithm, 0, &["b_out"], &["c_out"]),
            comp("tail", Dynamics, 0, &["d_out"], &[]),
        ]);
        let ScheduleError::CyclicDependency { components, .. } = resolve_plan(Tick(0), &[&p]).unwrap_err();
        assert_eq!(components, vec!["a", "b", "c"]);
    }

    #[test]
    fn fresh_self_read_is_a_cycle() {
        let p = pipeline(0, vec![comp("echo", Algorithm, 0, &["x"], &["x"])]);
        assert!(resolve_plan(Tick(0), &[&p]).is_err());
    }

    #[test]
    fn stale_self_read_is_fine() {
        let mut spec = comp("integrator", Dynamics, 0, &[], &["x"]);
        spec.inputs.push(InputDecl::fresh("x").stale());
        let p = pipeline(0, vec![spec]);
        assert_eq!(resolve_plan(Tick(0), &[&p]).unwrap().len(), 1);
    }

    #[test]
    fn cycle_through_idle_component_only_on_its_ticks() {
        let p = pipeline(0, vec![
            comp("a", Algorithm, 0, &["c_out"], &["a_out"]),
            comp("b", Algorithm, 0, &["a_out"], &["b_out"]),
            comp("c", Algorithm, 0, &["b_out"], &["c_out"]).cycle_ms(200),
        ]);
        assert!(resolve_plan(Tick(1), &[&p]).is_ok());
        assert!(resolve_plan(Tick(2), &[&p]).is_err());
    }

    #[test]
    fn error_names_lowest_stuck_agent() {
        let ok = pipeline(0, vec![comp("fine", Sensor, 0, &[], &[])]);
        let bad1 = pipeline(2, vec![comp("x", Algorithm, 0, &["y"], &["x"]), comp("y", Algorithm, 0, &["x"], &["y"])]);
        let bad2 = pipeline(5, vec![comp("echo", Algorithm, 0, &["e"], &["e"])]);
        let err = resolve_plan(Tick(0), &[&bad2, &ok, &bad1]).unwrap_err();
        assert!(matches!(err, ScheduleError::CyclicDependency { agent: AgentId(2), .. }));
        assert!(err.to_string().contains("x, y"));
    }
}

// ── Scheduler cache ───────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduler {
    use super::*;
    use crate::scheduler::hyperperiod;

    #[test]
    fn hyperperiod_is_lcm() {
        let p = pipeline(0, vec![
            comp("a", Sensor, 0, &[], &[]).cycle_ms(200),
            comp("b", Sensor, 0, &[], &[]).cycle_ms(300),
        ]);
        assert_eq!(hyperperiod(&[&p]), Some(6));
        assert_eq!(hyperperiod(&[]), Some(1));
    }

    #[test]
    fn cached_plans_match_fresh_resolution() {
        let p = pipeline(0, vec![
            comp("s", Sensor, 0, &[], &["x"]).cycle_ms(200),
            comp("c", Algorithm, 0, &["x"], &[]),
            comp("d", Dynamics, 0, &[], &[]).cycle_ms(300),
        ]);
        let mut scheduler = Scheduler::new();
        for t in 0..24 {
            let cached = scheduler.plan(Tick(t), &[&p]).unwrap();
            let fresh = resolve_plan(Tick(t), &[&p]).unwrap();
            assert_eq!(cached.steps, fresh.steps, "tick {t}");
            assert_eq!(cached.tick, Tick(t));
        }
        assert_eq!(scheduler.cache_misses(), 6);
        assert_eq!(scheduler.cache_hits(), 18);
    }

    #[test]
    fn invalidate_drops_cache() {
        let a = pipeline(0, vec![comp("a", Sensor, 0, &[], &[])]);
        let b = pipeline(1, vec![comp("b", Sensor, 0, &[], &[])]);
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.plan(Tick(0), &[&a]).unwrap().len(), 1);
        assert_eq!(scheduler.plan(Tick(1), &[&a]).unwrap().len(), 1);
        assert_eq!(scheduler.cache_hits(), 1);

        scheduler.invalidate();
        assert_eq!(scheduler.generation(), 1);
        assert_eq!(scheduler.plan(Tick(2), &[&a, &b]).unwrap().len(), 2);
    }

    #[test]
    fn cycle_errors_are_not_cached() {
        let p = pipeline(0, vec![comp("echo", Algorithm, 0, &["x"], &["x"])]);
        let mut scheduler = Scheduler::new();
        assert!(scheduler.plan(Tick(0), &[&p]).is_err());
        assert!(scheduler.plan(Tick(1), &[&p]).is_err());
        assert_eq!(scheduler.cache_hits(), 0);
    }

    #[test]
    fn by_agent_groups_keep_plan_order() {
        let a = pipeline(0, vec![comp("a0", Sensor, 2, &[], &[]), comp("a1", Sensor, 0, &[], &[])]);
        let b = pipeline(1, vec![comp("b0", Sensor, 1, &[], &[])]);
        let plan = resolve_plan(Tick(0), &[&a, &b]).unwrap();
        // plan: a1 (0), b0 (1), a0 (2)
        assert_eq!(plan.by_agent(), vec![(AgentId(0), vec![0, 2]), (AgentId(1), vec![1])]);
        assert_eq!(plan.position(AgentId(0), 0), Some(2));
    }
}
