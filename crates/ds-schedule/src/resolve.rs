//! Dependency resolution for a single tick.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use ds_component::AgentPipeline;
use ds_core::{AgentId, Tick};
use tracing::trace;

use crate::{ExecutionPlan, ScheduleError, ScheduleResult, ScheduledStep};

/// Tie-break key.  Field order is the comparison order.
type ReadyKey = (i32, AgentId, u8, usize, usize);

/// Order every due component of `pipelines` for `tick`.
///
/// `pipelines` must contain only the pipelines that take part in the tick.
/// Their order does not matter; ties are broken by the key, not by input
/// position.
///
/// # Errors
///
/// [`ScheduleError::CyclicDependency`] if some due components cannot be
/// ordered.  Nothing is returned for the tick in that case.
pub fn resolve_plan(tick: Tick, pipelines: &[&AgentPipeline]) -> ScheduleResult<ExecutionPlan> {
    // One node per due (pipeline, slot); `node_of[p][s]` is its index.
    let mut nodes: Vec<(usize, usize)> = Vec::new();
    let mut node_of: Vec<Vec<Option<usize>>> = Vec::with_capacity(pipelines.len());
    for (p, pipeline) in pipelines.iter().enumerate() {
        let mut slots = vec![None; pipeline.len()];
        for (s, slot) in pipeline.slots().iter().enumerate() {
            if tick.is_due(slot.cycle_ticks) {
                slots[s] = Some(nodes.len());
                nodes.push((p, s));
            }
        }
        node_of.push(slots);
    }

    let mut indegree = vec![0usize; nodes.len()];
    let mut consumers: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (n, &(p, s)) in nodes.iter().enumerate() {
        let pipeline = pipelines[p];
        for input in pipeline.slot(s).spec.inputs.iter().filter(|i| i.is_fresh()) {
            let Some(producer) = pipeline.producer_of(input.name.as_str()) else { continue };
            let Some(producer_node) = node_of[p][producer] else { continue };
            consumers[producer_node].push(n);
            indegree[n] += 1;
        }
    }

    let key = |n: usize| -> ReadyKey {
        let (p, s) = nodes[n];
        let spec = &pipelines[p].slot(s).spec;
        (spec.priority, pipelines[p].agent(), spec.category.rank(), s, n)
    };

    let mut ready: BinaryHeap<Reverse<ReadyKey>> = (0..nodes.len())
        .filter(|&n| indegree[n] == 0)
        .map(|n| Reverse(key(n)))
        .collect();

    let mut steps = Vec::with_capacity(nodes.len());
    while let Some(Reverse((priority, agent, _, slot, n))) = ready.pop() {
        let category = pipelines[nodes[n].0].category_of(slot);
        trace!(%tick, %agent, slot, priority, %category, "ordered");
        steps.push(ScheduledStep { agent, slot, priority, category });
        for &c in &consumers[n] {
            indegree[c] -= 1;
            if indegree[c] == 0 {
                ready.push(Reverse(key(c)));
            }
        }
    }

    if steps.len() < nodes.len() {
        return Err(cycle_error(tick, pipelines, &nodes, &indegree, &consumers));
    }
    Ok(ExecutionPlan { tick, steps: Arc::from(steps) })
}

/// Build the error for the lowest agent that still has unordered components.
///
/// Only components that lie on a dependency cycle are named; consumers that
/// were merely blocked behind the cycle are left out.
fn cycle_error(
    tick:      Tick,
    pipelines: &[&AgentPipeline],
    nodes:     &[(usize, usize)],
    indegree:  &[usize],
    consumers: &[Vec<usize>],
) -> ScheduleError {
    let stuck: Vec<bool> = indegree.iter().map(|&deg| deg > 0).collect();
    let mut cyclic: Vec<(AgentId, usize, usize)> = (0..nodes.len())
        .filter(|&n| stuck[n] && reaches_itself(n, consumers, &stuck))
        .map(|n| (pipelines[nodes[n].0].agent(), nodes[n].1, nodes[n].0))
        .collect();
    cyclic.sort_unstable();

    let agent = cyclic.first().map(|&(a, _, _)| a).unwrap_or_default();
    let components = cyclic
        .iter()
        .filter(|&&(a, _, _)| a == agent)
        .map(|&(_, s, p)| pipelines[p].component_name(s).to_owned())
        .collect();
    ScheduleError::CyclicDependency { tick, agent, components }
}

/// Whether `start` can reach itself through edges between stuck nodes.
fn reaches_itself(start: usize, consumers: &[Vec<usize>], stuck: &[bool]) -> bool {
    let mut seen = vec![false; consumers.len()];
    let mut stack: Vec<usize> = consumers[start].iter().copied().filter(|&c| stuck[c]).collect();
    while let Some(n) = stack.pop() {
        if n == start {
            return true;
        }
        if std::mem::replace(&mut seen[n], true) {
            continue;
        }
        stack.extend(consumers[n].iter().copied().filter(|&c| stuck[c]));
    }
    false
}
