//! The resolved order for one tick.

use std::sync::Arc;

use ds_component::ComponentCategory;
use ds_core::{AgentId, Tick};

/// One component invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScheduledStep {
    pub agent:    AgentId,
    /// Index into the agent's pipeline.
    pub slot:     usize,
    pub priority: i32,
    pub category: ComponentCategory,
}

/// Every due component of a tick, in execution order.
///
/// Plans for the same phase of the hyperperiod share one step list.
#[derive(Clone, Debug)]
pub struct ExecutionPlan {
    pub tick:  Tick,
    pub steps: Arc<[ScheduledStep]>,
}

impl ExecutionPlan {
    pub fn empty(tick: Tick) -> Self {
        Self { tick, steps: Arc::from(Vec::new()) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledStep> {
        self.steps.iter()
    }

    /// Position of `(agent, slot)` in the plan.
    pub fn position(&self, agent: AgentId, slot: usize) -> Option<usize> {
        self.steps.iter().position(|s| s.agent == agent && s.slot == slot)
    }

    /// Plan indices grouped by agent, agents ascending, each group in plan
    /// order.
    pub fn by_agent(&self) -> Vec<(AgentId, Vec<usize>)> {
        let mut groups: Vec<(AgentId, Vec<usize>)> = Vec::new();
        let mut order: Vec<usize> = (0..self.steps.len()).collect();
        order.sort_by_key(|&i| self.steps[i].agent);
        for i in order {
            let agent = self.steps[i].agent;
            match groups.last_mut() {
                Some((a, idx)) if *a == agent => idx.push(i),
                _ => groups.push((agent, vec![i])),
            }
        }
        groups
    }
}
