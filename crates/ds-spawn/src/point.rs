//! `SpawnPoint` — turns due spawn items into agents and pipelines.

use std::collections::BTreeMap;

use ds_agent::AgentStore;
use ds_collision::OrientedBox;
use ds_component::AgentPipeline;
use ds_core::{AgentId, SpawnItemId, Tick};
use tracing::{debug, warn};

use crate::{PipelineFactory, SpawnError, SpawnItem, SpawnQueue, SpawnResult};

/// What happens to an item whose spawn failed for a recoverable reason.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "policy", rename_all = "snake_case"))]
pub enum SpawnPolicy {
    /// Give up immediately.
    Drop,
    /// Try again `delay_ticks` later, at most `max_attempts` attempts in
    /// total.
    Retry { delay_ticks: u64, max_attempts: u32 },
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy::Retry { delay_ticks: 1, max_attempts: 10 }
    }
}

/// A successfully spawned agent, not yet active.
pub struct SpawnedAgent {
    pub item: SpawnItemId,
    pub agent: AgentId,
    pub pipeline: AgentPipeline,
}

/// A recoverable failure.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnFailure {
    pub error: SpawnError,
    /// `false` if the item was re-queued.
    pub dropped: bool,
}

#[derive(Default)]
pub struct SpawnOutcome {
    pub spawned: Vec<SpawnedAgent>,
    pub failures: Vec<SpawnFailure>,
}

impl SpawnOutcome {
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty() && self.failures.is_empty()
    }
}

pub struct SpawnPoint {
    name: String,
    queue: SpawnQueue,
    policy: SpawnPolicy,
    capacity: Option<usize>,
    spawned: usize,
    attempts: BTreeMap<SpawnItemId, u32>,
}

impl SpawnPoint {
    pub fn new(name: impl Into<String>, policy: SpawnPolicy) -> Self {
        Self {
            name: name.into(),
            queue: SpawnQueue::new(),
            policy,
            capacity: None,
            spawned: 0,
            attempts: BTreeMap::new(),
        }
    }

    /// Refuse spawns once `limit` agents came from this point.
    pub fn with_capacity_limit(mut self, limit: usize) -> Self {
        self.capacity = Some(limit);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn spawned_count(&self) -> usize {
        self.spawned
    }

    /// Queue `item` for its activation tick.
    ///
    /// # Errors
    ///
    /// [`SpawnError::Malformed`] if the item fails validation.
    pub fn schedule(&mut self, item: SpawnItem) -> SpawnResult<()> {
        item.validate()?;
        self.queue.push(item);
        Ok(())
    }

    /// Attempt every item due on `tick`.
    ///
    /// New agents are appended to `agents` inactive with
    /// `active_from = tick + 1`.  Pipelines are resolved with the id the
    /// agent is about to receive, before the agent is appended, so a
    /// pipeline error leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Only fatal errors ([`SpawnError::is_fatal`]) are returned; recoverable
    /// failures are reported in [`SpawnOutcome::failures`].
    pub fn process(
        &mut self,
        tick:               Tick,
        agents:             &mut AgentStore,
        factory:            &mut dyn PipelineFactory,
        base_resolution_ms: u32,
        run_seed:           u64,
    ) -> SpawnResult<SpawnOutcome> {
        let mut outcome = SpawnOutcome::default();
        for item in self.queue.drain_due(tick) {
            match self.try_spawn(tick, &item, agents, factory, base_resolution_ms, run_seed) {
                Ok(spawned) => {
                    debug!(point = %self.name, item = %item.id, agent = %spawned.agent, %tick, "spawned");
                    self.attempts.remove(&item.id);
                    self.spawned += 1;
                    outcome.spawned.push(spawned);
                }
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    let dropped = self.requeue_or_drop(tick, item, &error);
                    warn!(point = %self.name, %tick, dropped, "{error}");
                    outcome.failures.push(SpawnFailure { error, dropped });
                }
            }
        }
        Ok(outcome)
    }

    fn try_spawn(
        &mut self,
        tick:               Tick,
        item:               &SpawnItem,
        agents:             &mut AgentStore,
        factory:            &mut dyn PipelineFactory,
        base_resolution_ms: u32,
        run_seed:           u64,
    ) -> SpawnResult<SpawnedAgent> {
        if let Some(limit) = self.capacity {
            if self.spawned >= limit {
                return Err(SpawnError::Capacity { item: item.id, limit });
            }
        }
        if let Some(by) = occupant(tick, item, agents) {
            return Err(SpawnError::PositionOccupied { item: item.id, by });
        }

        let components = factory
            .build(item)
            .map_err(|reason| SpawnError::Factory { item: item.id, reason })?;

        let agent = AgentId::try_from(agents.count).map_err(|_| SpawnError::Factory {
            item:   item.id,
            reason: "agent id space exhausted".into(),
        })?;
        let pipeline = AgentPipeline::resolve(agent, components, base_resolution_ms, run_seed)
            .map_err(|source| SpawnError::Pipeline { item: item.id, source })?;

        let pushed = agents.push_agent(item.kind, item.params.clone(), item.state, tick.next());
        debug_assert_eq!(pushed, agent);
        Ok(SpawnedAgent { item: item.id, agent, pipeline })
    }

    /// Returns `true` if the item is dropped.
    fn requeue_or_drop(&mut self, tick: Tick, item: SpawnItem, error: &SpawnError) -> bool {
        if matches!(error, SpawnError::Capacity { .. }) {
            self.attempts.remove(&item.id);
            return true;
        }
        let attempts = self.attempts.entry(item.id).or_insert(0);
        *attempts += 1;
        match self.policy {
            SpawnPolicy::Retry { delay_ticks, max_attempts } if *attempts < max_attempts => {
                self.queue.push_at(tick + delay_ticks.max(1), item);
                false
            }
            _ => {
                self.attempts.remove(&item.id);
                true
            }
        }
    }
}

/// First agent, live or about to become live, whose footprint overlaps the
/// item's.
fn occupant(tick: Tick, item: &SpawnItem, agents: &AgentStore) -> Option<AgentId> {
    let footprint = OrientedBox::of_agent(&item.state, &item.params);
    agents
        .agent_ids()
        .filter(|&a| agents.is_live(a) || agents.active_from[a.index()] > tick)
        .find(|&a| footprint.overlaps(&OrientedBox::of_agent(agents.state(a), agents.params_of(a))))
}
