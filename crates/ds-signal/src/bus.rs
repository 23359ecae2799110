//! The per-agent signal store.

use std::collections::BTreeMap;

use ds_core::{AgentId, Tick};

use crate::{SignalError, SignalName, SignalResult, SignalValue};

/// One stored value plus its provenance.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalEntry {
    pub value: SignalValue,
    /// Tick of the most recent write.
    pub produced_at: Tick,
    /// Pipeline slot of the component that wrote it.
    pub producer: usize,
}

/// All signals of one agent.
#[derive(Clone, Debug, Default)]
pub struct SignalPartition {
    entries: BTreeMap<SignalName, SignalEntry>,
}

impl SignalPartition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite any prior value for `name`.
    pub fn write(&mut self, name: &SignalName, value: SignalValue, tick: Tick, producer: usize) {
        let entry = SignalEntry { value, produced_at: tick, producer };
        match self.entries.get_mut(name.as_str()) {
            Some(slot) => *slot = entry,
            None => {
                self.entries.insert(name.clone(), entry);
            }
        }
    }

    /// Last written entry, regardless of the tick it was produced on.
    #[inline]
    pub fn latest(&self, name: &str) -> Option<&SignalEntry> {
        self.entries.get(name)
    }

    /// Value written on `tick`, if any.
    pub fn current(&self, name: &str, tick: Tick) -> Option<&SignalValue> {
        self.entries.get(name).filter(|e| e.produced_at == tick).map(|e| &e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&SignalName, &SignalEntry)> {
        self.entries.iter()
    }
}

/// Flat `(agent, name) -> value` store, partitioned by agent.
#[derive(Clone, Debug, Default)]
pub struct SignalBus {
    partitions: Vec<SignalPartition>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agents(count: usize) -> Self {
        Self { partitions: vec![SignalPartition::new(); count] }
    }

    /// Make sure a partition exists for `agent` (spawned agents).
    pub fn ensure_agent(&mut self, agent: AgentId) {
        if self.partitions.len() <= agent.index() {
            self.partitions.resize_with(agent.index() + 1, SignalPartition::new);
        }
    }

    pub fn partition(&self, agent: AgentId) -> Option<&SignalPartition> {
        self.partitions.get(agent.index())
    }

    pub fn partition_mut(&mut self, agent: AgentId) -> &mut SignalPartition {
        self.ensure_agent(agent);
        &mut self.partitions[agent.index()]
    }

    /// All partitions, indexed by agent.  Used to hand disjoint partitions
    /// to concurrent pipeline runs.
    pub fn partitions_mut(&mut self) -> &mut [SignalPartition] {
        &mut self.partitions
    }

    pub fn agent_count(&self) -> usize {
        self.partitions.len()
    }

    pub fn write(
        &mut self,
        agent:    AgentId,
        name:     &SignalName,
        value:    SignalValue,
        tick:     Tick,
        producer: usize,
    ) {
        self.partition_mut(agent).write(name, value, tick, producer);
    }

    /// The value written for `(agent, name)` on `tick`.
    ///
    /// # Errors
    ///
    /// [`SignalError::SignalNotFound`] if nothing was produced on `tick`.
    pub fn read(&self, agent: AgentId, name: &str, tick: Tick) -> SignalResult<&SignalValue> {
        self.partition(agent)
            .and_then(|p| p.current(name, tick))
            .ok_or_else(|| SignalError::SignalNotFound {
                agent,
                signal: SignalName::new(name),
                tick,
            })
    }

    /// Last written entry for `(agent, name)` on any tick.
    pub fn latest(&self, agent: AgentId, name: &str) -> Option<&SignalEntry> {
        self.partition(agent).and_then(|p| p.latest(name))
    }
}
