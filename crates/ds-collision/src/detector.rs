//! Per-tick collision detection.

use std::collections::{BTreeMap, BTreeSet};

use ds_agent::AgentStore;
use ds_core::{AgentId, Tick};
use tracing::{debug, trace};

use crate::{BroadPhase, OrientedBox};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollisionConfig {
    pub broad_phase: BroadPhase,
    /// Only report a pair on the first tick of an uninterrupted contact.
    /// Default: every tick the pair overlaps.
    pub onset_only: bool,
}

/// An overlapping pair, `a < b`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    pub a: AgentId,
    pub b: AgentId,
    pub penetration: f64,
}

/// The single collision chosen for `agent` on one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Representative {
    pub agent: AgentId,
    pub other: AgentId,
    pub penetration: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    pub tick: Tick,
    /// Every overlapping pair this tick, sorted by `(a, b)`.
    pub contacts: Vec<Contact>,
    /// At most one entry per agent, sorted by agent id.
    pub representatives: Vec<Representative>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn involves(&self, agent: AgentId) -> bool {
        self.contacts.iter().any(|c| c.a == agent || c.b == agent)
    }
}

pub struct CollisionDetector {
    config: CollisionConfig,
    /// Pairs that overlapped on the previous detection pass.
    active: BTreeSet<(AgentId, AgentId)>,
}

impl CollisionDetector {
    pub fn new(config: CollisionConfig) -> Self {
        Self { config, active: BTreeSet::new() }
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Pairs in contact as of the last call to [`detect`](Self::detect).
    pub fn active_contacts(&self) -> impl Iterator<Item = (AgentId, AgentId)> + '_ {
        self.active.iter().copied()
    }

    /// Test every pair of live agents in `agents`.
    pub fn detect(&mut self, tick: Tick, agents: &AgentStore) -> CollisionReport {
        let ids: Vec<AgentId> = agents.live_ids().collect();
        let boxes: Vec<OrientedBox> = ids
            .iter()
            .map(|&a| OrientedBox::of_agent(agents.state(a), agents.params_of(a)))
            .collect();

        let candidates = self.config.broad_phase.candidate_pairs(&boxes);
        let mut contacts = narrow_phase(&ids, &boxes, &candidates);
        contacts.sort_unstable_by_key(|c| (c.a, c.b));

        let recordable: Vec<&Contact> = contacts
            .iter()
            .filter(|c| !self.config.onset_only || !self.active.contains(&(c.a, c.b)))
            .collect();
        let representatives = pick_representatives(&recordable);

        self.active = contacts.iter().map(|c| (c.a, c.b)).collect();

        if !contacts.is_empty() {
            debug!(
                %tick,
                candidates = candidates.len(),
                contacts = contacts.len(),
                recorded = representatives.len(),
                "collision pass"
            );
        }
        CollisionReport { tick, contacts, representatives }
    }
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}

#[cfg(not(feature = "parallel"))]
fn narrow_phase(ids: &[AgentId], boxes: &[OrientedBox], candidates: &[(usize, usize)]) -> Vec<Contact> {
    candidates.iter().filter_map(|&(i, j)| test_pair(ids, boxes, i, j)).collect()
}

#[cfg(feature = "parallel")]
fn narrow_phase(ids: &[AgentId], boxes: &[OrientedBox], candidates: &[(usize, usize)]) -> Vec<Contact> {
    use rayon::prelude::*;
    candidates.par_iter().filter_map(|&(i, j)| test_pair(ids, boxes, i, j)).collect()
}

#[inline]
fn test_pair(ids: &[AgentId], boxes: &[OrientedBox], i: usize, j: usize) -> Option<Contact> {
    let penetration = boxes[i].penetration(&boxes[j])?;
    let (a, b) = if ids[i] < ids[j] { (ids[i], ids[j]) } else { (ids[j], ids[i]) };
    trace!(%a, %b, penetration, "overlap");
    Some(Contact { a, b, penetration })
}

/// Deepest contact per agent; equal depths go to the lower partner id.
fn pick_representatives(contacts: &[&Contact]) -> Vec<Representative> {
    let mut best: BTreeMap<AgentId, (f64, AgentId)> = BTreeMap::new();
    for c in contacts {
        for (agent, other) in [(c.a, c.b), (c.b, c.a)] {
            let better = match best.get(&agent) {
                None => true,
                Some(&(depth, prev)) => {
                    c.penetration > depth || (c.penetration == depth && other < prev)
                }
            };
            if better {
                best.insert(agent, (c.penetration, other));
            }
        }
    }
    best.into_iter()
        .map(|(agent, (penetration, other))| Representative { agent, other, penetration })
        .collect()
}
