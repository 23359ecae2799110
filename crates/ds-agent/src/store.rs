//! `AgentStore` — Structure-of-Arrays storage for every agent in a run.
//!
//! Every `Vec` field has exactly `count` elements and `AgentId` is the index
//! into all of them:
//!
//! ```ignore
//! let pose = store.kinematics[agent.index()];  // O(1), cache-friendly
//! ```
//!
//! Agents are only ever appended (initial population, then spawns), so ids
//! stay dense and stable for the whole run.  An agent that is not `live` is
//! either still waiting for its first scheduled tick or has been removed; it
//! is skipped by scheduling, sensing and collision detection.

use ds_core::{AgentId, AgentKind, Tick};

use crate::{KinematicState, VehicleParams};

pub struct AgentStore {
    /// Number of agents ever created.  Equals the length of every SoA `Vec`.
    pub count: usize,

    pub kind: Vec<AgentKind>,

    /// Static physical description.
    pub params: Vec<VehicleParams>,

    /// Current kinematic state.  Written once per tick in the apply phase.
    pub kinematics: Vec<KinematicState>,

    /// `true` while the agent takes part in the simulation.
    pub live: Vec<bool>,

    /// First tick on which the agent was (or will be) scheduled.
    pub active_from: Vec<Tick>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self {
            count:       0,
            kind:        Vec::new(),
            params:      Vec::new(),
            kinematics:  Vec::new(),
            live:        Vec::new(),
            active_from: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append an agent and return its id.
    ///
    /// The agent starts *not* live; the caller activates it with
    /// [`activate`](Self::activate) when its pipeline joins the schedule.
    pub fn push_agent(
        &mut self,
        kind:        AgentKind,
        params:      VehicleParams,
        state:       KinematicState,
        active_from: Tick,
    ) -> AgentId {
        let id = AgentId(self.count as u32);
        self.kind.push(kind);
        self.params.push(params);
        self.kinematics.push(state);
        self.live.push(false);
        self.active_from.push(active_from);
        self.count += 1;
        id
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    pub fn activate(&mut self, agent: AgentId) {
        self.live[agent.index()] = true;
    }

    pub fn deactivate(&mut self, agent: AgentId) {
        self.live[agent.index()] = false;
    }

    #[inline]
    pub fn is_live(&self, agent: AgentId) -> bool {
        self.live.get(agent.index()).copied().unwrap_or(false)
    }

    /// Iterator over all `AgentId`s in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Iterator over live agents in ascending id order.
    pub fn live_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(|a| self.live[a.index()])
    }

    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|&&l| l).count()
    }

    #[inline]
    pub fn state(&self, agent: AgentId) -> &KinematicState {
        &self.kinematics[agent.index()]
    }

    #[inline]
    pub fn params_of(&self, agent: AgentId) -> &VehicleParams {
        &self.params[agent.index()]
    }
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new()
    }
}
