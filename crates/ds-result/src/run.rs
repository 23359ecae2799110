use ds_core::{AgentId, TerminationCause, Tick};
use serde::{Deserialize, Serialize};

use crate::{CollisionEvent, Occurrence};

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    /// Reached the horizon.
    Completed,
    /// A component or terminating event ended the run early.
    Terminated { cause: TerminationCause },
    /// Stopped between ticks through an abort handle.
    Aborted,
    /// A fatal error; `diagnostic` names tick, agent and component.
    Failed { diagnostic: String },
}

/// The finalized record of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub library_id: String,
    pub seed: u64,
    /// First tick that was *not* completed.
    pub final_tick: Tick,
    pub status: RunStatus,
    /// In detection order: by tick, then by agent id.
    pub collisions: Vec<CollisionEvent>,
    pub log: Vec<Occurrence>,
}

impl RunResult {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn collisions_for(&self, agent: AgentId) -> impl Iterator<Item = &CollisionEvent> {
        self.collisions.iter().filter(move |c| c.agent == agent)
    }

    pub fn collision_at(&self, agent: AgentId, tick: Tick) -> Option<&CollisionEvent> {
        self.collisions.iter().find(|c| c.agent == agent && c.tick == tick)
    }

    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }
}
