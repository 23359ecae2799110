//! Non-collision entries of the run log.

use ds_core::{AgentId, ScenarioEvent, SpawnItemId, TerminationCause, Tick};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Occurrence {
    /// A scenario predicate fired.
    Event(ScenarioEvent),

    /// A spawn item became an agent.
    Spawned { tick: Tick, item: SpawnItemId, agent: AgentId },

    /// A spawn attempt failed; `dropped` if it will not be retried.
    SpawnFailure { tick: Tick, item: SpawnItemId, reason: String, dropped: bool },

    /// An agent's pipeline stopped being scheduled.
    PipelineHalted { tick: Tick, agent: AgentId, component: String, reason: String },

    /// Free-form note from a component.
    Note { tick: Tick, agent: AgentId, text: String },

    /// A recovered, non-fatal problem.
    Diagnostic {
        tick:      Tick,
        agent:     Option<AgentId>,
        component: Option<String>,
        message:   String,
    },

    /// The run stopped before its horizon.
    Termination { tick: Tick, cause: TerminationCause },
}

impl Occurrence {
    pub fn tick(&self) -> Tick {
        match self {
            Occurrence::Event(e) => e.tick,
            Occurrence::Spawned { tick, .. }
            | Occurrence::SpawnFailure { tick, .. }
            | Occurrence::PipelineHalted { tick, .. }
            | Occurrence::Note { tick, .. }
            | Occurrence::Diagnostic { tick, .. }
            | Occurrence::Termination { tick, .. } => *tick,
        }
    }

    /// Short snake_case label, as used in the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Occurrence::Event(_)               => "event",
            Occurrence::Spawned { .. }         => "spawned",
            Occurrence::SpawnFailure { .. }    => "spawn_failure",
            Occurrence::PipelineHalted { .. }  => "pipeline_halted",
            Occurrence::Note { .. }            => "note",
            Occurrence::Diagnostic { .. }      => "diagnostic",
            Occurrence::Termination { .. }     => "termination",
        }
    }

    /// Agents the entry concerns.
    pub fn agents(&self) -> Vec<AgentId> {
        match self {
            Occurrence::Event(e) => e.agents.clone(),
            Occurrence::Spawned { agent, .. }
            | Occurrence::PipelineHalted { agent, .. }
            | Occurrence::Note { agent, .. } => vec![*agent],
            Occurrence::Diagnostic { agent, .. } => agent.iter().copied().collect(),
            Occurrence::Termination { cause, .. } => match cause {
                TerminationCause::Event { agents, .. } => agents.clone(),
                TerminationCause::Component { agent, .. } => vec![*agent],
            },
            Occurrence::SpawnFailure { .. } => vec![],
        }
    }
}
