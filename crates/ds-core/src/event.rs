//! Scenario events and run termination causes.

use std::fmt;

use crate::{AgentId, Tick};

/// Emitted by the event detector when a predicate turns true.
///
/// Events produced on tick `t` become visible to components on tick `t + 1`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioEvent {
    pub tick: Tick,
    /// Name of the predicate that fired.
    pub name: String,
    /// Agents the predicate singled out (empty for world-level predicates).
    pub agents: Vec<AgentId>,
    /// `true` if this event ends the run.
    pub terminates: bool,
}

impl ScenarioEvent {
    /// `true` if the event is world-level or names `agent`.
    pub fn concerns(&self, agent: AgentId) -> bool {
        self.agents.is_empty() || self.agents.contains(&agent)
    }
}

/// Why a run ended before its horizon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum TerminationCause {
    /// A terminating event predicate fired.
    Event { name: String, agents: Vec<AgentId> },
    /// A component emitted a terminate intent.
    Component { agent: AgentId, component: String, reason: String },
}

impl fmt::Display for TerminationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationCause::Event { name, agents } => {
                write!(f, "event `{name}` ({} agents)", agents.len())
            }
            TerminationCause::Component { agent, component, reason } => {
                write!(f, "{agent}/{component}: {reason}")
            }
        }
    }
}
