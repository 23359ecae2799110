use ds_component::{ComponentError, PipelineError};
use ds_core::{AgentId, Tick};
use ds_schedule::ScheduleError;
use ds_signal::SignalError;
use ds_spawn::SpawnError;
use thiserror::Error;

/// Where a fatal error sits in the run's error taxonomy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Cyclic dependency, malformed spawn item, unresolvable signal, bad
    /// cycle time or failed init.
    Configuration,
    /// Collision bookkeeping could not be recovered.
    RuntimeCollision,
    /// A spawn failed in a way the retry policy cannot absorb.
    Spawn,
    /// A signal access failed under `SignalErrorPolicy::AbortRun`.
    SignalAccess,
    /// A component step failed for a reason of its own.
    Component,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("spawn failed on {tick}: {source}")]
    Spawn {
        tick:   Tick,
        #[source]
        source: SpawnError,
    },

    #[error("signal access failed on {tick} in {agent}/{component}: {source}")]
    Signal {
        tick:      Tick,
        agent:     AgentId,
        component: String,
        #[source]
        source:    SignalError,
    },

    #[error("component {agent}/{component} failed on {tick}: {source}")]
    Component {
        tick:      Tick,
        agent:     AgentId,
        component: String,
        #[source]
        source:    ComponentError,
    },

    #[error("collision bookkeeping failed on {tick}: {reason}")]
    Collision { tick: Tick, reason: String },
}

impl SimError {
    pub fn class(&self) -> ErrorClass {
        match self {
            SimError::Config(_)
            | SimError::AgentCountMismatch { .. }
            | SimError::Pipeline(_)
            | SimError::Schedule(_) => ErrorClass::Configuration,
            SimError::Spawn { source, .. } if source.is_fatal() => ErrorClass::Configuration,
            SimError::Spawn { .. } => ErrorClass::Spawn,
            SimError::Signal { .. } => ErrorClass::SignalAccess,
            SimError::Component { .. } => ErrorClass::Component,
            SimError::Collision { .. } => ErrorClass::RuntimeCollision,
        }
    }

    pub fn tick(&self) -> Option<Tick> {
        match self {
            SimError::Schedule(ScheduleError::CyclicDependency { tick, .. })
            | SimError::Spawn { tick, .. }
            | SimError::Signal { tick, .. }
            | SimError::Component { tick, .. }
            | SimError::Collision { tick, .. } => Some(*tick),
            _ => None,
        }
    }

    pub fn agent(&self) -> Option<AgentId> {
        match self {
            SimError::Pipeline(e) => Some(e.agent()),
            SimError::Schedule(ScheduleError::CyclicDependency { agent, .. })
            | SimError::Signal { agent, .. }
            | SimError::Component { agent, .. } => Some(*agent),
            SimError::Spawn { source: SpawnError::Pipeline { source, .. }, .. } => {
                Some(source.agent())
            }
            _ => None,
        }
    }

    pub fn component(&self) -> Option<&str> {
        match self {
            SimError::Pipeline(e) => e.component(),
            SimError::Schedule(ScheduleError::CyclicDependency { components, .. }) => {
                components.first().map(String::as_str)
            }
            SimError::Signal { component, .. } | SimError::Component { component, .. } => {
                Some(component)
            }
            SimError::Spawn { source: SpawnError::Pipeline { source, .. }, .. } => {
                source.component()
            }
            _ => None,
        }
    }

    /// One-line report naming tick, agent and component where known.
    pub fn diagnostic(&self) -> String {
        let mut location = Vec::new();
        if let Some(tick) = self.tick() {
            location.push(format!("tick {}", tick.0));
        }
        if let Some(agent) = self.agent() {
            location.push(agent.to_string());
        }
        if let Some(component) = self.component() {
            location.push(format!("component `{component}`"));
        }
        if location.is_empty() {
            format!("{:?}: {self}", self.class())
        } else {
            format!("{:?} [{}]: {self}", self.class(), location.join(", "))
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
