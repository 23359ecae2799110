use ds_core::AgentId;
use ds_signal::{SignalError, SignalName};
use thiserror::Error;

/// Failure of a single component call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComponentError {
    #[error(transparent)]
    Signal(#[from] SignalError),

    /// The component rejected its parameters during `init`.
    #[error("component configuration error: {0}")]
    Config(String),

    /// Component-defined runtime failure.
    #[error("component failed: {0}")]
    Failed(String),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

/// A pipeline that cannot be resolved into a call table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("{agent}: signal `{signal}` has two producers, `{first}` and `{second}`")]
    DuplicateProducer {
        agent:  AgentId,
        signal: SignalName,
        first:  String,
        second: String,
    },

    #[error("{agent}/{component}: input `{signal}` has no producer and no default")]
    UnresolvedSignal {
        agent:     AgentId,
        component: String,
        signal:    SignalName,
    },

    #[error("{agent}/{component}: cycle time {cycle_time_ms} ms is not a positive multiple of {base_resolution_ms} ms")]
    InvalidCycleTime {
        agent:              AgentId,
        component:          String,
        cycle_time_ms:      u32,
        base_resolution_ms: u32,
    },

    #[error("{agent}/{component}: init failed: {source}")]
    Init {
        agent:     AgentId,
        component: String,
        #[source]
        source:    ComponentError,
    },
}

impl PipelineError {
    pub fn agent(&self) -> AgentId {
        match self {
            PipelineError::DuplicateProducer { agent, .. }
            | PipelineError::UnresolvedSignal { agent, .. }
            | PipelineError::InvalidCycleTime { agent, .. }
            | PipelineError::Init { agent, .. } => *agent,
        }
    }

    /// Name of the offending component, where there is a single one.
    pub fn component(&self) -> Option<&str> {
        match self {
            PipelineError::DuplicateProducer { second, .. } => Some(second),
            PipelineError::UnresolvedSignal { component, .. }
            | PipelineError::InvalidCycleTime { component, .. }
            | PipelineError::Init { component, .. } => Some(component),
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
