use ds_core::{AgentId, Tick};
use thiserror::Error;

use crate::SignalName;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// The component read a signal it did not declare as an input.
    #[error("{agent}: read of undeclared input `{signal}`")]
    UnauthorizedAccess { agent: AgentId, signal: SignalName },

    /// The component wrote a signal it did not declare as an output.
    #[error("{agent}: write to undeclared output `{signal}`")]
    UnauthorizedWrite { agent: AgentId, signal: SignalName },

    /// No producer has written the signal on this tick (or ever).
    #[error("{agent}: signal `{signal}` not produced on {tick}")]
    SignalNotFound { agent: AgentId, signal: SignalName, tick: Tick },

    #[error("{agent}: signal `{signal}` is {found}, expected {expected}")]
    TypeMismatch {
        agent:    AgentId,
        signal:   SignalName,
        expected: &'static str,
        found:    &'static str,
    },
}

impl SignalError {
    pub fn agent(&self) -> AgentId {
        match self {
            SignalError::UnauthorizedAccess { agent, .. }
            | SignalError::UnauthorizedWrite { agent, .. }
            | SignalError::SignalNotFound { agent, .. }
            | SignalError::TypeMismatch { agent, .. } => *agent,
        }
    }

    pub fn signal(&self) -> &SignalName {
        match self {
            SignalError::UnauthorizedAccess { signal, .. }
            | SignalError::UnauthorizedWrite { signal, .. }
            | SignalError::SignalNotFound { signal, .. }
            | SignalError::TypeMismatch { signal, .. } => signal,
        }
    }
}

pub type SignalResult<T> = Result<T, SignalError>;
