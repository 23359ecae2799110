use ds_component::PipelineError;
use ds_core::{AgentId, SpawnItemId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    /// The template itself is invalid.  Fatal.
    #[error("{item} is malformed: {reason}")]
    Malformed { item: SpawnItemId, reason: String },

    /// The spawned agent's pipeline does not resolve.  Fatal.
    #[error("{item}: {source}")]
    Pipeline {
        item:   SpawnItemId,
        #[source]
        source: PipelineError,
    },

    #[error("{item}: spawn position occupied by {by}")]
    PositionOccupied { item: SpawnItemId, by: AgentId },

    #[error("{item}: pipeline factory failed: {reason}")]
    Factory { item: SpawnItemId, reason: String },

    #[error("{item}: spawn point capacity of {limit} agents reached")]
    Capacity { item: SpawnItemId, limit: usize },
}

impl SpawnError {
    /// `true` for configuration errors that must abort the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SpawnError::Malformed { .. } | SpawnError::Pipeline { .. })
    }

    pub fn item(&self) -> SpawnItemId {
        match self {
            SpawnError::Malformed { item, .. }
            | SpawnError::Pipeline { item, .. }
            | SpawnError::PositionOccupied { item, .. }
            | SpawnError::Factory { item, .. }
            | SpawnError::Capacity { item, .. } => *item,
        }
    }
}

pub type SpawnResult<T> = Result<T, SpawnError>;
