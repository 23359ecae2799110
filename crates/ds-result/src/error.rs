use ds_core::{AgentId, Tick};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultError {
    #[error("{agent} already has a collision record on {tick}")]
    DuplicateCollisionRecord { agent: AgentId, tick: Tick },

    #[error("run result is finalized; no further records accepted")]
    Finalized,
}

pub type ResultResult<T> = Result<T, ResultError>;
