//! Framework error type.
//!
//! Sub-crates define their own enums (`SignalError`, `ScheduleError`, ...) and
//! wrap `DsError` where they need the shared cases.

use thiserror::Error;

use crate::{AgentId, Tick};

/// The base error type shared by the `ds-*` crates.
#[derive(Debug, Error)]
pub enum DsError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("tick {tick} is beyond the run horizon {horizon}")]
    BeyondHorizon { tick: Tick, horizon: Tick },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ds-core`.
pub type DsResult<T> = Result<T, DsError>;
