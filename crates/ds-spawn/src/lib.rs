//! `ds-spawn` — agents that enter the scenario after tick 0.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`item`]    | `SpawnItem` — immutable declarative template                     |
//! | [`queue`]   | `SpawnQueue` — activation-tick ordered queue of items            |
//! | [`factory`] | `PipelineFactory` — builds the components for an item            |
//! | [`point`]   | `SpawnPoint`, `SpawnPolicy`, `SpawnOutcome`                      |
//! | [`error`]   | `SpawnError`, `SpawnResult`                                      |
//!
//! # Timing
//!
//! Items due on tick `t` are processed before the components of `t` are
//! scheduled.  A successful spawn appends the agent to the store *inactive*,
//! with `active_from = t + 1`; the simulation loop activates it at the start
//! of `t + 1`.  A half-built agent therefore never takes part in the tick it
//! was created on.

pub mod error;
pub mod factory;
pub mod item;
pub mod point;
pub mod queue;

#[cfg(test)]
mod tests;

pub use error::{SpawnError, SpawnResult};
pub use factory::{NoFactory, PipelineFactory};
pub use item::SpawnItem;
pub use point::{SpawnFailure, SpawnOutcome, SpawnPoint, SpawnPolicy, SpawnedAgent};
pub use queue::SpawnQueue;
