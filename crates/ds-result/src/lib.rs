//! `ds-result` — everything a run reports back to the outside world.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`record`]      | `CollisionRecord`, `CollisionEvent`                        |
//! | [`occurrence`]  | `Occurrence` — the ordered non-collision run log           |
//! | [`run`]         | `RunResult`, `RunStatus`                                   |
//! | [`accumulator`] | `RunResultAccumulator` — append-only, finalize-once store  |
//! | [`error`]       | `ResultError`, `ResultResult`                              |
//!
//! # Collision bookkeeping
//!
//! A collision is stored as one [`CollisionRecord`] (position, yaw, velocity,
//! distance) under the key `(agent, tick)`.  Insertion is all-or-nothing: a
//! second insert for a key that already exists is rejected with
//! [`ResultError::DuplicateCollisionRecord`] and leaves the store untouched.

pub mod accumulator;
pub mod error;
pub mod occurrence;
pub mod record;
pub mod run;

#[cfg(test)]
mod tests;

pub use accumulator::RunResultAccumulator;
pub use error::{ResultError, ResultResult};
pub use occurrence::Occurrence;
pub use record::{CollisionEvent, CollisionRecord};
pub use run::{RunResult, RunStatus};
