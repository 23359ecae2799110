//! `ds-core` — foundational types for the `rust_ds` driving-scenario simulator.
//!
//! Every other `ds-*` crate depends on this one.  It has no `ds-*`
//! dependencies and keeps external ones to `rand`, `rand_distr`, `thiserror`
//! and an optional `serde`.
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `AgentId`, `SpawnItemId`                                  |
//! | [`geometry`]  | `Vec2` planar vector                                      |
//! | [`time`]      | `Tick`, `SimClock`, `SimConfig`, execution/policy enums   |
//! | [`world`]     | `WorldState`, `WorldInit`, `Weekday`                      |
//! | [`event`]     | `ScenarioEvent`, `TerminationCause`                       |
//! | [`rng`]       | `StreamRng` — per-component deterministic streams         |
//! | [`kind`]      | `AgentKind` (vehicle / pedestrian classification)         |
//! | [`error`]     | `DsError`, `DsResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod event;
pub mod geometry;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;
pub mod world;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{DsError, DsResult};
pub use event::{ScenarioEvent, TerminationCause};
pub use geometry::Vec2;
pub use ids::{AgentId, SpawnItemId};
pub use kind::AgentKind;
pub use rng::StreamRng;
pub use time::{ExecutionMode, SignalErrorPolicy, SimClock, SimConfig, Tick};
pub use world::{Weekday, WorldInit, WorldState};
