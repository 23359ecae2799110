//! `ds-agent` — Structure-of-Arrays agent storage for the `rust_ds` simulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`vehicle`] | `VehicleParams` (static), `KinematicState` (per tick)       |
//! | [`store`]   | `AgentStore` (SoA arrays, live flags, spawn push)           |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction of initial agents) |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types. |

pub mod builder;
pub mod store;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use store::AgentStore;
pub use vehicle::{KinematicState, VehicleParams};
