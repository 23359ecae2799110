//! `ds-component` — pluggable behavior units and the per-agent pipeline that
//! owns them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`category`]  | `ComponentCategory` (Sensor < Algorithm < Action < Dynamics)  |
//! | [`spec`]      | `ComponentSpec` — name, cycle time, priority, declared I/O    |
//! | [`context`]   | `InitContext`, `TickFrame`, `StepContext`                     |
//! | [`intent`]    | `Intent` (`SetKinematics`, `Terminate`, `Record`)             |
//! | [`component`] | `Component` trait                                             |
//! | [`pipeline`]  | `AgentPipeline` — resolved call table for one agent           |
//! | [`noop`]      | `NoopComponent`                                               |
//! | [`library`]   | sensor, driver, scripted brake, actuator, kinematic dynamics  |
//! | [`error`]     | `ComponentError`, `PipelineError`                             |
//!
//! # Two-phase step
//!
//! During a tick every component sees the agent store *as it was at the start
//! of the tick*.  A Dynamics component does not write kinematics directly: it
//! returns [`Intent::SetKinematics`], and the simulation loop applies all
//! intents in plan order after every due component has run.  All agents'
//! physics therefore land together, and collision detection afterwards sees
//! one consistent world.

pub mod category;
pub mod component;
pub mod context;
pub mod error;
pub mod intent;
pub mod library;
pub mod noop;
pub mod pipeline;
pub mod spec;


pub use category::ComponentCategory;
pub use component::Component;
pub use context::{InitContext, StepContext, TickFrame};
pub use error::{ComponentError, ComponentResult, PipelineError, PipelineResult};
pub use intent::Intent;
pub use noop::NoopComponent;
pub use pipeline::{AgentPipeline, PipelineSlot, SlotOutput};
pub use spec::ComponentSpec;
