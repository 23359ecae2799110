//! `ds-sim` — tick loop orchestrator for the rust_ds simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.horizon_ticks:
//!   ① Activate — agents spawned on the previous tick are initialised and
//!                join the schedule (plan cache invalidated).
//!   ② Spawn    — due spawn items become inactive agents for tick + 1.
//!   ③ Plan     — Scheduler resolves the order of every due component;
//!                a dependency cycle fails the tick before any step runs.
//!   ④ Step     — components run against the start-of-tick agent store and
//!                their agent's signal partition (per agent in parallel with
//!                the `parallel` feature).
//!   ⑤ Apply    — intents in plan order: SetKinematics (Dynamics only),
//!                Record, Terminate; signal failures halt a pipeline or
//!                abort the run per `SignalErrorPolicy`.
//!   ⑥ Collide  — one representative collision per agent → accumulator.
//!   ⑦ Events   — edge-triggered predicates; visible to components at
//!                tick + 1.
//!   ⑧ Commit   — WorldState, clock and event buffer advance.
//! ```
//!
//! The run ends at the horizon, after a tick that raised a termination, when
//! an [`AbortHandle`] is triggered, or on a fatal error.  Every path
//! finalizes the run result and hands it to [`SimObserver::on_sim_end`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Step phase and collision pair tests on Rayon's thread pool |
//! | `fx-hash`  | FxHash for the plan cache                                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ds_agent::AgentStoreBuilder;
//! use ds_core::SimConfig;
//! use ds_sim::{NoopObserver, SimBuilder};
//!
//! let agents = AgentStoreBuilder::new().agent(kind, params, state).build();
//! let mut sim = SimBuilder::new(SimConfig::default(), agents, vec![components])
//!     .build()?;
//! let result = sim.run(&mut NoopObserver)?;
//! ```

pub mod abort;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use abort::AbortHandle;
pub use builder::SimBuilder;
pub use error::{ErrorClass, SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use sim::Sim;
