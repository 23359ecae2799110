//! `ds-schedule` — decides, for every tick, which components run and in what
//! order.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`plan`]      | `ExecutionPlan`, `ScheduledStep`                          |
//! | [`resolve`]   | `resolve_plan` — due filter, dependency graph, Kahn sort  |
//! | [`scheduler`] | `Scheduler` — hyperperiod phase cache over `resolve_plan` |
//! | [`error`]     | `ScheduleError`, `ScheduleResult`                         |
//!
//! # Ordering rule
//!
//! ```text
//! due(c, t)   ⇔  t mod cycle_ticks(c) == 0
//! edge p → c  ⇔  c declares a Fresh input produced by p, and p is due
//! eligible    ⇔  every incoming edge's producer has already been ordered
//! pick        =  min over eligible of (priority, agent id, category rank, slot)
//! ```
//!
//! Stale-allowed inputs create no edge, which is how feedback loops (for
//! example dynamics feeding back into a sensor) are expressed without a
//! cycle.  Any due component left unordered is part of a cycle and the whole
//! tick is rejected before a single component has been stepped.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                       |
//! |-----------|----------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the plan cache |

pub mod error;
pub mod plan;
pub mod resolve;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use plan::{ExecutionPlan, ScheduledStep};
pub use resolve::resolve_plan;
pub use scheduler::Scheduler;
