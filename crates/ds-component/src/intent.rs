//! Requests a component returns from a step.

use ds_agent::KinematicState;

/// Something a component wants to happen once the step phase of the tick is
/// over.
///
/// Intents are applied by the simulation loop in plan order, so the outcome
/// does not depend on how steps were distributed over threads.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Replace the agent's kinematic state.  Only honoured from a Dynamics
    /// component; from any other category it is dropped and logged.
    SetKinematics(KinematicState),

    /// End the run after this tick.
    Terminate { reason: String },

    /// Append a free-form note to the run log.
    Record(String),
}
