//! Standard components for longitudinal driving scenarios.
//!
//! The components wire together through the signal names in [`signals`]:
//!
//! ```text
//! FrontSensor ──front_gap, front_speed──▶ CruiseDriver ──accel_request──┐
//!                                                                       ▼
//! EventTriggeredBrake ─────────────brake_request──────────────▶ Actuator ──accel_cmd──▶ KinematicDynamics
//! ```
//!
//! `KinematicDynamics` reads `accel_cmd` fresh with a zero default: it always
//! runs after a due actuator, and a pipeline made of nothing but dynamics
//! simply coasts.

mod actuator;
mod brake;
mod driver;
mod dynamics;
mod sensor;

pub use actuator::Actuator;
pub use brake::EventTriggeredBrake;
pub use driver::CruiseDriver;
pub use dynamics::KinematicDynamics;
pub use sensor::FrontSensor;

/// Signal names used by the standard components.
pub mod signals {
    pub const FRONT_GAP: &str = "front_gap";
    pub const FRONT_SPEED: &str = "front_speed";
    pub const ACCEL_REQUEST: &str = "accel_request";
    pub const BRAKE_REQUEST: &str = "brake_request";
    pub const ACCEL_CMD: &str = "accel_cmd";
    pub const CURVATURE_CMD: &str = "curvature_cmd";
}
