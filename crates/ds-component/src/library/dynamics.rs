use ds_agent::KinematicState;
use ds_core::Vec2;
use ds_signal::InputDecl;

use super::signals::{ACCEL_CMD, CURVATURE_CMD};
use crate::{Component, ComponentCategory, ComponentResult, ComponentSpec, Intent, StepContext};

/// Point-mass longitudinal dynamics with curvature steering.
///
/// Semi-implicit Euler over one tick of length `dt`:
///
///   v'   = clamp(v + a·dt, 0, v_max)
///   yaw' = yaw + κ·v'·dt
///   p'   = p + heading(yaw)·v'·dt
///
/// `accel_cmd` is a fresh input with a zero default, so a due actuator always
/// runs first and a pipeline without one coasts.  The actuator should share
/// the dynamics' cycle time; on ticks where it is not due the command falls
/// back to zero.  Without steering the agent keeps its current curvature;
/// [`steered`](Self::steered) adds a stale-allowed `curvature_cmd` input that
/// must have a producer.
pub struct KinematicDynamics {
    spec: ComponentSpec,
}

impl KinematicDynamics {
    pub fn new() -> Self {
        Self {
            spec: ComponentSpec::new("kinematic_dynamics", ComponentCategory::Dynamics)
                .input(InputDecl::fresh(ACCEL_CMD).or_default(0.0)),
        }
    }

    pub fn steered() -> Self {
        let mut dynamics = Self::new();
        dynamics.spec.inputs.push(InputDecl::fresh(CURVATURE_CMD).stale());
        dynamics
    }

    pub fn integrate(state: &KinematicState, accel: f64, curvature: f64, max_velocity: f64, dt: f64) -> KinematicState {
        let velocity = (state.velocity + accel * dt).clamp(0.0, max_velocity.max(0.0));
        let travelled = velocity * dt;
        KinematicState {
            position: state.position + Vec2::from_angle(state.yaw) * travelled,
            yaw: state.yaw + curvature * travelled,
            curvature,
            velocity,
            acceleration: if dt > 0.0 { (velocity - state.velocity) / dt } else { 0.0 },
        }
    }
}

impl Default for KinematicDynamics {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for KinematicDynamics {
    fn spec(&self) -> &ComponentSpec {
        &self.spec
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> ComponentResult<Vec<Intent>> {
        let state = *ctx.own_state();
        let accel = ctx.signals.read_f64(ACCEL_CMD)?;
        let curvature = if self.spec.reads(CURVATURE_CMD).is_some() {
            ctx.signals.read_f64(CURVATURE_CMD)?
        } else {
            state.curvature
        };
        let next = Self::integrate(&state, accel, curvature, ctx.own_params().max_velocity, ctx.dt_secs());
        Ok(vec![Intent::SetKinematics(next)])
    }
}
