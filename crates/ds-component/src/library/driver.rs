use ds_signal::InputDecl;

use super::signals::{ACCEL_REQUEST, FRONT_GAP, FRONT_SPEED};
use crate::{
    Component, ComponentCategory, ComponentError, ComponentResult, ComponentSpec, InitContext,
    Intent, StepContext,
};

/// Car following with the intelligent-driver model (IDM).
///
///   s* = s0 + v·T + v·Δv / (2·√(a·b))
///   a_req = a · (1 − (v / v0)^δ − (s* / s)²)
///
/// with `Δv = v − v_lead`.  `a` is the vehicle's maximum acceleration, read
/// in `init`.
pub struct CruiseDriver {
    spec:          ComponentSpec,
    desired_speed: f64,
    time_headway:  f64,
    min_gap:       f64,
    comfort_decel: f64,
    exponent:      f64,
    max_accel:     f64,
}

impl CruiseDriver {
    pub fn new(desired_speed: f64) -> Self {
        Self {
            spec: ComponentSpec::new("cruise_driver", ComponentCategory::Algorithm)
                .input(InputDecl::fresh(FRONT_GAP))
                .input(InputDecl::fresh(FRONT_SPEED))
                .output(ACCEL_REQUEST),
            desired_speed,
            time_headway:  1.5,
            min_gap:       2.0,
            comfort_decel: 2.0,
            exponent:      4.0,
            max_accel:     1.5,
        }
    }

    pub fn with_headway(mut self, seconds: f64, min_gap: f64) -> Self {
        self.time_headway = seconds;
        self.min_gap = min_gap;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.spec.priority = priority;
        self
    }

    /// Requested acceleration for own speed `v`, gap `s` and leader speed.
    pub fn idm_accel(&self, v: f64, gap: f64, lead_speed: f64) -> f64 {
        let dv = v - lead_speed;
        let interaction = (self.max_accel * self.comfort_decel).sqrt();
        let s_star = (self.min_gap + v * self.time_headway + v * dv / (2.0 * interaction)).max(self.min_gap);
        let free = (v / self.desired_speed).powf(self.exponent);
        let s = gap.max(0.1);
        self.max_accel * (1.0 - free - (s_star / s).powi(2))
    }
}

impl Component for CruiseDriver {
    fn spec(&self) -> &ComponentSpec {
        &self.spec
    }

    fn init(&mut self, ctx: &InitContext<'_>) -> ComponentResult<()> {
        if !(self.desired_speed.is_finite() && self.desired_speed > 0.0) {
            return Err(ComponentError::Config(format!(
                "desired speed must be positive, got {}",
                self.desired_speed
            )));
        }
        if ctx.params.max_acceleration > 0.0 {
            self.max_accel = ctx.params.max_acceleration;
        }
        Ok(())
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> ComponentResult<Vec<Intent>> {
        let gap = ctx.signals.read_f64(FRONT_GAP)?;
        let lead_speed = ctx.signals.read_f64(FRONT_SPEED)?;
        let v = ctx.own_state().velocity;
        ctx.signals.write(ACCEL_REQUEST, self.idm_accel(v, gap, lead_speed))?;
        Ok(vec![])
    }
}
