use ds_signal::InputDecl;

use super::signals::{ACCEL_CMD, ACCEL_REQUEST, BRAKE_REQUEST};
use crate::{Component, ComponentCategory, ComponentResult, ComponentSpec, Intent, StepContext};

/// Arbitrates driver and brake requests into one acceleration command and
/// clamps it to the vehicle's limits.
///
/// A negative brake request overrides any larger driver request.  Both inputs
/// default to zero, so the actuator also works in pipelines that lack one of
/// the producers.
pub struct Actuator {
    spec: ComponentSpec,
}

impl Actuator {
    pub fn new() -> Self {
        Self {
            spec: ComponentSpec::new("actuator", ComponentCategory::Action)
                .input(InputDecl::fresh(ACCEL_REQUEST).or_default(0.0))
                .input(InputDecl::fresh(BRAKE_REQUEST).or_default(0.0))
                .output(ACCEL_CMD),
        }
    }
}

impl Default for Actuator {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Actuator {
    fn spec(&self) -> &ComponentSpec {
        &self.spec
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> ComponentResult<Vec<Intent>> {
        let requested = ctx.signals.read_f64(ACCEL_REQUEST)?;
        let brake = ctx.signals.read_f64(BRAKE_REQUEST)?;
        let wanted = if brake < 0.0 { requested.min(brake) } else { requested };

        let params = ctx.own_params();
        let cmd = wanted.clamp(-params.max_deceleration, params.max_acceleration);
        ctx.signals.write(ACCEL_CMD, cmd)?;
        Ok(vec![])
    }
}
