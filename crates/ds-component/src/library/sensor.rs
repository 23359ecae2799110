use ds_signal::SignalValue;

use super::signals::{FRONT_GAP, FRONT_SPEED};
use crate::{Component, ComponentCategory, ComponentResult, ComponentSpec, Intent, StepContext};

/// Measures the bumper-to-bumper gap to the nearest live agent ahead and that
/// agent's speed along our heading.
///
/// An agent counts as "ahead" when its centre lies in front of ours and
/// within `lateral_tolerance` of our centreline.  With nobody in range the
/// sensor reports `range` as gap and our own speed, which a car-following
/// model reads as free road.  The gap is perturbed with Gaussian noise of
/// `noise_std` metres drawn from the component's own stream.
pub struct FrontSensor {
    spec:              ComponentSpec,
    range:             f64,
    lateral_tolerance: f64,
    noise_std:         f64,
}

impl FrontSensor {
    pub fn new(range: f64, lateral_tolerance: f64) -> Self {
        Self {
            spec: ComponentSpec::new("front_sensor", ComponentCategory::Sensor)
                .output(FRONT_GAP)
                .output(FRONT_SPEED),
            range,
            lateral_tolerance,
            noise_std: 0.0,
        }
    }

    pub fn with_noise(mut self, std_dev: f64) -> Self {
        self.noise_std = std_dev;
        self
    }

    pub fn with_cycle_ms(mut self, ms: u32) -> Self {
        self.spec.cycle_time_ms = ms;
        self
    }
}

impl Default for FrontSensor {
    fn default() -> Self {
        Self::new(150.0, 2.0)
    }
}

impl Component for FrontSensor {
    fn spec(&self) -> &ComponentSpec {
        &self.spec
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> ComponentResult<Vec<Intent>> {
        let me = *ctx.own_state();
        let my_half = ctx.own_params().half_length();
        let heading = me.heading();
        let lateral_axis = heading.perp();

        let mut best: Option<(f64, f64)> = None;
        for other in ctx.agents.live_ids().filter(|&a| a != ctx.agent) {
            let state = ctx.agents.state(other);
            let rel = state.position - me.position;
            let along = rel.dot(heading);
            if along <= 0.0 || rel.dot(lateral_axis).abs() > self.lateral_tolerance {
                continue;
            }
            let gap = (along - my_half - ctx.agents.params_of(other).half_length()).max(0.0);
            if gap > self.range {
                continue;
            }
            if best.is_none_or(|(g, _)| gap < g) {
                best = Some((gap, state.velocity_vector().dot(heading)));
            }
        }

        let (gap, speed) = best.unwrap_or((self.range, me.velocity));
        let noisy_gap = (gap + ctx.rng.normal(0.0, self.noise_std)).max(0.0);

        ctx.signals.write(FRONT_GAP, SignalValue::Float(noisy_gap))?;
        ctx.signals.write(FRONT_SPEED, SignalValue::Float(speed))?;
        Ok(vec![])
    }
}
