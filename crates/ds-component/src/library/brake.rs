use tracing::debug;

use super::signals::BRAKE_REQUEST;
use crate::{Component, ComponentCategory, ComponentResult, ComponentSpec, Intent, StepContext};

/// Scripted reaction: once an event named `trigger` concerning this agent has
/// been seen, request `deceleration` for the rest of the run.
///
/// Writes `0.0` to `brake_request` until triggered, `-deceleration` after.
pub struct EventTriggeredBrake {
    spec:         ComponentSpec,
    trigger:      String,
    deceleration: f64,
    latched:      bool,
}

impl EventTriggeredBrake {
    pub fn new(trigger: impl Into<String>, deceleration: f64) -> Self {
        Self {
            spec: ComponentSpec::new("event_brake", ComponentCategory::Algorithm)
                .priority(5)
                .output(BRAKE_REQUEST),
            trigger: trigger.into(),
            deceleration: deceleration.abs(),
            latched: false,
        }
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }
}

impl Component for EventTriggeredBrake {
    fn spec(&self) -> &ComponentSpec {
        &self.spec
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> ComponentResult<Vec<Intent>> {
        let mut intents = Vec::new();
        if !self.latched && ctx.events_for_me().any(|e| e.name == self.trigger) {
            self.latched = true;
            debug!(agent = %ctx.agent, tick = %ctx.tick, trigger = %self.trigger, "brake latched");
            intents.push(Intent::Record(format!(
                "{} brakes on `{}` at {}",
                ctx.agent, self.trigger, ctx.tick
            )));
        }
        let request = if self.latched { -self.deceleration } else { 0.0 };
        ctx.signals.write(BRAKE_REQUEST, request)?;
        Ok(intents)
    }
}
