//! The `Component` trait — the extension point for behavior code.

use crate::{ComponentResult, ComponentSpec, InitContext, Intent, StepContext};

/// A unit of behavior attached to one agent.
///
/// A component instance is owned by exactly one [`AgentPipeline`]
/// (`crate::AgentPipeline`) and keeps its state for the pipeline's lifetime.
/// The scheduler only looks at [`spec`](Self::spec), which must not change
/// after the pipeline is resolved.
///
/// # Thread safety
///
/// With the `parallel` feature of `ds-sim`, different agents' pipelines are
/// stepped on different threads.  One component is only ever stepped by one
/// thread at a time, so `Send` is sufficient.
///
/// # Example
///
/// ```rust
/// use ds_component::{Component, ComponentCategory, ComponentResult, ComponentSpec,
///                    Intent, StepContext};
///
/// struct SpeedProbe { spec: ComponentSpec }
///
/// impl SpeedProbe {
///     fn new() -> Self {
///         Self { spec: ComponentSpec::new("speed_probe", ComponentCategory::Sensor)
///                    .output("speed") }
///     }
/// }
///
/// impl Component for SpeedProbe {
///     fn spec(&self) -> &ComponentSpec { &self.spec }
///
///     fn step(&mut self, ctx: &mut StepContext<'_>) -> ComponentResult<Vec<Intent>> {
///         let v = ctx.own_state().velocity;
///         ctx.signals.write("speed", v)?;
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    fn spec(&self) -> &ComponentSpec;

    /// Called once before the first step.  Default: nothing to do.
    fn init(&mut self, _ctx: &InitContext<'_>) -> ComponentResult<()> {
        Ok(())
    }

    /// Called on every tick the component is due, in resolved order.
    fn step(&mut self, ctx: &mut StepContext<'_>) -> ComponentResult<Vec<Intent>>;
}
