//! A component that does nothing.

use crate::{Component, ComponentCategory, ComponentResult, ComponentSpec, Intent, StepContext};

/// Steps without reading, writing or requesting anything.
///
/// Useful as a placeholder slot or for agents that merely occupy space.
pub struct NoopComponent {
    spec: ComponentSpec,
}

impl NoopComponent {
    pub fn new(name: &str, category: ComponentCategory) -> Self {
        Self { spec: ComponentSpec::new(name, category) }
    }

    pub fn with_spec(spec: ComponentSpec) -> Self {
        Self { spec }
    }
}

impl Component for NoopComponent {
    fn spec(&self) -> &ComponentSpec {
        &self.spec
    }

    fn step(&mut self, _ctx: &mut StepContext<'_>) -> ComponentResult<Vec<Intent>> {
        Ok(vec![])
    }
}
