//! Static description of a component: what the scheduler needs to know.

use ds_signal::{InputDecl, SignalName};

use crate::ComponentCategory;

/// Declared capabilities of one component instance.
///
/// Built with the fluent helpers:
///
/// ```rust
/// use ds_component::{ComponentCategory, ComponentSpec};
/// use ds_signal::InputDecl;
///
/// let spec = ComponentSpec::new("driver", ComponentCategory::Algorithm)
///     .cycle_ms(100)
///     .priority(10)
///     .input(InputDecl::fresh("front_gap"))
///     .output("accel_request");
/// assert!(spec.reads("front_gap").is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentSpec {
    pub name: String,
    pub category: ComponentCategory,
    /// Period in milliseconds.  Must be a non-zero multiple of the base
    /// resolution.
    pub cycle_time_ms: u32,
    /// Lower runs first among eligible components.
    pub priority: i32,
    pub inputs: Vec<InputDecl>,
    pub outputs: Vec<SignalName>,
}

impl ComponentSpec {
    /// A spec with a 100 ms cycle, priority 0 and no declared signals.
    pub fn new(name: impl Into<String>, category: ComponentCategory) -> Self {
        Self {
            name: name.into(),
            category,
            cycle_time_ms: 100,
            priority: 0,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn cycle_ms(mut self, ms: u32) -> Self {
        self.cycle_time_ms = ms;
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn input(mut self, decl: InputDecl) -> Self {
        self.inputs.push(decl);
        self
    }

    pub fn output(mut self, name: impl Into<SignalName>) -> Self {
        self.outputs.push(name.into());
        self
    }

    pub fn reads(&self, name: &str) -> Option<&InputDecl> {
        self.inputs.iter().find(|d| d.name.as_str() == name)
    }

    pub fn writes(&self, name: &str) -> bool {
        self.outputs.iter().any(|n| n.as_str() == name)
    }
}
