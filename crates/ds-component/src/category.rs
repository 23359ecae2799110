use std::fmt;

/// Role of a component in an agent pipeline.
///
/// The declaration order is also the tie-break rank used by the scheduler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentCategory {
    Sensor,
    Algorithm,
    Action,
    Dynamics,
}

impl ComponentCategory {
    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentCategory::Sensor    => "sensor",
            ComponentCategory::Algorithm => "algorithm",
            ComponentCategory::Action    => "action",
            ComponentCategory::Dynamics  => "dynamics",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
