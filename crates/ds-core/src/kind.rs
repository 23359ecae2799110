//! Agent classification shared by spawning, collision and output crates.

/// What kind of road user an agent represents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[non_exhaustive]
pub enum AgentKind {
    #[default]
    Car,
    Truck,
    Motorbike,
    Bicycle,
    Pedestrian,
}

impl AgentKind {
    /// `true` for every motorised or pedalled vehicle.
    #[inline]
    pub fn is_vehicle(self) -> bool {
        !matches!(self, AgentKind::Pedestrian)
    }

    /// Lower-case label used in CSV columns and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Car        => "car",
            AgentKind::Truck      => "truck",
            AgentKind::Motorbike  => "motorbike",
            AgentKind::Bicycle    => "bicycle",
            AgentKind::Pedestrian => "pedestrian",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
