use ds_core::ScenarioEvent;

/// Holds events until the tick after the one that produced them.
#[derive(Debug, Default)]
pub struct EventBuffer {
    pending: Vec<ScenarioEvent>,
    visible: Vec<ScenarioEvent>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue events produced on the current tick.
    pub fn push_all(&mut self, events: impl IntoIterator<Item = ScenarioEvent>) {
        self.pending.extend(events);
    }

    /// Events produced on the previous tick.
    pub fn visible(&self) -> &[ScenarioEvent] {
        &self.visible
    }

    pub fn pending(&self) -> &[ScenarioEvent] {
        &self.pending
    }

    /// Tick boundary: pending events become visible, the previously visible
    /// ones are dropped.
    pub fn rotate(&mut self) {
        self.visible = std::mem::take(&mut self.pending);
    }
}
