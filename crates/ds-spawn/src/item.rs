use ds_agent::{KinematicState, VehicleParams};
use ds_core::{AgentKind, SpawnItemId, Tick};

use crate::{SpawnError, SpawnResult};

/// Template for one agent that appears mid-run.  Never mutated once
/// authored; retries re-use the same item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnItem {
    pub id: SpawnItemId,
    /// Item this one was derived from, if any.
    pub reference: Option<SpawnItemId>,
    pub kind: AgentKind,
    pub params: VehicleParams,
    /// Initial kinematic state; `position` is the footprint centre.
    pub state: KinematicState,
    /// Tick on which the spawn is attempted.
    pub activation_tick: Tick,
}

impl SpawnItem {
    pub fn new(id: SpawnItemId, kind: AgentKind, state: KinematicState, activation_tick: Tick) -> Self {
        Self {
            id,
            reference: None,
            kind,
            params: VehicleParams::for_kind(kind),
            state,
            activation_tick,
        }
    }

    pub fn with_params(mut self, params: VehicleParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_reference(mut self, reference: SpawnItemId) -> Self {
        self.reference = Some(reference);
        self
    }

    /// # Errors
    ///
    /// [`SpawnError::Malformed`] for non-physical parameters, a non-finite
    /// state, a negative speed or a self reference.
    pub fn validate(&self) -> SpawnResult<()> {
        let malformed = |reason: String| SpawnError::Malformed { item: self.id, reason };
        self.params.validate().map_err(malformed)?;
        if !self.state.is_finite() {
            return Err(malformed("initial state is not finite".into()));
        }
        if self.state.velocity < 0.0 {
            return Err(malformed(format!("negative initial speed {}", self.state.velocity)));
        }
        if self.reference == Some(self.id) {
            return Err(malformed("item references itself".into()));
        }
        Ok(())
    }
}
