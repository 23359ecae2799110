//! Fluent builder for the initial agent population.
//!
//! # Usage
//!
//! ```rust
//! use ds_agent::{AgentStoreBuilder, KinematicState, VehicleParams};
//! use ds_core::{AgentKind, Vec2};
//!
//! let store = AgentStoreBuilder::new()
//!     .agent(AgentKind::Car, VehicleParams::passenger_car(),
//!            KinematicState::at(Vec2::new(0.0, 0.0), 0.0, 20.0))
//!     .agent(AgentKind::Pedestrian, VehicleParams::pedestrian(),
//!            KinematicState::at(Vec2::new(30.0, 4.0), 1.57, 1.2))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(store.live_count(), 2);
//! ```

use ds_core::{AgentKind, Tick};

use crate::{AgentStore, KinematicState, VehicleParams};

/// Collects the initial agents of a run.  All of them are live from tick 0.
#[derive(Default)]
pub struct AgentStoreBuilder {
    agents: Vec<(AgentKind, VehicleParams, KinematicState)>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agent(mut self, kind: AgentKind, params: VehicleParams, state: KinematicState) -> Self {
        self.agents.push((kind, params, state));
        self
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn build(self) -> AgentStore {
        let mut store = AgentStore::new();
        for (kind, params, state) in self.agents {
            let id = store.push_agent(kind, params, state, Tick::ZERO);
            store.activate(id);
        }
        store
    }
}
