use ds_agent::KinematicState;
use ds_core::{AgentId, Tick, Vec2};
use serde::{Deserialize, Serialize};

/// Kinematic snapshot of a collision partner plus the penetration depth.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionRecord {
    pub position: Vec2,
    pub yaw: f64,
    pub velocity: Vec2,
    /// Penetration depth in metres.
    pub distance: f64,
}

impl CollisionRecord {
    pub fn of_state(state: &KinematicState, distance: f64) -> Self {
        Self {
            position: state.position,
            yaw: state.yaw,
            velocity: state.velocity_vector(),
            distance,
        }
    }
}

/// One agent's collision on one tick.  `record` describes `other`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub tick: Tick,
    pub agent: AgentId,
    pub other: AgentId,
    pub record: CollisionRecord,
}
