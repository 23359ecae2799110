//! State handed to components during `init` and `step`.

use ds_agent::{AgentStore, KinematicState, VehicleParams};
use ds_core::{AgentId, ScenarioEvent, StreamRng, Tick, WorldState};
use ds_signal::SignalPort;

/// Passed to [`Component::init`][crate::Component::init] once, when the
/// pipeline joins the schedule.
pub struct InitContext<'a> {
    pub agent:  AgentId,
    pub world:  &'a WorldState,
    pub params: &'a VehicleParams,
    pub state:  &'a KinematicState,
}

/// Everything that is shared by all steps of one tick.
///
/// `Copy`, so it can be handed to worker threads by value.
#[derive(Copy, Clone)]
pub struct TickFrame<'a> {
    pub tick: Tick,
    pub world: &'a WorldState,
    /// Agent state as of the start of the tick.
    pub agents: &'a AgentStore,
    /// Events detected on the previous tick.
    pub events: &'a [ScenarioEvent],
}

/// Per-step view: the shared frame plus this component's signal port and
/// random stream.
pub struct StepContext<'a> {
    pub tick: Tick,
    pub world: &'a WorldState,
    pub agent: AgentId,
    pub agents: &'a AgentStore,
    pub events: &'a [ScenarioEvent],
    pub signals: SignalPort<'a>,
    pub rng: &'a mut StreamRng,
}

impl<'a> StepContext<'a> {
    /// Seconds per tick.
    #[inline]
    pub fn dt_secs(&self) -> f64 {
        self.world.dt_secs()
    }

    #[inline]
    pub fn own_state(&self) -> &KinematicState {
        self.agents.state(self.agent)
    }

    #[inline]
    pub fn own_params(&self) -> &VehicleParams {
        self.agents.params_of(self.agent)
    }

    /// Events from the previous tick that name this agent or no agent at all.
    pub fn events_for_me(&self) -> impl Iterator<Item = &ScenarioEvent> {
        let agent = self.agent;
        self.events.iter().filter(move |e| e.concerns(agent))
    }
}
