//! Fluent builder for constructing a [`Sim`].

use ds_agent::AgentStore;
use ds_collision::{CollisionConfig, CollisionDetector};
use ds_component::{AgentPipeline, Component, InitContext};
use ds_core::{AgentId, ExecutionMode, SimConfig, WorldInit, WorldState};
use ds_event::{EventBuffer, EventDetector};
use ds_result::RunResultAccumulator;
use ds_schedule::Scheduler;
use ds_signal::SignalBus;
use ds_spawn::{NoFactory, PipelineFactory, SpawnPoint};
use tracing::{info, warn};

use crate::{AbortHandle, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<F>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — resolution, horizon, seed, execution mode, …
/// - [`AgentStore`] — the initial population, from
///   [`ds_agent::AgentStoreBuilder`]
/// - one `Vec<Box<dyn Component>>` per initial agent, in agent id order
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                                   |
/// |-----------------------|-------------------------------------------|
/// | `.world(w)`           | `WorldInit::default()`                    |
/// | `.factory(f)`         | [`NoFactory`] (every spawn fails)         |
/// | `.spawn_point(p)`     | none                                      |
/// | `.events(d)`          | empty `EventDetector`                     |
/// | `.collision(c)`       | brute force, every overlapping tick       |
/// | `.abort_handle(h)`    | a fresh, private handle                   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, agents, pipelines)
///     .world(WorldInit { library_id: "highway".into(), ..Default::default() })
///     .factory(|item: &SpawnItem| Ok(standard_pipeline(item)))
///     .spawn_point(entry)
///     .events(EventDetector::new().terminate(OutOfBounds::new("exit", min, max)))
///     .build()?;
/// let result = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<F: PipelineFactory = NoFactory> {
    config:       SimConfig,
    world:        WorldInit,
    agents:       AgentStore,
    components:   Vec<Vec<Box<dyn Component>>>,
    factory:      F,
    spawn_points: Vec<SpawnPoint>,
    events:       EventDetector,
    collision:    CollisionConfig,
    abort:        Option<AbortHandle>,
}

impl SimBuilder<NoFactory> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:     SimConfig,
        agents:     AgentStore,
        components: Vec<Vec<Box<dyn Component>>>,
    ) -> Self {
        Self {
            config,
            world:        WorldInit::default(),
            agents,
            components,
            factory:      NoFactory,
            spawn_points: Vec::new(),
            events:       EventDetector::new(),
            collision:    CollisionConfig::default(),
            abort:        None,
        }
    }
}

impl<F: PipelineFactory> SimBuilder<F> {
    pub fn world(mut self, world: WorldInit) -> Self {
        self.world = world;
        self
    }

    /// Builds the pipelines of spawned agents.
    pub fn factory<G: PipelineFactory>(self, factory: G) -> SimBuilder<G> {
        SimBuilder {
            config:       self.config,
            world:        self.world,
            agents:       self.agents,
            components:   self.components,
            factory,
            spawn_points: self.spawn_points,
            events:       self.events,
            collision:    self.collision,
            abort:        self.abort,
        }
    }

    pub fn spawn_point(mut self, point: SpawnPoint) -> Self {
        self.spawn_points.push(point);
        self
    }

    pub fn events(mut self, detector: EventDetector) -> Self {
        self.events = detector;
        self
    }

    pub fn collision(mut self, config: CollisionConfig) -> Self {
        self.collision = config;
        self
    }

    /// Share an abort handle with another thread.
    pub fn abort_handle(mut self, handle: AbortHandle) -> Self {
        self.abort = Some(handle);
        self
    }

    /// Validate inputs, resolve and initialise every initial pipeline, and
    /// return a ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] for a zero base resolution.
    /// - [`SimError::AgentCountMismatch`] unless there is exactly one
    ///   component list per initial agent.
    /// - [`SimError::Pipeline`] if a pipeline does not resolve or a
    ///   component rejects its `init`.
    pub fn build(self) -> SimResult<Sim<F>> {
        let config = self.config;
        if config.base_resolution_ms == 0 {
            return Err(SimError::Config("base_resolution_ms must be positive".into()));
        }
        let agent_count = self.agents.count;
        if self.components.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.components.len(),
                what:     "component lists",
            });
        }
        if config.execution == ExecutionMode::Parallel && cfg!(not(feature = "parallel")) {
            warn!("parallel execution requested without the `parallel` feature; running serially");
        }

        let world = WorldState::new(self.world, config.horizon(), config.base_resolution_ms);

        // ── Resolve and initialise initial pipelines ──────────────────────
        let mut pipelines = Vec::with_capacity(agent_count);
        for (i, components) in self.components.into_iter().enumerate() {
            let agent = AgentId::try_from(i)
                .map_err(|_| SimError::Config(format!("agent index {i} out of range")))?;
            let mut pipeline =
                AgentPipeline::resolve(agent, components, config.base_resolution_ms, config.seed)?;
            pipeline.init(&InitContext {
                agent,
                world:  &world,
                params: self.agents.params_of(agent),
                state:  self.agents.state(agent),
            })?;
            pipelines.push(pipeline);
        }

        info!(
            agents = agent_count,
            horizon = config.horizon_ticks,
            resolution_ms = config.base_resolution_ms,
            seed = config.seed,
            library = %world.library_id,
            "simulation built"
        );

        Ok(Sim {
            clock:              config.make_clock(),
            results:            RunResultAccumulator::new(world.library_id.clone(), config.seed),
            signals:            SignalBus::with_agents(agent_count),
            config,
            world,
            agents:             self.agents,
            pipelines,
            awaiting:           Vec::new(),
            scheduler:          Scheduler::new(),
            detector:           CollisionDetector::new(self.collision),
            events:             self.events,
            event_buffer:       EventBuffer::new(),
            spawn_points:       self.spawn_points,
            factory:            self.factory,
            abort:              self.abort.unwrap_or_default(),
            termination:        None,
            outcome:            None,
            reported_fallbacks: Default::default(),
        })
    }
}
