//! The `Sim` struct and its tick loop.

use std::collections::BTreeSet;

use ds_agent::AgentStore;
use ds_collision::{CollisionDetector, CollisionReport};
use ds_component::{
    AgentPipeline, ComponentCategory, ComponentError, ComponentResult, InitContext, Intent,
    SlotOutput, TickFrame,
};
use ds_core::{
    AgentId, SignalErrorPolicy, SimClock, SimConfig, TerminationCause, Tick, WorldState,
};
use ds_event::{DetectionContext, EventBuffer, EventDetector};
use ds_result::{CollisionRecord, Occurrence, RunResult, RunResultAccumulator, RunStatus};
use ds_schedule::{ExecutionPlan, Scheduler};
use ds_signal::{SignalBus, SignalPartition};
use ds_spawn::{PipelineFactory, SpawnPoint};
use tracing::{debug, error, info, trace, warn};

use crate::{AbortHandle, SimError, SimObserver, SimResult, TickStats};

/// Result of one scheduled step; `None` if the step was skipped because an
/// earlier step of the same agent failed on this tick.
type StepOutcome = Option<ComponentResult<SlotOutput>>;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  See the crate docs for the
/// phases of a tick.
pub struct Sim<F: PipelineFactory> {
    pub config: SimConfig,

    /// Tracks the current tick.
    pub clock: SimClock,

    /// Read-shared world context.  Written only at the tick boundary.
    pub world: WorldState,

    /// Agent state (SoA arrays).  Components see it read-only; kinematics
    /// change only in the apply phase.
    pub agents: AgentStore,

    /// Per-agent signal partitions.
    pub signals: SignalBus,

    /// Indexed by `AgentId`.
    pub(crate) pipelines: Vec<AgentPipeline>,

    /// Spawned agents waiting for their first tick, in spawn order.
    pub(crate) awaiting: Vec<AgentId>,

    pub(crate) scheduler: Scheduler,
    pub(crate) detector: CollisionDetector,
    pub(crate) events: EventDetector,
    pub(crate) event_buffer: EventBuffer,
    pub(crate) spawn_points: Vec<SpawnPoint>,
    pub(crate) factory: F,
    pub(crate) results: RunResultAccumulator,
    pub(crate) abort: AbortHandle,

    /// First termination raised on the current tick.
    pub(crate) termination: Option<TerminationCause>,

    /// Set once the run has ended.
    pub(crate) outcome: Option<RunStatus>,

    /// `(agent, slot, signal)` triples whose default fallback was already
    /// written to the run log.
    pub(crate) reported_fallbacks: BTreeSet<(AgentId, usize, String)>,
}

impl<F: PipelineFactory> Sim<F> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the horizon, a termination, an abort or a fatal error, and
    /// return the finalized result.
    ///
    /// # Errors
    ///
    /// The fatal [`SimError`].  The result has still been finalized with
    /// status `Failed` and handed to the observer; it is available through
    /// [`result`](Self::result).
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunResult> {
        self.run_ticks(u64::MAX, observer)?;
        Ok(self.finish(observer))
    }

    /// Process at most `n` ticks.  Stops early once the run has ended.
    /// Does not finalize the result unless a fatal error occurs.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.outcome.is_some() {
                break;
            }
            if self.abort.is_aborted() {
                info!(tick = %self.clock.current_tick, "run aborted");
                self.outcome = Some(RunStatus::Aborted);
                break;
            }
            let now = self.clock.current_tick;
            if now >= self.config.horizon() {
                self.outcome = Some(RunStatus::Completed);
                break;
            }

            observer.on_tick_start(now);
            let stats = match self.process_tick(now) {
                Ok(stats) => stats,
                Err(e) => {
                    let diagnostic = e.diagnostic();
                    error!(%now, "{diagnostic}");
                    self.outcome = Some(RunStatus::Failed { diagnostic });
                    self.finish(observer);
                    return Err(e);
                }
            };
            observer.on_tick_end(&stats);
            let interval = self.config.snapshot_interval_ticks;
            if interval > 0 && now.0 % interval == 0 {
                observer.on_snapshot(now, &self.agents);
            }

            self.commit_tick();

            if let Some(cause) = self.termination.take() {
                info!(%now, %cause, "run terminated");
                self.log(Occurrence::Termination { tick: now, cause: cause.clone() });
                self.outcome = Some(RunStatus::Terminated { cause });
            } else if self.clock.current_tick >= self.config.horizon() {
                info!(tick = %self.clock.current_tick, "horizon reached");
                self.outcome = Some(RunStatus::Completed);
            }
        }
        Ok(())
    }

    /// Finalize the run result and hand it to the observer.
    ///
    /// A run stopped before it ended is reported as `Aborted`.  Calling this
    /// again returns the same result and does not notify the observer twice.
    pub fn finish<O: SimObserver>(&mut self, observer: &mut O) -> RunResult {
        let first = !self.results.is_finalized();
        let status = self.outcome.clone().unwrap_or(RunStatus::Aborted);
        let result = self.results.finalize(self.clock.current_tick, status).clone();
        if first {
            observer.on_sim_end(&result);
        }
        result
    }

    /// The finalized result, once the run has been finished.
    pub fn result(&self) -> Option<&RunResult> {
        self.results.result()
    }

    pub fn results(&self) -> &RunResultAccumulator {
        &self.results
    }

    /// How the run ended, if it has.
    pub fn outcome(&self) -> Option<&RunStatus> {
        self.outcome.as_ref()
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    pub fn pipeline(&self, agent: AgentId) -> Option<&AgentPipeline> {
        self.pipelines.get(agent.index())
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Events raised on the previous tick, as components see them now.
    pub fn visible_events(&self) -> &[ds_core::ScenarioEvent] {
        self.event_buffer.visible()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<TickStats> {
        let mut stats = TickStats { tick: now, ..TickStats::default() };

        // ── Phase 1: activate agents spawned on an earlier tick ───────────
        self.activate_due(now)?;

        // ── Phase 2: spawn (inactive until now + 1) ───────────────────────
        stats.spawned = self.process_spawns(now)?;
        stats.live_agents = self.agents.live_count();

        // ── Phase 3: plan ─────────────────────────────────────────────────
        let plan = {
            let scheduled: Vec<&AgentPipeline> = self
                .pipelines
                .iter()
                .filter(|p| !p.is_halted() && self.agents.is_live(p.agent()))
                .collect();
            self.scheduler.plan(now, &scheduled)?
        };

        // ── Phase 4: step ─────────────────────────────────────────────────
        let outcomes = self.execute(now, &plan);

        // ── Phase 5: apply, in plan order ─────────────────────────────────
        self.apply(now, &plan, outcomes, &mut stats)?;

        // ── Phase 6: collisions ───────────────────────────────────────────
        let report = self.detector.detect(now, &self.agents);
        stats.contacts = report.contacts.len();
        stats.collisions = self.record_collisions(now, &report)?;

        // ── Phase 7: events ───────────────────────────────────────────────
        let raised = self.events.detect(&DetectionContext {
            tick:       now,
            world:      &self.world,
            agents:     &self.agents,
            collisions: &report,
        });
        stats.events = raised.len();
        for event in &raised {
            if event.terminates && self.termination.is_none() {
                self.termination = Some(TerminationCause::Event {
                    name:   event.name.clone(),
                    agents: event.agents.clone(),
                });
            }
            self.log(Occurrence::Event(event.clone()));
        }
        self.event_buffer.push_all(raised);

        debug!(
            %now,
            steps = stats.steps,
            live = stats.live_agents,
            contacts = stats.contacts,
            events = stats.events,
            "tick done"
        );
        Ok(stats)
    }

    /// Tick boundary.
    fn commit_tick(&mut self) {
        self.world.commit_tick();
        self.clock.advance();
        self.event_buffer.rotate();
    }

    fn activate_due(&mut self, now: Tick) -> SimResult<()> {
        if self.awaiting.is_empty() {
            return Ok(());
        }
        let (due, later): (Vec<AgentId>, Vec<AgentId>) = self
            .awaiting
            .iter()
            .partition(|&&a| self.agents.active_from[a.index()] <= now);
        self.awaiting = later;
        if due.is_empty() {
            return Ok(());
        }

        for agent in due {
            let pipeline = self
                .pipelines
                .get_mut(agent.index())
                .ok_or_else(|| SimError::Config(format!("{agent} has no pipeline")))?;
            pipeline.init(&InitContext {
                agent,
                world:  &self.world,
                params: self.agents.params_of(agent),
                state:  self.agents.state(agent),
            })?;
            self.agents.activate(agent);
            debug!(%now, %agent, "agent activated");
        }
        self.scheduler.invalidate();
        Ok(())
    }

    /// Returns the number of agents created.
    fn process_spawns(&mut self, now: Tick) -> SimResult<usize> {
        let mut created = 0;
        let mut log = Vec::new();
        for point in &mut self.spawn_points {
            let outcome = point
                .process(
                    now,
                    &mut self.agents,
                    &mut self.factory,
                    self.config.base_resolution_ms,
                    self.config.seed,
                )
                .map_err(|source| SimError::Spawn { tick: now, source })?;

            for spawned in outcome.spawned {
                if spawned.agent.index() != self.pipelines.len() {
                    return Err(SimError::Config(format!(
                        "{} spawned out of order ({} pipelines)",
                        spawned.agent,
                        self.pipelines.len()
                    )));
                }
                self.signals.ensure_agent(spawned.agent);
                self.pipelines.push(spawned.pipeline);
                self.awaiting.push(spawned.agent);
                log.push(Occurrence::Spawned { tick: now, item: spawned.item, agent: spawned.agent });
                created += 1;
            }
            for failure in outcome.failures {
                log.push(Occurrence::SpawnFailure {
                    tick:    now,
                    item:    failure.error.item(),
                    reason:  failure.error.to_string(),
                    dropped: failure.dropped,
                });
            }
        }
        for occurrence in log {
            self.log(occurrence);
        }
        Ok(created)
    }

    // ── Step phase ────────────────────────────────────────────────────────

    /// Run every step of `plan`.  Outcomes are indexed by plan position.
    fn execute(&mut self, now: Tick, plan: &ExecutionPlan) -> Vec<StepOutcome> {
        let frame = TickFrame {
            tick:   now,
            world:  &self.world,
            agents: &self.agents,
            events: self.event_buffer.visible(),
        };
        let pipelines = &mut self.pipelines;
        let partitions = self.signals.partitions_mut();

        #[cfg(feature = "parallel")]
        {
            if self.config.execution == ds_core::ExecutionMode::Parallel {
                return execute_parallel(plan, &frame, pipelines, partitions);
            }
        }

        execute_serial(plan, &frame, pipelines, partitions)
    }

    // ── Apply phase ───────────────────────────────────────────────────────

    fn apply(
        &mut self,
        now:      Tick,
        plan:     &ExecutionPlan,
        outcomes: Vec<StepOutcome>,
        stats:    &mut TickStats,
    ) -> SimResult<()> {
        for (step, outcome) in plan.iter().zip(outcomes) {
            let Some(outcome) = outcome else { continue };
            let agent = step.agent;
            let component = self.pipelines[agent.index()].component_name(step.slot).to_owned();

            match outcome {
                Ok(output) => {
                    stats.steps += 1;
                    stats.fallbacks += output.fallbacks.len();
                    for signal in output.fallbacks {
                        let key = (agent, step.slot, signal.as_str().to_owned());
                        if self.reported_fallbacks.insert(key) {
                            self.log(Occurrence::Diagnostic {
                                tick:      now,
                                agent:     Some(agent),
                                component: Some(component.clone()),
                                message:   format!("`{signal}` resolved to its default"),
                            });
                        }
                    }
                    for intent in output.intents {
                        self.apply_intent(now, agent, step.category, &component, intent);
                    }
                }
                Err(ComponentError::Signal(source)) => match self.config.signal_error_policy {
                    SignalErrorPolicy::HaltPipeline => {
                        warn!(%now, %agent, %component, "{source}; pipeline halted");
                        self.pipelines[agent.index()].halt();
                        self.scheduler.invalidate();
                        stats.halted += 1;
                        self.log(Occurrence::PipelineHalted {
                            tick: now,
                            agent,
                            component,
                            reason: source.to_string(),
                        });
                    }
                    SignalErrorPolicy::AbortRun => {
                        return Err(SimError::Signal { tick: now, agent, component, source });
                    }
                },
                Err(source) => {
                    return Err(SimError::Component { tick: now, agent, component, source });
                }
            }
        }
        Ok(())
    }

    fn apply_intent(
        &mut self,
        now:       Tick,
        agent:     AgentId,
        category:  ComponentCategory,
        component: &str,
        intent:    Intent,
    ) {
        match intent {
            Intent::SetKinematics(state) => {
                if category != ComponentCategory::Dynamics {
                    warn!(%now, %agent, component, "kinematics set by a {category} component ignored");
                    self.log(Occurrence::Diagnostic {
                        tick:      now,
                        agent:     Some(agent),
                        component: Some(component.to_owned()),
                        message:   format!("{category} component may not set kinematics"),
                    });
                } else if !state.is_finite() {
                    warn!(%now, %agent, component, "non-finite kinematic state ignored");
                    self.log(Occurrence::Diagnostic {
                        tick:      now,
                        agent:     Some(agent),
                        component: Some(component.to_owned()),
                        message:   "non-finite kinematic state ignored".into(),
                    });
                } else {
                    self.agents.kinematics[agent.index()] = state;
                }
            }
            Intent::Terminate { reason } => {
                if self.termination.is_none() {
                    self.termination = Some(TerminationCause::Component {
                        agent,
                        component: component.to_owned(),
                        reason,
                    });
                }
            }
            Intent::Record(text) => {
                self.log(Occurrence::Note { tick: now, agent, text });
            }
        }
    }

    // ── Collisions ────────────────────────────────────────────────────────

    /// Returns the number of records added.
    fn record_collisions(&mut self, now: Tick, report: &CollisionReport) -> SimResult<usize> {
        let mut added = 0;
        for rep in &report.representatives {
            let record = CollisionRecord::of_state(self.agents.state(rep.other), rep.penetration);
            match self.results.add_collision_agent(now, rep.agent, rep.other, record) {
                Ok(()) => added += 1,
                Err(ds_result::ResultError::DuplicateCollisionRecord { agent, tick }) => {
                    warn!(%tick, %agent, other = %rep.other, "duplicate collision record dropped");
                    self.log(Occurrence::Diagnostic {
                        tick,
                        agent:     Some(agent),
                        component: None,
                        message:   format!("duplicate collision record with {} dropped", rep.other),
                    });
                }
                Err(e) => {
                    return Err(SimError::Collision { tick: now, reason: e.to_string() });
                }
            }
        }
        Ok(added)
    }

    fn log(&mut self, occurrence: Occurrence) {
        if let Err(e) = self.results.record(occurrence) {
            warn!("run log entry dropped: {e}");
        }
    }
}

// ── Step executors ────────────────────────────────────────────────────────────

/// One step at a time in plan order.
fn execute_serial(
    plan:       &ExecutionPlan,
    frame:      &TickFrame<'_>,
    pipelines:  &mut [AgentPipeline],
    partitions: &mut [SignalPartition],
) -> Vec<StepOutcome> {
    let mut failed: BTreeSet<AgentId> = BTreeSet::new();
    plan.iter()
        .map(|step| {
            if failed.contains(&step.agent) {
                return None;
            }
            let i = step.agent.index();
            trace!(tick = %frame.tick, agent = %step.agent, slot = step.slot, "step");
            let outcome = pipelines[i].step_slot(step.slot, frame, &mut partitions[i]);
            if outcome.is_err() {
                failed.insert(step.agent);
            }
            Some(outcome)
        })
        .collect()
}

/// Each agent's steps on its own task, merged back into plan order.
///
/// Steps only touch their own agent's pipeline and signal partition and read
/// the frozen start-of-tick store, so the outcome equals serial execution.
#[cfg(feature = "parallel")]
fn execute_parallel(
    plan:       &ExecutionPlan,
    frame:      &TickFrame<'_>,
    pipelines:  &mut [AgentPipeline],
    partitions: &mut [SignalPartition],
) -> Vec<StepOutcome> {
    use rayon::prelude::*;

    // Disjoint &mut per scheduled agent, in ascending agent order.
    let mut groups = plan.by_agent().into_iter().peekable();
    let mut work: Vec<(&mut AgentPipeline, &mut SignalPartition, Vec<usize>)> = Vec::new();
    for (i, (pipeline, partition)) in pipelines.iter_mut().zip(partitions.iter_mut()).enumerate() {
        if let Some((_, indices)) = groups.next_if(|(agent, _)| agent.index() == i) {
            work.push((pipeline, partition, indices));
        }
    }

    let per_agent: Vec<Vec<(usize, ComponentResult<SlotOutput>)>> = work
        .into_par_iter()
        .map(|(pipeline, partition, indices)| {
            let mut done = Vec::with_capacity(indices.len());
            for idx in indices {
                let outcome = pipeline.step_slot(plan.steps[idx].slot, frame, partition);
                let stop = outcome.is_err();
                done.push((idx, outcome));
                if stop {
                    break;
                }
            }
            done
        })
        .collect();

    let mut outcomes: Vec<StepOutcome> = (0..plan.len()).map(|_| None).collect();
    for (idx, outcome) in per_agent.into_iter().flatten() {
        outcomes[idx] = Some(outcome);
    }
    outcomes
}
