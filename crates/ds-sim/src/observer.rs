//! Simulation observer trait for progress reporting and data collection.

use ds_agent::AgentStore;
use ds_core::Tick;
use ds_result::RunResult;

/// Counters for one completed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub tick: Tick,
    /// Components stepped successfully.
    pub steps: usize,
    pub live_agents: usize,
    /// Agents created by spawn points this tick (active from the next).
    pub spawned: usize,
    /// Overlapping pairs.
    pub contacts: usize,
    /// Collision records added to the result.
    pub collisions: usize,
    pub events: usize,
    /// Signal reads resolved to a declared default.
    pub fallbacks: usize,
    /// Pipelines halted this tick.
    pub halted: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, stats: &TickStats) {
///         if stats.tick.0 % self.interval == 0 {
///             println!("{}: {} steps, {} contacts", stats.tick, stats.steps, stats.contacts);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after collisions and events of the tick were recorded, before
    /// the world is committed.
    fn on_tick_end(&mut self, _stats: &TickStats) {}

    /// Called every `config.snapshot_interval_ticks` ticks with the agent
    /// state after the tick's intents were applied.  Read-only export; the
    /// simulation never reads anything back.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Called once with the finalized result, however the run ended.
    fn on_sim_end(&mut self, _result: &RunResult) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
