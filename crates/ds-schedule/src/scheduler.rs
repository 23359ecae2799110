//! `Scheduler` — caches resolved orders across ticks.
//!
//! # Why caching is sound
//!
//! Whether a component is due depends only on `tick mod cycle_ticks`.  With
//! H the least common multiple of every live cycle period, ticks `t` and
//! `t + H` have exactly the same due set and therefore the same dependency
//! graph and the same order.  The cache maps `t mod H` to the resolved step
//! list and is thrown away whenever the set of scheduled pipelines changes
//! (spawn activation, halted pipeline).
//!
//! When H exceeds [`MAX_CACHED_PHASES`] caching is disabled until the next
//! invalidation and every tick is resolved from scratch.

use std::sync::Arc;

use ds_component::AgentPipeline;
use ds_core::Tick;
use tracing::debug;

use crate::{ExecutionPlan, ScheduleResult, ScheduledStep, resolve_plan};

/// Upper bound on the hyperperiod for which orders are cached.
pub const MAX_CACHED_PHASES: u64 = 3_600;

#[cfg(feature = "fx-hash")]
type PhaseMap = rustc_hash::FxHashMap<u64, Arc<[ScheduledStep]>>;
#[cfg(not(feature = "fx-hash"))]
type PhaseMap = std::collections::HashMap<u64, Arc<[ScheduledStep]>>;

enum CacheState {
    Cold,
    Warm { period: u64, orders: PhaseMap },
    Disabled,
}

pub struct Scheduler {
    cache: CacheState,
    generation: u64,
    hits: u64,
    misses: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { cache: CacheState::Cold, generation: 0, hits: 0, misses: 0 }
    }

    /// Forget all cached orders.  Call whenever a pipeline joins or leaves
    /// the schedule.
    pub fn invalidate(&mut self) {
        self.cache = CacheState::Cold;
        self.generation += 1;
    }

    /// Number of invalidations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cache_hits(&self) -> u64 {
        self.hits
    }

    pub fn cache_misses(&self) -> u64 {
        self.misses
    }

    /// The resolved plan for `tick`.
    ///
    /// `pipelines` must be the same set (in any order) on every call between
    /// two invalidations.
    pub fn plan(&mut self, tick: Tick, pipelines: &[&AgentPipeline]) -> ScheduleResult<ExecutionPlan> {
        if matches!(self.cache, CacheState::Cold) {
            self.cache = match hyperperiod(pipelines) {
                Some(period) if period <= MAX_CACHED_PHASES => {
                    debug!(period, generation = self.generation, "plan cache warmed");
                    CacheState::Warm { period, orders: PhaseMap::default() }
                }
                _ => {
                    debug!(generation = self.generation, "hyperperiod too long; plan cache disabled");
                    CacheState::Disabled
                }
            };
        }

        if let CacheState::Warm { period, orders } = &mut self.cache {
            let phase = tick.0 % *period;
            if let Some(steps) = orders.get(&phase) {
                self.hits += 1;
                return Ok(ExecutionPlan { tick, steps: Arc::clone(steps) });
            }
            self.misses += 1;
            let plan = resolve_plan(tick, pipelines)?;
            orders.insert(phase, Arc::clone(&plan.steps));
            return Ok(plan);
        }

        self.misses += 1;
        resolve_plan(tick, pipelines)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// LCM of every cycle period, or `None` on overflow.  An empty set has
/// period 1.
pub fn hyperperiod(pipelines: &[&AgentPipeline]) -> Option<u64> {
    pipelines
        .iter()
        .flat_map(|p| p.cycle_ticks())
        .try_fold(1u64, |acc, c| lcm(acc, c))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(a.max(b));
    }
    (a / gcd(a, b)).checked_mul(b)
}
