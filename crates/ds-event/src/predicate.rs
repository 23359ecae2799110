//! The `Predicate` trait and the standard predicates.

use ds_agent::AgentStore;
use ds_collision::CollisionReport;
use ds_core::{AgentId, Tick, Vec2, WorldState};

/// What a predicate may look at: the world and agents after this tick's
/// intents were applied, and this tick's collision report.
#[derive(Copy, Clone)]
pub struct DetectionContext<'a> {
    pub tick:       Tick,
    pub world:      &'a WorldState,
    pub agents:     &'a AgentStore,
    pub collisions: &'a CollisionReport,
}

/// A scenario condition evaluated once per tick.
///
/// `evaluate` returns `None` while the condition is false.  When it holds it
/// returns the agents it holds for, in ascending order, or an empty `Vec` for
/// a world-level condition.
pub trait Predicate: Send + 'static {
    fn name(&self) -> &str;

    fn evaluate(&self, ctx: &DetectionContext<'_>) -> Option<Vec<AgentId>>;
}

/// `Some(agents)` if `agents` is non-empty.
fn holds_for(agents: Vec<AgentId>) -> Option<Vec<AgentId>> {
    if agents.is_empty() { None } else { Some(agents) }
}

// ── TickReached ───────────────────────────────────────────────────────────────

/// Holds from `tick` onwards.
pub struct TickReached {
    name: String,
    tick: Tick,
}

impl TickReached {
    pub fn new(name: impl Into<String>, tick: Tick) -> Self {
        Self { name: name.into(), tick }
    }
}

impl Predicate for TickReached {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>) -> Option<Vec<AgentId>> {
        (ctx.tick >= self.tick).then(Vec::new)
    }
}

// ── OutOfBounds ───────────────────────────────────────────────────────────────

/// Holds for every live agent whose reference point lies outside the
/// axis-aligned scenario bounds.
pub struct OutOfBounds {
    name: String,
    min: Vec2,
    max: Vec2,
}

impl OutOfBounds {
    pub fn new(name: impl Into<String>, min: Vec2, max: Vec2) -> Self {
        Self { name: name.into(), min, max }
    }

    fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

impl Predicate for OutOfBounds {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>) -> Option<Vec<AgentId>> {
        holds_for(
            ctx.agents
                .live_ids()
                .filter(|&a| !self.contains(ctx.agents.state(a).position))
                .collect(),
        )
    }
}

// ── SpeedAbove ────────────────────────────────────────────────────────────────

/// Holds for every live agent driving faster than `threshold` m/s.
pub struct SpeedAbove {
    name: String,
    threshold: f64,
}

impl SpeedAbove {
    pub fn new(name: impl Into<String>, threshold: f64) -> Self {
        Self { name: name.into(), threshold }
    }
}

impl Predicate for SpeedAbove {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>) -> Option<Vec<AgentId>> {
        holds_for(
            ctx.agents
                .live_ids()
                .filter(|&a| ctx.agents.state(a).velocity.abs() > self.threshold)
                .collect(),
        )
    }
}

// ── CollisionOccurred ─────────────────────────────────────────────────────────

/// Holds for every agent with a collision on this tick.
pub struct CollisionOccurred {
    name: String,
}

impl CollisionOccurred {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Predicate for CollisionOccurred {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>) -> Option<Vec<AgentId>> {
        holds_for(ctx.collisions.representatives.iter().map(|r| r.agent).collect())
    }
}

// ── PredicateFn ───────────────────────────────────────────────────────────────

/// A predicate backed by a closure.
pub struct PredicateFn<F> {
    name: String,
    f: F,
}

impl<F> PredicateFn<F>
where
    F: Fn(&DetectionContext<'_>) -> Option<Vec<AgentId>> + Send + 'static,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> Predicate for PredicateFn<F>
where
    F: Fn(&DetectionContext<'_>) -> Option<Vec<AgentId>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &DetectionContext<'_>) -> Option<Vec<AgentId>> {
        (self.f)(ctx)
    }
}
