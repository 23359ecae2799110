//! Plain data row types written by output backends.

use ds_agent::AgentStore;
use ds_core::{AgentId, Tick};
use ds_result::{CollisionEvent, Occurrence};
use serde::Serialize;

/// One agent's kinematic state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick:     u64,
    /// Simulated milliseconds since the run started.
    pub time_ms:  u64,
    pub kind:     &'static str,
    pub live:     bool,
    pub x:        f64,
    pub y:        f64,
    pub yaw:      f64,
    pub velocity: f64,
}

impl AgentSnapshotRow {
    /// One row per agent ever created, in id order.
    pub fn all(tick: Tick, time_ms: u64, agents: &AgentStore) -> Vec<Self> {
        agents
            .agent_ids()
            .map(|id| {
                let i = id.index();
                let state = &agents.kinematics[i];
                Self {
                    agent_id: id.0,
                    tick: tick.0,
                    time_ms,
                    kind: agents.kind[i].as_str(),
                    live: agents.live[i],
                    x: state.position.x,
                    y: state.position.y,
                    yaw: state.yaw,
                    velocity: state.velocity,
                }
            })
            .collect()
    }
}

/// Counters for one completed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickSummaryRow {
    pub tick:        u64,
    pub steps:       u64,
    pub live_agents: u64,
    pub spawned:     u64,
    pub collisions:  u64,
    pub events:      u64,
}

/// One agent's collision record.  The kinematic fields describe `other_id`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollisionRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub other_id: u32,
    pub x:        f64,
    pub y:        f64,
    pub yaw:      f64,
    pub vx:       f64,
    pub vy:       f64,
    /// Penetration depth in metres.
    pub distance: f64,
}

impl From<&CollisionEvent> for CollisionRow {
    fn from(c: &CollisionEvent) -> Self {
        Self {
            tick:     c.tick.0,
            agent_id: c.agent.0,
            other_id: c.other.0,
            x:        c.record.position.x,
            y:        c.record.position.y,
            yaw:      c.record.yaw,
            vx:       c.record.velocity.x,
            vy:       c.record.velocity.y,
            distance: c.record.distance,
        }
    }
}

/// A run-log entry flattened to four columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRow {
    pub tick:   u64,
    pub kind:   &'static str,
    /// Agent ids joined with `;`.
    pub agents: String,
    pub detail: String,
}

impl From<&Occurrence> for LogRow {
    fn from(o: &Occurrence) -> Self {
        let detail = match o {
            Occurrence::Event(e) if e.terminates => format!("{} (terminates)", e.name),
            Occurrence::Event(e) => e.name.clone(),
            Occurrence::Spawned { item, agent, .. } => format!("{item} -> {agent}"),
            Occurrence::SpawnFailure { item, reason, dropped, .. } => {
                format!("{item}: {reason}{}", if *dropped { " (dropped)" } else { "" })
            }
            Occurrence::PipelineHalted { component, reason, .. } => format!("{component}: {reason}"),
            Occurrence::Note { text, .. } => text.clone(),
            Occurrence::Diagnostic { component: Some(component), message, .. } => {
                format!("{component}: {message}")
            }
            Occurrence::Diagnostic { message, .. } => message.clone(),
            Occurrence::Termination { cause, .. } => cause.to_string(),
        };
        Self {
            tick: o.tick().0,
            kind: o.kind(),
            agents: join_ids(&o.agents()),
            detail,
        }
    }
}

fn join_ids(ids: &[AgentId]) -> String {
    ids.iter().map(|a| a.0.to_string()).collect::<Vec<_>>().join(";")
}
