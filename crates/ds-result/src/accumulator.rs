//! `RunResultAccumulator` — append-only store filled during a run.

use std::collections::BTreeMap;

use ds_core::{AgentId, Tick};
use tracing::info;

use crate::{
    CollisionEvent, CollisionRecord, Occurrence, ResultError, ResultResult, RunResult, RunStatus,
};

pub struct RunResultAccumulator {
    library_id: String,
    seed: u64,
    collisions: Vec<CollisionEvent>,
    /// `(agent, tick)` → position in `collisions`.
    index: BTreeMap<(AgentId, Tick), usize>,
    log: Vec<Occurrence>,
    finalized: Option<RunResult>,
}

impl RunResultAccumulator {
    pub fn new(library_id: impl Into<String>, seed: u64) -> Self {
        Self {
            library_id: library_id.into(),
            seed,
            collisions: Vec::new(),
            index: BTreeMap::new(),
            log: Vec::new(),
            finalized: None,
        }
    }

    /// Record that `agent` collided with `other` on `tick`.
    ///
    /// # Errors
    ///
    /// - [`ResultError::DuplicateCollisionRecord`] if `agent` already has a
    ///   record on `tick`.  Nothing is written.
    /// - [`ResultError::Finalized`] after [`finalize`](Self::finalize).
    pub fn add_collision_agent(
        &mut self,
        tick:   Tick,
        agent:  AgentId,
        other:  AgentId,
        record: CollisionRecord,
    ) -> ResultResult<()> {
        if self.finalized.is_some() {
            return Err(ResultError::Finalized);
        }
        let key = (agent, tick);
        if self.index.contains_key(&key) {
            return Err(ResultError::DuplicateCollisionRecord { agent, tick });
        }
        self.index.insert(key, self.collisions.len());
        self.collisions.push(CollisionEvent { tick, agent, other, record });
        Ok(())
    }

    /// Append a log entry.
    pub fn record(&mut self, occurrence: Occurrence) -> ResultResult<()> {
        if self.finalized.is_some() {
            return Err(ResultError::Finalized);
        }
        self.log.push(occurrence);
        Ok(())
    }

    pub fn has_collision(&self, agent: AgentId, tick: Tick) -> bool {
        self.index.contains_key(&(agent, tick))
    }

    pub fn collision(&self, agent: AgentId, tick: Tick) -> Option<&CollisionEvent> {
        self.index.get(&(agent, tick)).map(|&i| &self.collisions[i])
    }

    pub fn collisions(&self) -> &[CollisionEvent] {
        &self.collisions
    }

    pub fn log(&self) -> &[Occurrence] {
        &self.log
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.is_some()
    }

    /// Seal the accumulator and return the run result.
    ///
    /// Only the first call builds the result; later calls return the same
    /// value and ignore their arguments.
    pub fn finalize(&mut self, final_tick: Tick, status: RunStatus) -> &RunResult {
        self.finalized.get_or_insert_with(|| {
            info!(
                %final_tick,
                collisions = self.collisions.len(),
                log = self.log.len(),
                ?status,
                "run result finalized"
            );
            RunResult {
                library_id: self.library_id.clone(),
                seed: self.seed,
                final_tick,
                status,
                collisions: self.collisions.clone(),
                log: self.log.clone(),
            }
        })
    }

    /// The finalized result, if any.
    pub fn result(&self) -> Option<&RunResult> {
        self.finalized.as_ref()
    }
}
