//! `AgentPipeline` — the resolved call table for one agent.
//!
//! Resolution happens once, when the pipeline is built:
//!
//! 1. every component's cycle time is converted to whole ticks;
//! 2. every output signal is mapped to its single producer slot;
//! 3. every input is checked to have a producer or a default.
//!
//! After that the scheduler only needs integer cycle periods, priorities,
//! categories and the producer map; it never calls back into the component
//! to ask about its declarations.

use std::collections::BTreeMap;

use ds_core::{AgentId, StreamRng, time::ticks_for_ms};
use ds_signal::{SignalName, SignalPartition, SignalPort};

use crate::{
    Component, ComponentCategory, ComponentError, ComponentResult, ComponentSpec, InitContext,
    Intent, PipelineError, PipelineResult, StepContext, TickFrame,
};

/// One entry of the call table.
pub struct PipelineSlot {
    pub component: Box<dyn Component>,
    /// Copy of `component.spec()` taken at resolution time.
    pub spec: ComponentSpec,
    pub cycle_ticks: u64,
    pub rng: StreamRng,
    /// Number of completed steps.
    pub steps: u64,
}

/// What a single step produced besides its signal writes.
#[derive(Debug, Default)]
pub struct SlotOutput {
    pub intents: Vec<Intent>,
    /// Inputs that were resolved to their declared default.
    pub fallbacks: Vec<SignalName>,
}

pub struct AgentPipeline {
    agent: AgentId,
    slots: Vec<PipelineSlot>,
    producers: BTreeMap<SignalName, usize>,
    halted: bool,
}

impl AgentPipeline {
    /// Validate `components` and build the call table.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidCycleTime`] for a zero or misaligned period.
    /// - [`PipelineError::DuplicateProducer`] if two components declare the
    ///   same output.
    /// - [`PipelineError::UnresolvedSignal`] for an input with neither a
    ///   producer nor a default.
    pub fn resolve(
        agent:              AgentId,
        components:         Vec<Box<dyn Component>>,
        base_resolution_ms: u32,
        run_seed:           u64,
    ) -> PipelineResult<Self> {
        let mut slots = Vec::with_capacity(components.len());
        let mut producers: BTreeMap<SignalName, usize> = BTreeMap::new();

        for (slot, component) in components.into_iter().enumerate() {
            let spec = component.spec().clone();
            let cycle_ticks = ticks_for_ms(base_resolution_ms, spec.cycle_time_ms).ok_or_else(|| {
                PipelineError::InvalidCycleTime {
                    agent,
                    component: spec.name.clone(),
                    cycle_time_ms: spec.cycle_time_ms,
                    base_resolution_ms,
                }
            })?;

            for output in &spec.outputs {
                if let Some(&first) = producers.get(output) {
                    let first: &PipelineSlot = &slots[first];
                    return Err(PipelineError::DuplicateProducer {
                        agent,
                        signal: output.clone(),
                        first:  first.spec.name.clone(),
                        second: spec.name.clone(),
                    });
                }
                producers.insert(output.clone(), slot);
            }

            slots.push(PipelineSlot {
                component,
                spec,
                cycle_ticks,
                rng: StreamRng::for_component(run_seed, agent, slot),
                steps: 0,
            });
        }

        for slot in &slots {
            for input in &slot.spec.inputs {
                if input.default.is_none() && !producers.contains_key(&input.name) {
                    return Err(PipelineError::UnresolvedSignal {
                        agent,
                        component: slot.spec.name.clone(),
                        signal:    input.name.clone(),
                    });
                }
            }
        }

        Ok(Self { agent, slots, producers, halted: false })
    }

    #[inline]
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[PipelineSlot] {
        &self.slots
    }

    pub fn slot(&self, slot: usize) -> &PipelineSlot {
        &self.slots[slot]
    }

    /// Slot of the component that declares `signal` as output.
    pub fn producer_of(&self, signal: &str) -> Option<usize> {
        self.producers.get(signal).copied()
    }

    pub fn category_of(&self, slot: usize) -> ComponentCategory {
        self.slots[slot].spec.category
    }

    pub fn component_name(&self, slot: usize) -> &str {
        &self.slots[slot].spec.name
    }

    /// Cycle periods of all slots, in ticks.
    pub fn cycle_ticks(&self) -> impl Iterator<Item = u64> + '_ {
        self.slots.iter().map(|s| s.cycle_ticks)
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Stop scheduling this pipeline.  The agent stays in the world.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Run `init` on every component in slot order.
    pub fn init(&mut self, ctx: &InitContext<'_>) -> PipelineResult<()> {
        let agent = self.agent;
        for slot in &mut self.slots {
            slot.component.init(ctx).map_err(|source| PipelineError::Init {
                agent,
                component: slot.spec.name.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Step the component in `slot` against this agent's signal partition.
    pub fn step_slot(
        &mut self,
        slot:      usize,
        frame:     &TickFrame<'_>,
        partition: &mut SignalPartition,
    ) -> ComponentResult<SlotOutput> {
        let agent = self.agent;
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or_else(|| ComponentError::Failed(format!("{agent} has no slot {slot}")))?;

        let signals = SignalPort::new(
            agent,
            frame.tick,
            slot,
            &entry.spec.inputs,
            &entry.spec.outputs,
            partition,
        );
        let mut ctx = StepContext {
            tick:    frame.tick,
            world:   frame.world,
            agent,
            agents:  frame.agents,
            events:  frame.events,
            signals,
            rng:     &mut entry.rng,
        };

        let intents = entry.component.step(&mut ctx)?;
        let fallbacks = ctx.signals.take_fallbacks();
        entry.steps += 1;
        Ok(SlotOutput { intents, fallbacks })
    }
}
