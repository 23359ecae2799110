//! Edge-triggered evaluation of registered predicates.

use std::collections::BTreeSet;

use ds_core::{AgentId, ScenarioEvent};
use tracing::debug;

use crate::{DetectionContext, Predicate};

/// What firing a predicate does to the run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EventAction {
    /// Deliver the event to components on the next tick.
    #[default]
    Notify,
    /// Deliver the event and end the run after the current tick.
    Terminate,
}

struct Watch {
    predicate: Box<dyn Predicate>,
    action: EventAction,
    /// Agents the predicate held for on the previous tick; `None` while
    /// false.
    previous: Option<BTreeSet<AgentId>>,
}

/// Evaluates every registered predicate once per tick and emits an event on
/// each false → true transition.
///
/// For agent-level predicates the transition is tracked per agent: while a
/// predicate keeps holding, an agent that newly satisfies it raises a fresh
/// event naming only the new agents.
#[derive(Default)]
pub struct EventDetector {
    watches: Vec<Watch>,
}

impl EventDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, predicate: impl Predicate, action: EventAction) {
        self.watches.push(Watch { predicate: Box::new(predicate), action, previous: None });
    }

    pub fn notify(mut self, predicate: impl Predicate) -> Self {
        self.register(predicate, EventAction::Notify);
        self
    }

    pub fn terminate(mut self, predicate: impl Predicate) -> Self {
        self.register(predicate, EventAction::Terminate);
        self
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Evaluate all predicates, in registration order.
    pub fn detect(&mut self, ctx: &DetectionContext<'_>) -> Vec<ScenarioEvent> {
        let mut events = Vec::new();
        for watch in &mut self.watches {
            let now: Option<BTreeSet<AgentId>> =
                watch.predicate.evaluate(ctx).map(|agents| agents.into_iter().collect());

            let fired: Option<Vec<AgentId>> = match (&watch.previous, &now) {
                (None, Some(all)) => Some(all.iter().copied().collect()),
                (Some(before), Some(all)) => {
                    let new: Vec<AgentId> = all.difference(before).copied().collect();
                    (!new.is_empty()).then_some(new)
                }
                (_, None) => None,
            };
            watch.previous = now;

            if let Some(agents) = fired {
                let event = ScenarioEvent {
                    tick:       ctx.tick,
                    name:       watch.predicate.name().to_owned(),
                    agents,
                    terminates: watch.action == EventAction::Terminate,
                };
                debug!(tick = %event.tick, name = %event.name, agents = ?event.agents, "event");
                events.push(event);
            }
        }
        events
    }
}
