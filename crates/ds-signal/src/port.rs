//! Declared-access view over one agent's signal partition.
//!
//! A component never touches the bus directly.  Each step it receives a
//! `SignalPort` bound to its own agent, its declared inputs and outputs and
//! the current tick.  Every read and write is checked against the
//! declaration, so hidden coupling between components shows up as an error
//! the first time it happens instead of as silently wrong data.

use ds_core::{AgentId, Tick, Vec2};
use tracing::debug;

use crate::{SignalError, SignalName, SignalPartition, SignalResult, SignalValue};

/// How old a value an input accepts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Freshness {
    /// Must have been produced on the current tick.  Creates a scheduling
    /// dependency on the producer.
    #[default]
    Fresh,
    /// The most recent value from any tick is acceptable.  Creates no
    /// scheduling dependency, which is how feedback loops are broken.
    AllowStale,
}

/// One declared input of a component.
#[derive(Clone, Debug, PartialEq)]
pub struct InputDecl {
    pub name:      SignalName,
    pub freshness: Freshness,
    /// Substituted when no acceptable value exists.
    pub default:   Option<SignalValue>,
}

impl InputDecl {
    pub fn fresh(name: impl Into<SignalName>) -> Self {
        Self { name: name.into(), freshness: Freshness::Fresh, default: None }
    }

    pub fn stale(mut self) -> Self {
        self.freshness = Freshness::AllowStale;
        self
    }

    pub fn or_default(mut self, value: impl Into<SignalValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.freshness == Freshness::Fresh
    }
}

pub struct SignalPort<'a> {
    agent:     AgentId,
    tick:      Tick,
    slot:      usize,
    inputs:    &'a [InputDecl],
    outputs:   &'a [SignalName],
    partition: &'a mut SignalPartition,
    fallbacks: Vec<SignalName>,
}

impl<'a> SignalPort<'a> {
    pub fn new(
        agent:     AgentId,
        tick:      Tick,
        slot:      usize,
        inputs:    &'a [InputDecl],
        outputs:   &'a [SignalName],
        partition: &'a mut SignalPartition,
    ) -> Self {
        Self { agent, tick, slot, inputs, outputs, partition, fallbacks: Vec::new() }
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn read(&mut self, name: &str) -> SignalResult<SignalValue> {
        let Some(decl) = self.inputs.iter().find(|d| d.name.as_str() == name) else {
            return Err(SignalError::UnauthorizedAccess {
                agent:  self.agent,
                signal: SignalName::new(name),
            });
        };

        if let Some(entry) = self.partition.latest(name) {
            if entry.produced_at == self.tick || decl.freshness == Freshness::AllowStale {
                return Ok(entry.value.clone());
            }
        }

        match &decl.default {
            Some(value) => {
                debug!(agent = %self.agent, signal = name, tick = %self.tick, "signal default used");
                self.fallbacks.push(decl.name.clone());
                Ok(value.clone())
            }
            None => Err(SignalError::SignalNotFound {
                agent:  self.agent,
                signal: decl.name.clone(),
                tick:   self.tick,
            }),
        }
    }

    pub fn read_f64(&mut self, name: &str) -> SignalResult<f64> {
        let value = self.read(name)?;
        value.as_f64().ok_or_else(|| self.mismatch(name, "float", &value))
    }

    pub fn read_bool(&mut self, name: &str) -> SignalResult<bool> {
        let value = self.read(name)?;
        value.as_bool().ok_or_else(|| self.mismatch(name, "bool", &value))
    }

    pub fn read_int(&mut self, name: &str) -> SignalResult<i64> {
        let value = self.read(name)?;
        value.as_int().ok_or_else(|| self.mismatch(name, "int", &value))
    }

    pub fn read_vec2(&mut self, name: &str) -> SignalResult<Vec2> {
        let value = self.read(name)?;
        value.as_vec2().ok_or_else(|| self.mismatch(name, "vector", &value))
    }

    pub fn write(&mut self, name: &str, value: impl Into<SignalValue>) -> SignalResult<()> {
        let Some(declared) = self.outputs.iter().find(|n| n.as_str() == name) else {
            return Err(SignalError::UnauthorizedWrite {
                agent:  self.agent,
                signal: SignalName::new(name),
            });
        };
        self.partition.write(declared, value.into(), self.tick, self.slot);
        Ok(())
    }

    /// Inputs that were resolved to their default during this step.
    pub fn take_fallbacks(&mut self) -> Vec<SignalName> {
        std::mem::take(&mut self.fallbacks)
    }

    fn mismatch(&self, name: &str, expected: &'static str, found: &SignalValue) -> SignalError {
        SignalError::TypeMismatch {
            agent: self.agent,
            signal: SignalName::new(name),
            expected,
            found: found.type_name(),
        }
    }
}
