//! `SpawnQueue` — items keyed by the tick they are due.
//!
//! `BTreeMap` keeps the ticks ordered, so the simulation drains only the
//! items due now instead of scanning every pending template each tick.
//! Items due on the same tick keep their insertion order.

use std::collections::BTreeMap;

use ds_core::Tick;

use crate::SpawnItem;

#[derive(Default)]
pub struct SpawnQueue {
    inner: BTreeMap<Tick, Vec<SpawnItem>>,
    total: usize,
}

impl SpawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue at the item's own activation tick.
    pub fn push(&mut self, item: SpawnItem) {
        let tick = item.activation_tick;
        self.push_at(tick, item);
    }

    /// Enqueue for `tick` (used for retries).
    pub fn push_at(&mut self, tick: Tick, item: SpawnItem) {
        self.inner.entry(tick).or_default().push(item);
        self.total += 1;
    }

    /// Remove and return every item due at or before `tick`, oldest tick
    /// first.
    pub fn drain_due(&mut self, tick: Tick) -> Vec<SpawnItem> {
        let later = self.inner.split_off(&tick.next());
        let due = std::mem::replace(&mut self.inner, later);
        let items: Vec<SpawnItem> = due.into_values().flatten().collect();
        self.total -= items.len();
        items
    }

    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
