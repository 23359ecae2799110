//! `ds-event` — scenario predicates and the events they raise.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`predicate`] | `Predicate` trait, `DetectionContext`, built-in predicates   |
//! | [`detector`]  | `EventDetector` (edge triggered), `EventAction`              |
//! | [`buffer`]    | `EventBuffer` — events of tick `t` become visible at `t + 1` |
//!
//! # Timing
//!
//! ```text
//! tick t:   steps ─▶ apply intents ─▶ collisions ─▶ EventDetector::detect
//!                                                      │
//!                                                      ▼ EventBuffer::push
//! t → t+1:  EventBuffer::rotate
//! tick t+1: components read EventBuffer::visible() through StepContext::events
//! ```

pub mod buffer;
pub mod detector;
pub mod predicate;


pub use buffer::EventBuffer;
pub use detector::{EventAction, EventDetector};
pub use predicate::{
    CollisionOccurred, DetectionContext, OutOfBounds, Predicate, PredicateFn, SpeedAbove,
    TickReached,
};
