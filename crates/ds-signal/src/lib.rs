//! `ds-signal` — the signal bus that carries named, typed values between the
//! components of one agent pipeline.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                         |
//! |-----------|------------------------------------------------------------------|
//! | [`name`]  | `SignalName` (cheaply cloneable interned-style name)             |
//! | [`value`] | `SignalValue` (bool / int / float / vector / list)               |
//! | [`bus`]   | `SignalBus`, `SignalPartition`, `SignalEntry`                    |
//! | [`port`]  | `InputDecl`, `Freshness`, `SignalPort` (declared-access view)    |
//! | [`error`] | `SignalError`, `SignalResult`                                    |
//!
//! # Partitioning
//!
//! The bus is a `Vec<SignalPartition>` indexed by `AgentId`.  A component
//! only ever receives a [`SignalPort`] over its own agent's partition, so
//! writes from different agents never alias and partitions can be handed to
//! worker threads independently.
//!
//! # Freshness
//!
//! Every entry remembers the tick it was produced on.  A read succeeds only
//! if the value was produced on the current tick, unless the consumer
//! declared the input as [`Freshness::AllowStale`]; a consumer may also
//! declare a default that is substituted (and reported) when no value is
//! available.

pub mod bus;
pub mod error;
pub mod name;
pub mod port;
pub mod value;


pub use bus::{SignalBus, SignalEntry, SignalPartition};
pub use error::{SignalError, SignalResult};
pub use name::SignalName;
pub use port::{Freshness, InputDecl, SignalPort};
pub use value::SignalValue;
