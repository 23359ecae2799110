//! `ds-collision` — geometric collision detection between agents.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`obb`]      | `OrientedBox` and the separating-axis overlap test            |
//! | [`broad`]    | `BroadPhase` (brute force or R-tree) candidate pair search    |
//! | [`detector`] | `CollisionDetector`, `CollisionConfig`, `CollisionReport`     |
//!
//! # Pipeline
//!
//! ```text
//! live agents ──▶ OrientedBox per agent
//!             ──▶ broad phase: candidate pairs (i < j)
//!             ──▶ narrow phase: SAT penetration per pair (parallel optional)
//!             ──▶ sort by (a, b)  ──▶ contacts
//!             ──▶ one representative per agent (deepest, then lowest id)
//! ```
//!
//! The broad phase only prunes pairs whose axis-aligned bounds are disjoint,
//! which the narrow phase would reject anyway, so the detected set is the
//! same whichever broad phase is selected.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                       |
//! |------------|----------------------------------------------|
//! | `parallel` | Narrow phase runs on Rayon's thread pool.    |
//! | `serde`    | Serde derives on `CollisionConfig`.          |

pub mod broad;
pub mod detector;
pub mod obb;


pub use broad::BroadPhase;
pub use detector::{CollisionConfig, CollisionDetector, CollisionReport, Contact, Representative};
pub use obb::OrientedBox;
