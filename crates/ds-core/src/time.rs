//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick lasts the
//! configured base resolution (milliseconds):
//!
//!   elapsed_ms = tick * base_resolution_ms
//!
//! Component cycle times are whole multiples of the base resolution, so every
//! "is this component due?" check is exact integer arithmetic.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick immediately after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// `true` if a task with period `cycle_ticks` fires on this tick.
    ///
    /// A zero period never fires.
    #[inline]
    pub fn is_due(self, cycle_ticks: u64) -> bool {
        cycle_ticks != 0 && self.0 % cycle_ticks == 0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and converts it to simulated time.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Milliseconds of simulated time per tick.
    pub base_resolution_ms: u32,
    /// The current tick — advanced once per tick boundary.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(base_resolution_ms: u32) -> Self {
        Self { base_resolution_ms, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    /// Simulated milliseconds elapsed since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.base_resolution_ms as u64
    }

    /// Length of one tick in seconds, for physics integration.
    #[inline]
    pub fn dt_secs(&self) -> f64 {
        self.base_resolution_ms as f64 / 1_000.0
    }

    /// Convert a period in milliseconds to a whole number of ticks.
    ///
    /// Returns `None` if `period_ms` is zero or not a multiple of the base
    /// resolution.
    pub fn ticks_for_ms(&self, period_ms: u32) -> Option<u64> {
        ticks_for_ms(self.base_resolution_ms, period_ms)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s)", self.current_tick, self.elapsed_ms() as f64 / 1_000.0)
    }
}

/// Free-standing version of [`SimClock::ticks_for_ms`].
pub fn ticks_for_ms(base_resolution_ms: u32, period_ms: u32) -> Option<u64> {
    if base_resolution_ms == 0 || period_ms == 0 || period_ms % base_resolution_ms != 0 {
        return None;
    }
    Some((period_ms / base_resolution_ms) as u64)
}

// ── Policies ──────────────────────────────────────────────────────────────────

/// How the per-tick component plan is executed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExecutionMode {
    /// One component at a time in resolved plan order.
    #[default]
    Serial,
    /// Agent pipelines run concurrently (requires the `parallel` feature of
    /// `ds-sim`; falls back to `Serial` otherwise).  Results are identical.
    Parallel,
}

/// What happens when a component fails a signal read that has no default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SignalErrorPolicy {
    /// Stop scheduling the offending agent's pipeline; the run continues.
    #[default]
    HaltPipeline,
    /// Treat the failure as fatal for the whole run.
    AbortRun,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration, resolved by the surrounding config layer.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Milliseconds per tick.  Default: 100 (10 Hz).
    pub base_resolution_ms: u32,

    /// Ticks to simulate.  The run stops when the tick counter reaches it.
    pub horizon_ticks: u64,

    /// Master seed.  The same seed and inputs give a byte-identical result.
    pub seed: u64,

    /// Report an agent-state snapshot every N ticks (0 disables).
    pub snapshot_interval_ticks: u64,

    pub execution: ExecutionMode,

    pub signal_error_policy: SignalErrorPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_resolution_ms:      100,
            horizon_ticks:           600,
            seed:                    0,
            snapshot_interval_ticks: 0,
            execution:               ExecutionMode::Serial,
            signal_error_policy:     SignalErrorPolicy::HaltPipeline,
        }
    }
}

impl SimConfig {
    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn horizon(&self) -> Tick {
        Tick(self.horizon_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.base_resolution_ms)
    }
}
