//! Process-wide, read-shared simulation context.
//!
//! `WorldState` is built once at run start from a [`WorldInit`], passed by
//! shared reference into every component step, and written only by the
//! simulation loop at the tick boundary via [`WorldState::commit_tick`].

use std::fmt;

use crate::Tick;

const MS_PER_DAY: u64 = 86_400_000;

/// Day of the week the scenario takes place on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Weekday {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn next(self) -> Weekday {
        match self {
            Weekday::Monday    => Weekday::Tuesday,
            Weekday::Tuesday   => Weekday::Wednesday,
            Weekday::Wednesday => Weekday::Thursday,
            Weekday::Thursday  => Weekday::Friday,
            Weekday::Friday    => Weekday::Saturday,
            Weekday::Saturday  => Weekday::Sunday,
            Weekday::Sunday    => Weekday::Monday,
        }
    }
}

/// Initial world values handed over by the configuration layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldInit {
    pub weekday: Weekday,
    /// Milliseconds since local midnight at tick 0.
    pub time_of_day_ms: u64,
    /// Identifier of the scenario library the run was resolved from.
    pub library_id: String,
}

impl Default for WorldInit {
    fn default() -> Self {
        Self {
            weekday:        Weekday::Monday,
            time_of_day_ms: 12 * 3_600_000,
            library_id:     String::from("default"),
        }
    }
}

/// Read-only world context for one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub weekday: Weekday,
    pub time_of_day_ms: u64,
    pub library_id: String,
    pub tick: Tick,
    pub horizon: Tick,
    pub base_resolution_ms: u32,
}

impl WorldState {
    pub fn new(init: WorldInit, horizon: Tick, base_resolution_ms: u32) -> Self {
        Self {
            weekday:        init.weekday,
            time_of_day_ms: init.time_of_day_ms % MS_PER_DAY,
            library_id:     init.library_id,
            tick:           Tick::ZERO,
            horizon,
            base_resolution_ms,
        }
    }

    /// Advance to the next tick, rolling time of day (and the weekday at
    /// midnight) forward by one base resolution.
    pub fn commit_tick(&mut self) {
        self.tick = self.tick.next();
        let advanced = self.time_of_day_ms + self.base_resolution_ms as u64;
        if advanced >= MS_PER_DAY {
            self.weekday = self.weekday.next();
        }
        self.time_of_day_ms = advanced % MS_PER_DAY;
    }

    /// Length of one tick in seconds.
    #[inline]
    pub fn dt_secs(&self) -> f64 {
        self.base_resolution_ms as f64 / 1_000.0
    }

    /// `true` once the tick counter has reached the horizon.
    #[inline]
    pub fn at_horizon(&self) -> bool {
        self.tick >= self.horizon
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.time_of_day_ms / 1_000;
        write!(
            f,
            "{} {:?} {:02}:{:02}:{:02} [{}]",
            self.tick,
            self.weekday,
            secs / 3_600,
            (secs % 3_600) / 60,
            secs % 60,
            self.library_id,
        )
    }
}
