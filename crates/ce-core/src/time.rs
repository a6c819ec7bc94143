//! Simulation time model.
//!
//! One tick is one simulated year.  `SimClock` maps the tick counter onto a
//! calendar year so output rows can be labelled:
//!
//!   year = start_year + tick
//!
//! Using an integer tick as the canonical time unit keeps every lifetime
//! comparison exact.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter (years since the start of the run).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and converts it to a calendar year.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Calendar year of tick 0.
    pub start_year: i32,
    /// The tick the model will run next.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_year: i32) -> Self {
        Self {
            start_year,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Calendar year of `tick`.
    #[inline]
    pub fn year_of(&self, tick: Tick) -> i32 {
        self.start_year + tick.0 as i32
    }

    /// Calendar year of the current tick.
    #[inline]
    pub fn current_year(&self) -> i32 {
        self.year_of(self.current_tick)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (year {})", self.current_tick, self.current_year())
    }
}
