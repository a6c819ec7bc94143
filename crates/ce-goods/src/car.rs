//! Cars and the car lifecycle state machine.
//!
//! ```text
//!                 p = break_down_probability
//!   FUNCTIONING ───────────────────────────► BROKEN
//!        ▲                                     │
//!        └──────────── repair_car ─────────────┘
//!        │
//!        │ lifetime_current ≥ max_lifetime
//!        ▼
//!   END_OF_LIFE   (terminal)
//! ```

use std::collections::VecDeque;

use ce_core::{Brand, CarId, CarState, SimRng};

use crate::{GoodsError, GoodsResult, Part};

/// A car: a brand, an ordered set of parts, and a lifecycle state.
///
/// `parts` is a FIFO of "position until replaced": the front is the oldest
/// part and the first one to be swapped out at a repair.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Car {
    pub id:                     CarId,
    pub brand:                  Brand,
    pub parts:                  VecDeque<Part>,
    /// Years in service.  Only increments while functioning.
    pub lifetime_current:       u32,
    /// Age at which the car is retired.
    pub max_lifetime:           u32,
    pub state:                  CarState,
    pub break_down_probability: f64,
}

impl Car {
    /// A brand-new functioning car.
    pub fn new(
        id:                     CarId,
        brand:                  Brand,
        parts:                  Vec<Part>,
        max_lifetime:           u32,
        break_down_probability: f64,
    ) -> Self {
        Self {
            id,
            brand,
            parts: parts.into(),
            lifetime_current: 0,
            max_lifetime,
            state: CarState::Functioning,
            break_down_probability,
        }
    }

    #[inline]
    pub fn is_functioning(&self) -> bool {
        self.state == CarState::Functioning
    }

    /// Scale the service life by a user's use intensity.
    ///
    /// Heavier use (intensity > 1) shortens the life.  A non-positive
    /// intensity leaves the car untouched.
    pub fn apply_use_intensity(&mut self, use_intensity: f64) {
        if use_intensity <= 0.0 {
            return;
        }
        self.max_lifetime = (self.max_lifetime as f64 / use_intensity).round() as u32;
        self.lifetime_current = self.lifetime_current.min(self.max_lifetime);
    }

    /// Drive the car for one year.
    ///
    /// A car that has reached `max_lifetime` is retired without consuming a
    /// random draw.  Otherwise it ages one year and then breaks down with
    /// probability `break_down_probability`.  Broken and retired cars are
    /// left untouched.
    pub fn use_car(&mut self, rng: &mut SimRng) {
        if self.state != CarState::Functioning {
            return;
        }
        if self.lifetime_current >= self.max_lifetime {
            self.state = CarState::EndOfLife;
            return;
        }
        self.lifetime_current += 1;
        if rng.random::<f64>() < self.break_down_probability {
            self.state = CarState::Broken;
        }
    }

    /// Replace the oldest part with `part` and return the car to service.
    ///
    /// A standard replacement goes to the back of the queue.  A reused one
    /// is inserted at a uniformly random position, since its remaining wear
    /// is unknown.  Returns the removed part (if the car had any).
    pub fn repair_car(&mut self, part: Part, rng: &mut SimRng) -> GoodsResult<Option<Part>> {
        if self.state != CarState::Broken {
            return Err(GoodsError::NotBroken { car: self.id, state: self.state });
        }
        let removed = self.parts.pop_front();
        if part.is_reused() {
            let at = rng.gen_range(0..=self.parts.len());
            self.parts.insert(at, part);
        } else {
            self.parts.push_back(part);
        }
        self.state = CarState::Functioning;
        Ok(removed)
    }

    /// Take every part out of the car, oldest first.
    pub fn strip_parts(&mut self) -> impl Iterator<Item = Part> + '_ {
        self.parts.drain(..)
    }
}
