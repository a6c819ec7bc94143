//! Parts and their plastic composition.

use std::ops::{Index, IndexMut};

use ce_core::{Component, PartState};

// ── PlasticRatio ──────────────────────────────────────────────────────────────

/// Mass fractions of the three plastic grades in one part.
///
/// A freshly manufactured part sums to 1.0 (one unit of mass).  After
/// [`Part::extract_plastic`] every fraction is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlasticRatio {
    pub virgin:         f64,
    pub recyclate_low:  f64,
    pub recyclate_high: f64,
}

impl PlasticRatio {
    pub const EMPTY: PlasticRatio = PlasticRatio {
        virgin:         0.0,
        recyclate_low:  0.0,
        recyclate_high: 0.0,
    };

    pub fn new(virgin: f64, recyclate_low: f64, recyclate_high: f64) -> Self {
        Self { virgin, recyclate_low, recyclate_high }
    }

    /// A part made entirely of virgin plastic (legacy fleet and seed stock).
    pub fn virgin_only() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Sum of all three fractions.
    #[inline]
    pub fn total(&self) -> f64 {
        self.virgin + self.recyclate_low + self.recyclate_high
    }
}

impl Index<Component> for PlasticRatio {
    type Output = f64;

    /// # Panics
    /// Panics for non-plastic components.
    fn index(&self, c: Component) -> &f64 {
        match c {
            Component::Virgin        => &self.virgin,
            Component::RecyclateLow  => &self.recyclate_low,
            Component::RecyclateHigh => &self.recyclate_high,
            other => panic!("{other} is not a plastic grade"),
        }
    }
}

impl IndexMut<Component> for PlasticRatio {
    fn index_mut(&mut self, c: Component) -> &mut f64 {
        match c {
            Component::Virgin        => &mut self.virgin,
            Component::RecyclateLow  => &mut self.recyclate_low,
            Component::RecyclateHigh => &mut self.recyclate_high,
            other => panic!("{other} is not a plastic grade"),
        }
    }
}

// ── Part ──────────────────────────────────────────────────────────────────────

/// A car part.  Owned by exactly one stock or one car at a time; moving it
/// between owners is a Rust move.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Part {
    plastic_ratio: PlasticRatio,
    pub state:     PartState,
}

impl Part {
    pub fn new(plastic_ratio: PlasticRatio, state: PartState) -> Self {
        Self { plastic_ratio, state }
    }

    /// A first-life part.
    pub fn standard(plastic_ratio: PlasticRatio) -> Self {
        Self::new(plastic_ratio, PartState::Standard)
    }

    #[inline]
    pub fn plastic_ratio(&self) -> &PlasticRatio {
        &self.plastic_ratio
    }

    #[inline]
    pub fn is_reused(&self) -> bool {
        self.state == PartState::Reused
    }

    /// Mark the part as salvaged for a second life.
    pub fn reuse(&mut self) {
        self.state = PartState::Reused;
    }

    /// Take the plastic out of the part, leaving it empty.
    ///
    /// A second call returns all zeros: the plastic has been consumed.
    pub fn extract_plastic(&mut self) -> PlasticRatio {
        std::mem::replace(&mut self.plastic_ratio, PlasticRatio::EMPTY)
    }
}
