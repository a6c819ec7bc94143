//! Fixed vocabulary of the model: tradeable components, good states, brands,
//! and agent archetypes.
//!
//! Every enum exposes `ALL` in declaration order and an `index()` so that
//! per-variant tables can be plain arrays instead of hash maps.

use std::fmt;

// ── Component ─────────────────────────────────────────────────────────────────

/// A tradeable good category.
///
/// The three plastics are continuous masses; the rest are discrete
/// collections of parts or cars, some staged for recycling or dismantling.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Component {
    Virgin,
    RecyclateLow,
    RecyclateHigh,
    Parts,
    PartsForRecycler,
    Cars,
    CarsForRecycler,
    CarsForDismantler,
}

impl Component {
    pub const COUNT: usize = 8;

    pub const ALL: [Component; Self::COUNT] = [
        Component::Virgin,
        Component::RecyclateLow,
        Component::RecyclateHigh,
        Component::Parts,
        Component::PartsForRecycler,
        Component::Cars,
        Component::CarsForRecycler,
        Component::CarsForDismantler,
    ];

    /// The plastic grades a part can be made of.
    pub const PLASTICS: [Component; 3] = [
        Component::Virgin,
        Component::RecyclateLow,
        Component::RecyclateHigh,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `true` for plastics (measured as mass), `false` for parts and cars.
    #[inline]
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            Component::Virgin | Component::RecyclateLow | Component::RecyclateHigh
        )
    }

    /// `true` for the part collections.
    #[inline]
    pub fn holds_parts(self) -> bool {
        matches!(self, Component::Parts | Component::PartsForRecycler)
    }

    /// `true` for the car collections.
    #[inline]
    pub fn holds_cars(self) -> bool {
        matches!(
            self,
            Component::Cars | Component::CarsForRecycler | Component::CarsForDismantler
        )
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Component::Virgin            => "virgin",
            Component::RecyclateLow      => "recyclate_low",
            Component::RecyclateHigh     => "recyclate_high",
            Component::Parts             => "parts",
            Component::PartsForRecycler  => "parts_for_recycler",
            Component::Cars              => "cars",
            Component::CarsForRecycler   => "cars_for_recycler",
            Component::CarsForDismantler => "cars_for_dismantler",
        };
        f.write_str(s)
    }
}

// ── Good states ───────────────────────────────────────────────────────────────

/// Whether a part is on its first life or has been salvaged by a dismantler.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartState {
    #[default]
    Standard,
    Reused,
}

/// Lifecycle state of a car.  `EndOfLife` is terminal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarState {
    #[default]
    Functioning,
    Broken,
    EndOfLife,
}

// ── Brand ─────────────────────────────────────────────────────────────────────

/// Car brands.  Exactly one car manufacturer exists per brand.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Brand {
    Alpha,
    Beta,
    Gamma,
    Delta,
}

impl Brand {
    pub const COUNT: usize = 4;

    pub const ALL: [Brand; Self::COUNT] = [Brand::Alpha, Brand::Beta, Brand::Gamma, Brand::Delta];
}

// ── AgentKind ─────────────────────────────────────────────────────────────────

/// The seven agent archetypes, in population construction order.
///
/// Construction order is also scheduling order within a stage, so the
/// declaration order here is load-bearing: users hand broken cars to garages
/// before the garages run their own repair turn.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    PartsManufacturer,
    Refiner,
    Recycler,
    CarManufacturer,
    User,
    Garage,
    Dismantler,
}

impl AgentKind {
    pub const COUNT: usize = 7;

    pub const ALL: [AgentKind; Self::COUNT] = [
        AgentKind::PartsManufacturer,
        AgentKind::Refiner,
        AgentKind::Recycler,
        AgentKind::CarManufacturer,
        AgentKind::User,
        AgentKind::Garage,
        AgentKind::Dismantler,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
