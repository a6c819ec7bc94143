//! Model configuration: policy levers, exogenous uncertainties, population
//! counts, and the tuning knobs of the price/demand adjustment.
//!
//! Typically built in code or loaded from JSON/TOML by the experiment driver
//! (with the `serde` feature) and handed to the model builder, which calls
//! [`ModelConfig::validate`] before any agent is created.

use crate::{AgentKind, Brand, CeError, CeResult};

// ── Levers ────────────────────────────────────────────────────────────────────

/// Policy levers available to the experimenter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Levers {
    /// L1: minimum fraction of reused parts a garage sources first.
    #[cfg_attr(feature = "serde", serde(rename = "L1"))]
    pub min_reused_parts: f64,
    /// L2: minimum fraction of high-grade recyclate per part.
    #[cfg_attr(feature = "serde", serde(rename = "L2"))]
    pub min_recyclate_high: f64,
    /// L3: better solvable adhesives; scales recycling efficiency.
    #[cfg_attr(feature = "serde", serde(rename = "L3"))]
    pub cohesive_factor: f64,
    /// L4: externality price factor applied to virgin plastic.
    #[cfg_attr(feature = "serde", serde(rename = "L4"))]
    pub virgin_externality: f64,
    /// L5: minimum total recyclate fraction per part (includes L2).
    #[cfg_attr(feature = "serde", serde(rename = "L5"))]
    pub min_recyclate_total: f64,
}

impl Default for Levers {
    fn default() -> Self {
        Self {
            min_reused_parts:    0.0,
            min_recyclate_high:  0.0,
            cohesive_factor:     1.0,
            virgin_externality:  1.0,
            min_recyclate_total: 0.0,
        }
    }
}

// ── Uncertainties ─────────────────────────────────────────────────────────────

/// Exogenous uncertainties sampled by experiment designs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Uncertainties {
    /// X1: annual increase factor of the oil (virgin plastic) price.
    #[cfg_attr(feature = "serde", serde(rename = "X1"))]
    pub oil_price_increase: f64,
    /// X2: annual probability of a global oil shock.
    #[cfg_attr(feature = "serde", serde(rename = "X2"))]
    pub oil_shock_probability: f64,
    /// X3: annual increase factor of recycling efficiency.
    #[cfg_attr(feature = "serde", serde(rename = "X3"))]
    pub recycling_efficiency_increase: f64,
}

impl Default for Uncertainties {
    fn default() -> Self {
        Self {
            oil_price_increase:            1.0,
            oil_shock_probability:         0.0,
            recycling_efficiency_increase: 1.0,
        }
    }
}

// ── AgentCounts ───────────────────────────────────────────────────────────────

/// Population size per archetype.
///
/// `car_manufacturers` is normally left `None`: one manufacturer is created
/// per [`Brand`].  An explicit value must equal `Brand::COUNT`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentCounts {
    pub parts_manufacturers: usize,
    pub refiners:            usize,
    pub recyclers:           usize,
    pub car_manufacturers:   Option<usize>,
    pub users:               usize,
    pub garages:             usize,
    pub dismantlers:         usize,
}

impl Default for AgentCounts {
    fn default() -> Self {
        Self {
            parts_manufacturers: 3,
            refiners:            3,
            recyclers:           1,
            car_manufacturers:   None,
            users:               1000,
            garages:             2,
            dismantlers:         1,
        }
    }
}

impl AgentCounts {
    /// Resolved population size for `kind`.
    pub fn count(&self, kind: AgentKind) -> usize {
        match kind {
            AgentKind::PartsManufacturer => self.parts_manufacturers,
            AgentKind::Refiner           => self.refiners,
            AgentKind::Recycler          => self.recyclers,
            AgentKind::CarManufacturer   => Brand::COUNT,
            AgentKind::User              => self.users,
            AgentKind::Garage            => self.garages,
            AgentKind::Dismantler        => self.dismantlers,
        }
    }

    /// Total number of agents the model will create.
    pub fn total(&self) -> usize {
        AgentKind::ALL.iter().map(|&k| self.count(k)).sum()
    }
}

// ── PricingParams ─────────────────────────────────────────────────────────────

/// Elasticity model used by every price and demand adjustment.
///
/// One adjustment multiplies by `noise × clamp(r^elasticity, min, max)` with
/// `r = last / second_last` sales and `noise ~ Normal(1, noise_sd)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PricingParams {
    pub min_price_scaling:  f64,
    pub max_price_scaling:  f64,
    pub min_demand_scaling: f64,
    pub max_demand_scaling: f64,
    pub price_elasticity:   f64,
    pub demand_elasticity:  f64,
    /// Standard deviation of the multiplicative noise (mean 1.0).
    pub noise_sd:           f64,
}

impl Default for PricingParams {
    fn default() -> Self {
        Self {
            min_price_scaling:  0.95,
            max_price_scaling:  1.1,
            min_demand_scaling: 0.5,
            max_demand_scaling: 2.0,
            price_elasticity:   1.0,
            demand_elasticity:  1.0,
            noise_sd:           0.2,
        }
    }
}

// ── Variants ──────────────────────────────────────────────────────────────────

/// When an agent's two-slot sales memory shifts.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SalesMemory {
    /// Every registered sale shifts `last` into `second_last`.
    #[default]
    PerTransaction,
    /// Sales accumulate during the tick and shift once in the update stage.
    PerTick,
}

/// Whether recycler leakage is reported per tick or as a running total.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeakageAccounting {
    #[default]
    PerTick,
    Cumulative,
}

/// How the refiner applies the annual oil price increase X1.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceGrowth {
    /// `price *= X1` every year.
    #[default]
    Compounding,
    /// `price += (X1 - 1) * initial_price` every year.
    Linear,
}

/// Alternates of the agent logic kept selectable for parity with older runs.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Variants {
    pub sales_memory: SalesMemory,
    pub leakage:      LeakageAccounting,
    pub price_growth: PriceGrowth,
}

// ── ModelConfig ───────────────────────────────────────────────────────────────

/// Top-level model configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Calendar year of tick 0 (labels output rows only).
    pub start_year: i32,

    pub levers:        Levers,
    pub uncertainties: Uncertainties,
    pub agent_counts:  AgentCounts,

    /// Parts per car.
    pub nr_of_parts: usize,

    /// Yearly probability that a functioning car breaks down.
    pub break_down_probability: f64,

    /// Standard deviation of users' use intensity (mean 1.0).
    pub std_use_intensity: f64,

    /// Probability that a garage sends an end-of-life car to a dismantler
    /// rather than a recycler.
    pub circularity_friendliness: f64,

    /// Service life of a new car in years, before use-intensity scaling.
    pub default_max_lifetime: u32,

    pub pricing:  PricingParams,
    pub variants: Variants,

    /// Check the conservation and ownership invariants after every stage.
    pub audit: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seed:                     42,
            start_year:               2020,
            levers:                   Levers::default(),
            uncertainties:            Uncertainties::default(),
            agent_counts:             AgentCounts::default(),
            nr_of_parts:              4,
            break_down_probability:   0.3,
            std_use_intensity:        0.1,
            circularity_friendliness: 0.2,
            default_max_lifetime:     10,
            pricing:                  PricingParams::default(),
            variants:                 Variants::default(),
            audit:                    false,
        }
    }
}

fn check(ok: bool, msg: impl FnOnce() -> String) -> CeResult<()> {
    if ok { Ok(()) } else { Err(CeError::Config(msg())) }
}

fn unit_interval(name: &str, v: f64) -> CeResult<()> {
    check((0.0..=1.0).contains(&v), || format!("{name} must lie in [0, 1], got {v}"))
}

impl ModelConfig {
    /// Reject configurations the model cannot run.  Called before any agent
    /// is created so a bad experiment never executes a tick.
    pub fn validate(&self) -> CeResult<()> {
        let l = &self.levers;
        unit_interval("L1 (min reused parts)", l.min_reused_parts)?;
        unit_interval("L2 (min high-grade recyclate)", l.min_recyclate_high)?;
        unit_interval("L5 (min total recyclate)", l.min_recyclate_total)?;
        check(l.min_recyclate_high <= l.min_recyclate_total, || {
            format!(
                "L2 ({}) must not exceed L5 ({})",
                l.min_recyclate_high, l.min_recyclate_total
            )
        })?;
        check(l.cohesive_factor > 0.0, || format!("L3 must be positive, got {}", l.cohesive_factor))?;
        check(l.virgin_externality > 0.0, || {
            format!("L4 must be positive, got {}", l.virgin_externality)
        })?;

        let u = &self.uncertainties;
        check(u.oil_price_increase > 0.0, || {
            format!("X1 must be positive, got {}", u.oil_price_increase)
        })?;
        unit_interval("X2 (oil shock probability)", u.oil_shock_probability)?;
        check(u.recycling_efficiency_increase >= 1.0, || {
            format!(
                "X3 must be at least 1.0 (efficiency never decreases), got {}",
                u.recycling_efficiency_increase
            )
        })?;

        let c = &self.agent_counts;
        if let Some(n) = c.car_manufacturers {
            check(n == Brand::COUNT, || {
                format!("{n} car manufacturers requested but there are {} brands", Brand::COUNT)
            })?;
        }
        for kind in [
            AgentKind::PartsManufacturer,
            AgentKind::Refiner,
            AgentKind::Recycler,
            AgentKind::Garage,
            AgentKind::Dismantler,
        ] {
            check(c.count(kind) >= 1, || format!("at least one {kind} is required"))?;
        }

        check(self.nr_of_parts >= 1, || "nr_of_parts must be at least 1".to_owned())?;
        check(self.default_max_lifetime >= 1, || {
            "default_max_lifetime must be at least 1".to_owned()
        })?;
        unit_interval("break_down_probability", self.break_down_probability)?;
        unit_interval("circularity_friendliness", self.circularity_friendliness)?;
        check(self.std_use_intensity >= 0.0 && self.std_use_intensity.is_finite(), || {
            format!("std_use_intensity must be finite and non-negative, got {}", self.std_use_intensity)
        })?;

        let p = &self.pricing;
        check(p.min_price_scaling > 0.0 && p.min_price_scaling <= p.max_price_scaling, || {
            format!(
                "price scaling bounds must satisfy 0 < min <= max, got [{}, {}]",
                p.min_price_scaling, p.max_price_scaling
            )
        })?;
        check(p.min_demand_scaling > 0.0 && p.min_demand_scaling <= p.max_demand_scaling, || {
            format!(
                "demand scaling bounds must satisfy 0 < min <= max, got [{}, {}]",
                p.min_demand_scaling, p.max_demand_scaling
            )
        })?;
        check(p.noise_sd >= 0.0 && p.noise_sd.is_finite(), || {
            format!("noise_sd must be finite and non-negative, got {}", p.noise_sd)
        })?;

        Ok(())
    }
}
