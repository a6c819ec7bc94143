//! The stock/demand/price ledger every agent carries.

use std::collections::VecDeque;
use std::ops::{Index, IndexMut};

use ce_core::{Component, SalesMemory};
use ce_goods::{Car, Part};

use crate::{AgentError, AgentResult, Stock};

// ── PerComponent ──────────────────────────────────────────────────────────────

/// A dense table with one slot per [`Component`], indexed by component.
#[derive(Debug, Clone, PartialEq)]
pub struct PerComponent<T>([T; Component::COUNT]);

impl<T> PerComponent<T> {
    pub fn from_fn(mut f: impl FnMut(Component) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Component::ALL[i])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, &T)> {
        Component::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T: Copy> PerComponent<T> {
    pub fn splat(value: T) -> Self {
        Self([value; Component::COUNT])
    }
}

impl<T> Index<Component> for PerComponent<T> {
    type Output = T;

    #[inline]
    fn index(&self, c: Component) -> &T {
        &self.0[c.index()]
    }
}

impl<T> IndexMut<Component> for PerComponent<T> {
    #[inline]
    fn index_mut(&mut self, c: Component) -> &mut T {
        &mut self.0[c.index()]
    }
}

// ── SoldVolume ────────────────────────────────────────────────────────────────

/// Two-slot memory of realised sales, the only input of the elasticity
/// adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct SoldVolume {
    pub last:        f64,
    pub second_last: f64,
    /// Sales accumulated since the last roll (`SalesMemory::PerTick` only).
    pub pending:     f64,
    mode:            SalesMemory,
}

impl SoldVolume {
    pub fn new(mode: SalesMemory) -> Self {
        Self { last: 0.0, second_last: 0.0, pending: 0.0, mode }
    }

    pub fn mode(&self) -> SalesMemory {
        self.mode
    }

    /// Record one sale of `quantity` units.
    pub fn register(&mut self, quantity: f64) {
        match self.mode {
            SalesMemory::PerTransaction => self.push(quantity),
            SalesMemory::PerTick => self.pending += quantity,
        }
    }

    /// Shift `last` into `second_last` and store `quantity` as `last`.
    pub fn push(&mut self, quantity: f64) {
        self.second_last = self.last;
        self.last = quantity;
    }

    /// Close the tick: push the accumulated sales (`PerTick` only).
    pub fn roll(&mut self) {
        if self.mode == SalesMemory::PerTick {
            let q = std::mem::take(&mut self.pending);
            self.push(q);
        }
    }

    /// Growth ratio `last / second_last`, or `None` without a signal.
    pub fn ratio(&self) -> Option<f64> {
        (self.last != 0.0 && self.second_last != 0.0).then(|| self.last / self.second_last)
    }
}

// ── Ledger ────────────────────────────────────────────────────────────────────

/// Stock, demand, and prices of one agent.
///
/// Demand comes in three layers:
/// - `default_demand`: the baseline restored when there is no sales signal.
/// - `planned`: this tick's target, rescaled by the update stage.
/// - `demand`: what is still outstanding; the trading loop decrements it.
///
/// A price of `+∞` means "not for sale".
#[derive(Debug, Clone)]
pub struct Ledger {
    pub stock:          PerComponent<Stock>,
    pub demand:         PerComponent<f64>,
    pub planned:        PerComponent<f64>,
    pub default_demand: PerComponent<f64>,
    pub prices:         PerComponent<f64>,
    /// Mean of the randomised price a component resets to without a signal.
    pub baseline_price: PerComponent<Option<f64>>,
    pub sold_volume:    SoldVolume,
}

impl Ledger {
    pub fn new(sales_memory: SalesMemory) -> Self {
        Self {
            stock:          PerComponent::from_fn(Stock::empty_for),
            demand:         PerComponent::splat(0.0),
            planned:        PerComponent::splat(0.0),
            default_demand: PerComponent::splat(0.0),
            prices:         PerComponent::splat(f64::INFINITY),
            baseline_price: PerComponent::splat(None),
            sold_volume:    SoldVolume::new(sales_memory),
        }
    }

    /// Set the baseline demand for `component`; also becomes the plan and
    /// the outstanding demand.
    pub fn set_default_demand(&mut self, component: Component, amount: f64) {
        self.default_demand[component] = amount;
        self.planned[component] = amount;
        self.demand[component] = amount;
    }

    /// Set this tick's plan and outstanding demand, keeping the baseline.
    pub fn set_planned_demand(&mut self, component: Component, amount: f64) {
        self.planned[component] = amount;
        self.demand[component] = amount;
    }

    /// Reopen every component's demand at its planned level.
    pub fn restore_demand(&mut self) {
        self.demand = self.planned.clone();
    }

    /// Start selling `component` at `price` around `baseline`.
    pub fn offer(&mut self, component: Component, price: f64, baseline: f64) {
        self.prices[component] = price;
        self.baseline_price[component] = Some(baseline);
    }

    // ── Typed stock accessors ────────────────────────────────────────────

    pub fn scalar(&self, c: Component) -> AgentResult<f64> {
        match &self.stock[c] {
            Stock::Scalar(q) => Ok(*q),
            _ => Err(AgentError::ShapeMismatch { component: c }),
        }
    }

    pub fn scalar_mut(&mut self, c: Component) -> AgentResult<&mut f64> {
        match &mut self.stock[c] {
            Stock::Scalar(q) => Ok(q),
            _ => Err(AgentError::ShapeMismatch { component: c }),
        }
    }

    pub fn parts(&self, c: Component) -> AgentResult<&VecDeque<Part>> {
        match &self.stock[c] {
            Stock::Parts(v) => Ok(v),
            _ => Err(AgentError::ShapeMismatch { component: c }),
        }
    }

    pub fn parts_mut(&mut self, c: Component) -> AgentResult<&mut VecDeque<Part>> {
        match &mut self.stock[c] {
            Stock::Parts(v) => Ok(v),
            _ => Err(AgentError::ShapeMismatch { component: c }),
        }
    }

    pub fn cars(&self, c: Component) -> AgentResult<&VecDeque<Car>> {
        match &self.stock[c] {
            Stock::Cars(v) => Ok(v),
            _ => Err(AgentError::ShapeMismatch { component: c }),
        }
    }

    pub fn cars_mut(&mut self, c: Component) -> AgentResult<&mut VecDeque<Car>> {
        match &mut self.stock[c] {
            Stock::Cars(v) => Ok(v),
            _ => Err(AgentError::ShapeMismatch { component: c }),
        }
    }

    /// Every car in every car stock of this agent.
    pub fn all_cars(&self) -> impl Iterator<Item = &Car> {
        self.stock
            .iter()
            .filter_map(|(_, s)| match s {
                Stock::Cars(v) => Some(v.iter()),
                _ => None,
            })
            .flatten()
    }
}
