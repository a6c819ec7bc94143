//! Elasticity-driven price and demand adjustment.
//!
//! With a sales signal `r = last / second_last` one adjustment multiplies
//! the price (or planned demand) by
//!
//! ```text
//! noise × clamp(r^elasticity, min_scaling, max_scaling),   noise = max(0, N(1, σ))
//! ```
//!
//! Without a signal (either memorised sale is zero) a price resets to a
//! random draw around its baseline and a demand to its default.

use ce_core::{Component, PricingParams, SimRng};

use crate::Ledger;

/// Standard deviation of the randomised price a component resets to.
pub const BASELINE_PRICE_SD: f64 = 0.2;

/// The clamped elasticity factor for growth ratio `ratio`, noise excluded.
#[inline]
pub fn scaling_factor(ratio: f64, elasticity: f64, min: f64, max: f64) -> f64 {
    ratio.powf(elasticity).clamp(min, max)
}

fn noise(params: &PricingParams, rng: &mut SimRng) -> f64 {
    rng.normal(1.0, params.noise_sd).max(0.0)
}

/// Update the price of `component` from the agent's sales memory.
///
/// A component the agent does not sell (no baseline) keeps its price in
/// the no-signal branch.
pub fn adjust_future_price(ledger: &mut Ledger, component: Component, params: &PricingParams, rng: &mut SimRng) {
    let noise = noise(params, rng);
    match ledger.sold_volume.ratio() {
        Some(r) => {
            let f = scaling_factor(r, params.price_elasticity, params.min_price_scaling, params.max_price_scaling);
            ledger.prices[component] *= noise * f;
        }
        None => {
            if let Some(mean) = ledger.baseline_price[component] {
                ledger.prices[component] = rng.normal(mean, BASELINE_PRICE_SD).max(0.0);
            }
        }
    }
}

/// Update the planned demand of `component` from the agent's sales memory
/// and reopen it as outstanding demand.  Discrete components are rounded.
pub fn adjust_future_demand(ledger: &mut Ledger, component: Component, params: &PricingParams, rng: &mut SimRng) {
    let noise = noise(params, rng);
    let planned = match ledger.sold_volume.ratio() {
        Some(r) => {
            let f = scaling_factor(r, params.demand_elasticity, params.min_demand_scaling, params.max_demand_scaling);
            let scaled = ledger.planned[component] * noise * f;
            if component.is_continuous() { scaled } else { scaled.round() }
        }
        None => ledger.default_demand[component],
    };
    ledger.set_planned_demand(component, planned);
}
