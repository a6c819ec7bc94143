//! Refiner: an unlimited source of virgin plastic whose price tracks oil.

use ce_agent::{Ledger, Stock, adjust_future_price};
use ce_core::{AgentId, AgentKind, Component, ModelConfig, PriceGrowth, SimRng};
use log::debug;

use crate::role::refiner_mut;
use crate::{Behavior, BehaviorResult, Role, StageContext, World};

/// Mean virgin price before the externality lever.
pub const VIRGIN_PRICE_MEAN: f64 = 2.5;
/// Range of the multiplier applied by an oil shock.
pub const OIL_SHOCK_RANGE: (f64, f64) = (1.5, 2.5);

#[derive(Debug, Clone, PartialEq)]
pub struct RefinerState {
    /// Price at construction; the step of linear oil-price growth.
    pub initial_price: f64,
}

pub struct RefinerBehavior;

pub fn spawn(pop: &mut World, config: &ModelConfig, rng: &mut SimRng) -> AgentId {
    let externality = config.levers.virgin_externality;
    let price = rng.normal(VIRGIN_PRICE_MEAN, 0.2).max(0.0) * externality;

    let mut ledger = Ledger::new(config.variants.sales_memory);
    ledger.stock[Component::Virgin] = Stock::Scalar(f64::INFINITY);
    ledger.offer(Component::Virgin, price, VIRGIN_PRICE_MEAN * externality);

    pop.push(AgentKind::Refiner, ledger, Role::Refiner(RefinerState { initial_price: price }))
}

impl Behavior for RefinerBehavior {
    fn update(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let agent = pop.get_mut(me)?;
        let initial = refiner_mut(agent)?.initial_price;
        let ledger = &mut agent.ledger;
        ledger.restore_demand();
        ledger.sold_volume.roll();
        adjust_future_price(ledger, Component::Virgin, &ctx.config.pricing, ctx.rng);

        let x1 = ctx.config.uncertainties.oil_price_increase;
        let c = Component::Virgin;
        match ctx.config.variants.price_growth {
            PriceGrowth::Compounding => {
                ledger.prices[c] *= x1;
                if let Some(b) = ledger.baseline_price[c].as_mut() {
                    *b *= x1;
                }
            }
            PriceGrowth::Linear => {
                let step = (x1 - 1.0) * initial;
                ledger.prices[c] = (ledger.prices[c] + step).max(0.0);
                if let Some(b) = ledger.baseline_price[c].as_mut() {
                    *b = (*b + step).max(0.0);
                }
            }
        }

        if ctx.rng.gen_bool(ctx.config.uncertainties.oil_shock_probability) {
            let (lo, hi) = OIL_SHOCK_RANGE;
            let m = ctx.rng.uniform(lo, hi);
            ledger.prices[c] *= m;
            if let Some(b) = ledger.baseline_price[c].as_mut() {
                *b *= m;
            }
            debug!("{}: oil shock at {me}, virgin price x{m:.2}", ctx.tick);
        }
        Ok(())
    }
}
