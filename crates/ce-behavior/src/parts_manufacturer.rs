//! Parts manufacturer: moulds plastic into parts under recyclate quotas.

use ce_agent::{
    Ledger, Stock, adjust_future_demand, adjust_future_price, get_component_from_suppliers, rank_suppliers,
};
use ce_core::{AgentId, AgentKind, Component, ModelConfig, SimRng};
use ce_goods::{Part, PlasticRatio};
use log::debug;

use crate::role::{ids_of, parts_manufacturer_mut};
use crate::{Behavior, BehaviorResult, Role, StageContext, World};

/// Headroom above a minimum recyclate share when drawing a ratio.
pub const RATIO_HEADROOM: f64 = 1.25;

const SEED_PARTS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct PartsManufacturerState {
    /// Composition of the parts planned for the next production run.
    pub ratio:   PlasticRatio,
    /// Minimum share of low-grade recyclate per part.
    pub min_low: f64,
    /// Minimum share of high-grade recyclate per part.
    pub min_high: f64,
}

/// Draw a part composition meeting the minimum recyclate shares.
///
/// Each recyclate grade is drawn in `[min, 1.25·min]`; if the two together
/// exceed 1 they are scaled down to sum to 1.  Virgin plastic fills the rest.
pub fn compute_plastic_ratio(min_low: f64, min_high: f64, rng: &mut SimRng) -> PlasticRatio {
    let mut low = rng.uniform(min_low, min_low * RATIO_HEADROOM);
    let mut high = rng.uniform(min_high, min_high * RATIO_HEADROOM);
    let recyclate = low + high;
    if recyclate > 1.0 {
        low /= recyclate;
        high = 1.0 - low;
        return PlasticRatio::new(0.0, low, high);
    }
    PlasticRatio::new((1.0 - low - high).max(0.0), low, high)
}

fn plan_plastics(ledger: &mut Ledger, ratio: &PlasticRatio, parts: f64) {
    for c in Component::PLASTICS {
        ledger.set_planned_demand(c, ratio[c] * parts);
    }
}

pub struct PartsManufacturerBehavior;

pub fn spawn(pop: &mut World, config: &ModelConfig, rng: &mut SimRng) -> AgentId {
    let min_high = config.levers.min_recyclate_high;
    let min_low = (config.levers.min_recyclate_total - min_high).max(0.0);
    let ratio = compute_plastic_ratio(min_low, min_high, rng);

    let mut ledger = Ledger::new(config.variants.sales_memory);
    let parts_plan = rng.normal(50.0, 10.0).round().max(0.0);
    ledger.set_default_demand(Component::Parts, parts_plan);
    for c in Component::PLASTICS {
        ledger.set_default_demand(c, ratio[c] * parts_plan);
    }

    ledger.stock[Component::Virgin] = Stock::Scalar(rng.normal(2.0, 0.2).max(0.0));
    ledger.stock[Component::RecyclateLow] = Stock::Scalar(rng.normal(2.0, 0.2).max(0.0));
    ledger.stock[Component::RecyclateHigh] = Stock::Scalar(rng.normal(3.0, 0.1).max(0.0));
    ledger.stock[Component::Parts] = Stock::Parts((0..SEED_PARTS).map(|_| Part::standard(ratio)).collect());
    ledger.offer(Component::Parts, rng.normal(2.5, 0.2).max(0.0), 2.5);

    let state = PartsManufacturerState { ratio, min_low, min_high };
    pop.push(AgentKind::PartsManufacturer, ledger, Role::PartsManufacturer(state))
}

impl Behavior for PartsManufacturerBehavior {
    fn acquire(&self, me: AgentId, pop: &mut World, _ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let refiners = ids_of(pop, AgentKind::Refiner);
        let recyclers = ids_of(pop, AgentKind::Recycler);

        for (suppliers, component) in [
            (&refiners, Component::Virgin),
            (&recyclers, Component::RecyclateLow),
            (&recyclers, Component::RecyclateHigh),
        ] {
            let ranked = rank_suppliers(pop, suppliers, component);
            get_component_from_suppliers(pop, me, &ranked, component, None)?;
        }
        Ok(())
    }

    /// Mint up to the planned number of unit-mass parts.
    ///
    /// A recyclate grade in short supply is replaced by virgin plastic.  When
    /// even virgin plastic cannot complete a part, production stops.
    fn process(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let agent = pop.get_mut(me)?;
        let target = agent.ledger.planned[Component::Parts].max(0.0) as usize;
        let ratio = parts_manufacturer_mut(agent)?.ratio;
        let ledger = &mut agent.ledger;

        let mut stock = PlasticRatio::new(
            ledger.scalar(Component::Virgin)?,
            ledger.scalar(Component::RecyclateLow)?,
            ledger.scalar(Component::RecyclateHigh)?,
        );
        let mut minted = Vec::with_capacity(target);
        for _ in 0..target {
            let low = ratio.recyclate_low.min(stock.recyclate_low);
            let high = ratio.recyclate_high.min(stock.recyclate_high);
            let virgin = ratio.virgin + (ratio.recyclate_low - low) + (ratio.recyclate_high - high);
            if virgin > stock.virgin + 1e-12 {
                debug!(
                    "{}: parts manufacturer {me} halted after {} of {target} parts (virgin short)",
                    ctx.tick,
                    minted.len()
                );
                break;
            }
            let used = PlasticRatio::new(virgin, low, high);
            for c in Component::PLASTICS {
                stock[c] = (stock[c] - used[c]).max(0.0);
                ctx.flows.consume(c, used[c]);
            }
            minted.push(Part::standard(used));
        }
        ctx.flows.produce(Component::Parts, minted.len() as f64);

        for c in Component::PLASTICS {
            *ledger.scalar_mut(c)? = stock[c];
        }
        ledger.parts_mut(Component::Parts)?.extend(minted);
        Ok(())
    }

    fn update(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let agent = pop.get_mut(me)?;
        let ledger = &mut agent.ledger;
        ledger.restore_demand();
        ledger.sold_volume.roll();
        adjust_future_price(ledger, Component::Parts, &ctx.config.pricing, ctx.rng);
        adjust_future_demand(ledger, Component::Parts, &ctx.config.pricing, ctx.rng);
        let parts = ledger.planned[Component::Parts];

        let state = parts_manufacturer_mut(agent)?;
        state.ratio = compute_plastic_ratio(state.min_low, state.min_high, ctx.rng);
        let ratio = state.ratio;
        plan_plastics(&mut agent.ledger, &ratio, parts);
        Ok(())
    }
}
