//! Recycler: shreds discarded parts and end-of-life cars into recyclate.
//!
//! Per shredded part with plastic `(v, low, high)`:
//!
//! ```text
//! v    → HIGH
//! high → HIGH  w.p. efficiency, else LOW
//! low  → LOW   w.p. efficiency, else leaked
//! ```

use ce_agent::{Ledger, Stock, adjust_future_price, get_component_from_suppliers, rank_suppliers};
use ce_core::{AgentId, AgentKind, Component, LeakageAccounting, ModelConfig, SimRng};
use ce_goods::Part;
use log::debug;

use crate::role::{ids_of, recycler_mut};
use crate::{Behavior, BehaviorResult, FlowLog, Role, StageContext, World};

/// Efficiency before the cohesive-factor lever.
pub const BASE_EFFICIENCY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct RecyclerState {
    /// Probability that a grade keeps its quality through shredding.
    pub efficiency:      f64,
    /// Plastic lost this tick (or since start, with cumulative accounting).
    pub current_leakage: f64,
}

/// Shred one part into `(low, high)` stocks, returning the leaked mass.
pub fn shred(
    mut part:   Part,
    efficiency: f64,
    low:        &mut f64,
    high:       &mut f64,
    rng:        &mut SimRng,
    flows:      &mut FlowLog,
) -> f64 {
    let r = part.extract_plastic();
    flows.extracted += r.total();

    let mut to_high = r.virgin;
    let mut to_low = 0.0;
    let mut leaked = 0.0;
    if rng.random::<f64>() < efficiency {
        to_high += r.recyclate_high;
    } else {
        to_low += r.recyclate_high;
    }
    if rng.random::<f64>() < efficiency {
        to_low += r.recyclate_low;
    } else {
        leaked += r.recyclate_low;
    }

    *high += to_high;
    *low += to_low;
    flows.produce(Component::RecyclateHigh, to_high);
    flows.produce(Component::RecyclateLow, to_low);
    flows.leaked += leaked;
    leaked
}

pub struct RecyclerBehavior;

pub fn spawn(pop: &mut World, config: &ModelConfig, rng: &mut SimRng) -> AgentId {
    let mut ledger = Ledger::new(config.variants.sales_memory);
    ledger.stock[Component::RecyclateLow] = Stock::Scalar(rng.normal(10.0, 2.0).max(0.0));
    ledger.stock[Component::RecyclateHigh] = Stock::Scalar(rng.normal(10.0, 2.0).max(0.0));
    ledger.offer(Component::RecyclateLow, rng.normal(2.5, 0.2).max(0.0), 2.5);
    ledger.offer(Component::RecyclateHigh, rng.normal(3.0, 0.2).max(0.0), 3.0);

    let state = RecyclerState {
        efficiency:      (BASE_EFFICIENCY * config.levers.cohesive_factor).min(1.0),
        current_leakage: 0.0,
    };
    pop.push(AgentKind::Recycler, ledger, Role::Recycler(state))
}

impl Behavior for RecyclerBehavior {
    fn acquire(&self, me: AgentId, pop: &mut World, _ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let garages = ids_of(pop, AgentKind::Garage);
        let dismantlers = ids_of(pop, AgentKind::Dismantler);

        for (suppliers, component) in [
            (&garages, Component::CarsForRecycler),
            (&garages, Component::PartsForRecycler),
            (&dismantlers, Component::PartsForRecycler),
        ] {
            let ranked = rank_suppliers(pop, suppliers, component);
            get_component_from_suppliers(pop, me, &ranked, component, Some(f64::INFINITY))?;
        }
        Ok(())
    }

    fn process(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let agent = pop.get_mut(me)?;
        let mut parts: Vec<Part> = agent.ledger.parts_mut(Component::PartsForRecycler)?.drain(..).collect();
        for mut car in agent.ledger.cars_mut(Component::CarsForRecycler)?.drain(..) {
            parts.extend(car.strip_parts());
        }

        let mut low = agent.ledger.scalar(Component::RecyclateLow)?;
        let mut high = agent.ledger.scalar(Component::RecyclateHigh)?;
        let state = recycler_mut(agent)?;
        if ctx.config.variants.leakage == LeakageAccounting::PerTick {
            state.current_leakage = 0.0;
        }
        let shredded = parts.len();
        for part in parts {
            state.current_leakage += shred(part, state.efficiency, &mut low, &mut high, ctx.rng, ctx.flows);
        }
        let leakage = state.current_leakage;

        *agent.ledger.scalar_mut(Component::RecyclateLow)? = low;
        *agent.ledger.scalar_mut(Component::RecyclateHigh)? = high;
        debug!("{}: recycler {me} shredded {shredded} parts, leakage {leakage:.3}", ctx.tick);
        Ok(())
    }

    fn update(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let agent = pop.get_mut(me)?;
        let ledger = &mut agent.ledger;
        ledger.restore_demand();
        ledger.sold_volume.roll();
        adjust_future_price(ledger, Component::RecyclateLow, &ctx.config.pricing, ctx.rng);
        adjust_future_price(ledger, Component::RecyclateHigh, &ctx.config.pricing, ctx.rng);

        let state = recycler_mut(agent)?;
        state.efficiency = (state.efficiency * ctx.config.uncertainties.recycling_efficiency_increase).min(1.0);
        Ok(())
    }
}
