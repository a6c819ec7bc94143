//! Car manufacturer: one per brand, assembles parts into cars.
//!
//! Users buy cars directly, so sales are counted over the whole year and
//! pushed into the sales memory once, in the update stage.

use ce_agent::{
    Ledger, Stock, adjust_future_demand, adjust_future_price, get_component_from_suppliers, rank_suppliers,
};
use ce_core::{AgentId, AgentKind, Brand, Component, ModelConfig, SalesMemory, SimRng};
use ce_goods::{Car, Part, PlasticRatio};
use log::debug;

use crate::role::car_manufacturer_mut;
use crate::{Behavior, BehaviorResult, Role, StageContext, World};

const SEED_PARTS: usize = 100;
const SEED_CARS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct CarManufacturerState {
    pub brand:        Brand,
    /// Cars to assemble in the next process stage.
    pub build_target: usize,
}

pub struct CarManufacturerBehavior;

/// A brand-new car of `brand` from `parts`, with the configured lifetime.
pub fn assemble(pop: &mut World, brand: Brand, parts: Vec<Part>, config: &ModelConfig) -> Car {
    Car::new(pop.next_car_id(), brand, parts, config.default_max_lifetime, config.break_down_probability)
}

pub fn spawn(pop: &mut World, brand: Brand, config: &ModelConfig, rng: &mut SimRng) -> AgentId {
    let virgin_parts = |n: usize| (0..n).map(|_| Part::standard(PlasticRatio::virgin_only())).collect::<Vec<_>>();

    let cars: Vec<Car> = (0..SEED_CARS)
        .map(|_| assemble(pop, brand, virgin_parts(config.nr_of_parts), config))
        .collect();

    let mut ledger = Ledger::new(SalesMemory::PerTick);
    ledger.stock[Component::Parts] = Stock::Parts(virgin_parts(SEED_PARTS).into());
    ledger.stock[Component::Cars] = Stock::Cars(cars.into());
    ledger.offer(Component::Cars, rng.normal(1000.0, 0.2).max(0.0), 1000.0);
    ledger.set_default_demand(Component::Parts, rng.normal(100.0, 2.0).round().max(0.0));

    let state = CarManufacturerState {
        brand,
        build_target: rng.normal(10.0, 2.0).round().max(0.0) as usize,
    };
    pop.push(AgentKind::CarManufacturer, ledger, Role::CarManufacturer(state))
}

impl Behavior for CarManufacturerBehavior {
    fn acquire(&self, me: AgentId, pop: &mut World, _ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let suppliers = rank_suppliers(pop, pop.of_kind(AgentKind::PartsManufacturer), Component::Parts);
        get_component_from_suppliers(pop, me, &suppliers, Component::Parts, None)?;
        Ok(())
    }

    /// Build cars until the target is met or a full set of parts is missing.
    fn process(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let nr_of_parts = ctx.config.nr_of_parts;
        let (brand, target) = {
            let state = car_manufacturer_mut(pop.get_mut(me)?)?;
            (state.brand, state.build_target)
        };

        let mut built = 0;
        while built < target {
            let stock = pop.get_mut(me)?.ledger.parts_mut(Component::Parts)?;
            if stock.len() < nr_of_parts {
                debug!("{}: car manufacturer {me} short of parts after {built} of {target} cars", ctx.tick);
                break;
            }
            let parts: Vec<Part> = stock.drain(..nr_of_parts).collect();
            let car = assemble(pop, brand, parts, ctx.config);
            pop.get_mut(me)?.ledger.cars_mut(Component::Cars)?.push_back(car);
            built += 1;
        }
        ctx.flows.consume(Component::Parts, (built * nr_of_parts) as f64);
        ctx.flows.produce(Component::Cars, built as f64);
        Ok(())
    }

    fn update(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let agent = pop.get_mut(me)?;
        let ledger = &mut agent.ledger;
        ledger.restore_demand();
        ledger.sold_volume.roll();
        adjust_future_price(ledger, Component::Cars, &ctx.config.pricing, ctx.rng);
        adjust_future_demand(ledger, Component::Parts, &ctx.config.pricing, ctx.rng);
        let parts_plan = ledger.planned[Component::Parts];

        let state = car_manufacturer_mut(agent)?;
        state.build_target = (parts_plan / ctx.config.nr_of_parts as f64).round().max(0.0) as usize;
        Ok(())
    }
}
