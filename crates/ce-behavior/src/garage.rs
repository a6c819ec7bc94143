//! Garage: repairs broken cars and routes end-of-life cars onward.

use ce_agent::{
    Agent, Ledger, Stock, adjust_future_demand, adjust_future_price, get_component_from_suppliers, rank_suppliers,
};
use ce_core::{AgentId, AgentKind, CarId, CarState, Component, ModelConfig, SimRng};
use ce_goods::{Car, Part, PlasticRatio};
use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::role::{garage_mut, ids_of, user_mut};
use crate::{Behavior, BehaviorError, BehaviorResult, Role, StageContext, World};

const SEED_PARTS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GarageState {
    /// Owner of every car waiting for repair.  An entry is removed exactly
    /// once, when its car is handed back.
    pub customer_base:       FxHashMap<CarId, AgentId>,
    /// Broken cars brought in this year; the garage's sales signal.
    pub current_year_demand: f64,
}

pub struct GarageBehavior;

pub fn spawn(pop: &mut World, config: &ModelConfig, rng: &mut SimRng) -> AgentId {
    let mut ledger = Ledger::new(config.variants.sales_memory);
    ledger.offer(Component::Parts, rng.normal(4.0, 0.2).max(0.0), 4.0);
    ledger.set_default_demand(Component::Parts, rng.normal(100.0, 2.0).round().max(0.0));
    ledger.stock[Component::Parts] = Stock::Parts(
        (0..SEED_PARTS).map(|_| Part::standard(PlasticRatio::virgin_only())).collect(),
    );
    pop.push(AgentKind::Garage, ledger, Role::Garage(GarageState::default()))
}

/// Take a car over from `owner`.
///
/// A broken car joins the repair queue and `true` is returned (the owner
/// now waits for it).  A retired car goes to a dismantler with probability
/// `circularity_friendliness`, otherwise to a recycler.
pub fn receive_car(
    garage: &mut Agent<Role>,
    owner:  AgentId,
    car:    Car,
    ctx:    &mut StageContext<'_>,
) -> BehaviorResult<bool> {
    match car.state {
        CarState::Broken => {
            let state = garage_mut(garage)?;
            state.customer_base.insert(car.id, owner);
            state.current_year_demand += 1.0;
            trace!("{}: {owner} brought broken {} to garage {}", ctx.tick, car.id, garage.id);
            garage.ledger.cars_mut(Component::Cars)?.push_back(car);
            Ok(true)
        }
        CarState::EndOfLife => {
            let to = if ctx.rng.random::<f64>() < ctx.config.circularity_friendliness {
                Component::CarsForDismantler
            } else {
                Component::CarsForRecycler
            };
            trace!("{}: {owner} retired {} via garage {} to {to}", ctx.tick, car.id, garage.id);
            garage.ledger.cars_mut(to)?.push_back(car);
            Ok(false)
        }
        CarState::Functioning => Err(BehaviorError::Invariant(format!(
            "{owner} handed functioning {} to garage {}",
            car.id, garage.id
        ))),
    }
}

impl Behavior for GarageBehavior {
    /// Fill the reused-parts quota from dismantlers, then the rest of the
    /// demand from manufacturers and dismantlers ranked together.
    fn acquire(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let dismantlers = ids_of(pop, AgentKind::Dismantler);
        let quota = (ctx.config.levers.min_reused_parts * pop.get(me)?.ledger.demand[Component::Parts]).round();
        if quota > 0.0 {
            let ranked = rank_suppliers(pop, &dismantlers, Component::Parts);
            get_component_from_suppliers(pop, me, &ranked, Component::Parts, Some(quota))?;
        }

        let mut suppliers = ids_of(pop, AgentKind::PartsManufacturer);
        suppliers.extend(dismantlers);
        let ranked = rank_suppliers(pop, &suppliers, Component::Parts);
        get_component_from_suppliers(pop, me, &ranked, Component::Parts, None)?;
        Ok(())
    }

    /// Repair queued cars oldest-first while parts last and hand each one
    /// back to its owner.  The replaced part is discarded for recycling.
    fn process(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let mut repaired = 0;
        loop {
            let garage = pop.get_mut(me)?;
            if garage.ledger.parts(Component::Parts)?.is_empty() {
                break;
            }
            let Some(mut car) = garage.ledger.cars_mut(Component::Cars)?.pop_front() else {
                break;
            };
            let Some(part) = garage.ledger.parts_mut(Component::Parts)?.pop_front() else {
                break;
            };
            if let Some(removed) = car.repair_car(part, ctx.rng)? {
                garage.ledger.parts_mut(Component::PartsForRecycler)?.push_back(removed);
            }
            let owner = garage_mut(garage)?
                .customer_base
                .remove(&car.id)
                .ok_or(BehaviorError::UnknownCustomer { garage: me, car: car.id })?;

            let (_, user) = pop.pair_mut(me, owner)?;
            user.ledger.cars_mut(Component::Cars)?.push_back(car);
            user_mut(user)?.waiting_for_repair = false;
            repaired += 1;
        }
        if repaired > 0 {
            debug!("{}: garage {me} repaired {repaired} cars", ctx.tick);
        }
        Ok(())
    }

    fn update(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let agent = pop.get_mut(me)?;
        let demand = std::mem::take(&mut garage_mut(agent)?.current_year_demand);
        let ledger = &mut agent.ledger;
        ledger.restore_demand();
        ledger.sold_volume.push(demand);
        adjust_future_price(ledger, Component::Parts, &ctx.config.pricing, ctx.rng);
        adjust_future_demand(ledger, Component::Parts, &ctx.config.pricing, ctx.rng);
        Ok(())
    }
}
