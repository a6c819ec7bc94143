//! Dismantler: strips end-of-life cars for reusable parts.

use ce_agent::{Ledger, Stock, adjust_future_price, get_component_from_suppliers, rank_suppliers};
use ce_core::{AgentId, AgentKind, Component, ModelConfig, SimRng};
use ce_goods::{Part, PlasticRatio};
use log::debug;

use crate::role::ids_of;
use crate::{Behavior, BehaviorResult, Role, StageContext, World};

const SEED_PARTS: usize = 100;

pub struct DismantlerBehavior;

pub fn spawn(pop: &mut World, config: &ModelConfig, rng: &mut SimRng) -> AgentId {
    let mut ledger = Ledger::new(config.variants.sales_memory);
    ledger.stock[Component::Parts] = Stock::Parts(
        (0..SEED_PARTS)
            .map(|_| {
                let mut p = Part::standard(PlasticRatio::virgin_only());
                p.reuse();
                p
            })
            .collect(),
    );
    ledger.offer(Component::Parts, rng.normal(2.5, 0.2).max(0.0), 2.5);
    pop.push(AgentKind::Dismantler, ledger, Role::Dismantler)
}

impl Behavior for DismantlerBehavior {
    fn acquire(&self, me: AgentId, pop: &mut World, _ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let garages = ids_of(pop, AgentKind::Garage);
        let ranked = rank_suppliers(pop, &garages, Component::CarsForDismantler);
        get_component_from_suppliers(pop, me, &ranked, Component::CarsForDismantler, Some(f64::INFINITY))?;
        Ok(())
    }

    /// First-life parts are salvaged for resale; parts already on their
    /// second life are discarded for recycling.
    fn process(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let ledger = &mut pop.get_mut(me)?.ledger;
        let cars: Vec<_> = ledger.cars_mut(Component::CarsForDismantler)?.drain(..).collect();
        let n_cars = cars.len();

        let (mut salvaged, mut discarded) = (Vec::new(), Vec::new());
        for mut car in cars {
            for mut part in car.strip_parts() {
                if part.is_reused() {
                    discarded.push(part);
                } else {
                    part.reuse();
                    salvaged.push(part);
                }
            }
        }
        if n_cars > 0 {
            debug!(
                "{}: dismantler {me} took apart {n_cars} cars: {} parts salvaged, {} discarded",
                ctx.tick,
                salvaged.len(),
                discarded.len()
            );
        }
        ledger.parts_mut(Component::Parts)?.extend(salvaged);
        ledger.parts_mut(Component::PartsForRecycler)?.extend(discarded);
        Ok(())
    }

    fn update(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let ledger = &mut pop.get_mut(me)?.ledger;
        ledger.restore_demand();
        ledger.sold_volume.roll();
        adjust_future_price(ledger, Component::Parts, &ctx.config.pricing, ctx.rng);
        Ok(())
    }
}
