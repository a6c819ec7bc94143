//! Car user: owns at most one car, drives it, takes it to a garage.

use ce_agent::{Ledger, Stock, get_component_from_suppliers, rank_suppliers};
use ce_core::{AgentId, AgentKind, Brand, CarState, Component, ModelConfig, SimRng};
use ce_goods::{Part, PlasticRatio};

use crate::car_manufacturer::assemble;
use crate::garage::receive_car;
use crate::role::{ids_of, user_mut};
use crate::{Behavior, BehaviorResult, Role, StageContext, World};

/// Share of reused parts in the initial fleet.
const INITIAL_REUSED_SHARE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct UserState {
    /// Scales the service life of every car this user owns (> 1 wears faster).
    pub use_intensity:      f64,
    /// The user's car is at a garage being repaired.
    pub waiting_for_repair: bool,
}

pub struct UserBehavior;

/// Create a user, possibly with a car from the legacy fleet.
///
/// The car's age is drawn uniformly in `0..=default_max_lifetime`; age 0
/// means the user starts without a car.
pub fn spawn(pop: &mut World, config: &ModelConfig, rng: &mut SimRng) -> AgentId {
    let use_intensity = rng.normal(1.0, config.std_use_intensity).max(0.0);

    let mut ledger = Ledger::new(config.variants.sales_memory);
    ledger.set_default_demand(Component::Cars, 1.0);

    let age = rng.gen_range(0..=config.default_max_lifetime);
    if age > 0 {
        let brand = Brand::ALL[rng.gen_range(0..Brand::COUNT)];
        let parts: Vec<Part> = (0..config.nr_of_parts)
            .map(|_| {
                let mut p = Part::standard(PlasticRatio::virgin_only());
                if rng.gen_bool(INITIAL_REUSED_SHARE) {
                    p.reuse();
                }
                p
            })
            .collect();
        let mut car = assemble(pop, brand, parts, config);
        car.lifetime_current = age;
        car.apply_use_intensity(use_intensity);
        if car.lifetime_current < car.max_lifetime && rng.gen_bool(config.break_down_probability) {
            car.state = CarState::Broken;
        }
        ledger.stock[Component::Cars] = Stock::Cars([car].into());
    }

    let state = UserState { use_intensity, waiting_for_repair: false };
    pop.push(AgentKind::User, ledger, Role::User(state))
}

/// The garage a user takes a car to: the cheapest one with parts in stock,
/// otherwise the cheapest one.
pub fn select_garage(pop: &World) -> Option<AgentId> {
    let ranked = rank_suppliers(pop, pop.of_kind(AgentKind::Garage), Component::Parts);
    let has_parts = |id: &&AgentId| {
        pop.get(**id)
            .map(|g| g.ledger.stock[Component::Parts].available() > 0.0)
            .unwrap_or(false)
    };
    ranked.iter().find(has_parts).or(ranked.first()).copied()
}

impl Behavior for UserBehavior {
    /// Buy a car from the cheapest manufacturer with stock, if carless and
    /// not waiting on a repair.
    fn acquire(&self, me: AgentId, pop: &mut World, _ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let agent = pop.get_mut(me)?;
        let owns_car = !agent.ledger.cars(Component::Cars)?.is_empty();
        let state = user_mut(agent)?;
        if owns_car || state.waiting_for_repair {
            return Ok(());
        }
        let use_intensity = state.use_intensity;

        let makers = ids_of(pop, AgentKind::CarManufacturer);
        let ranked = rank_suppliers(pop, &makers, Component::Cars);
        get_component_from_suppliers(pop, me, &ranked, Component::Cars, Some(1.0))?;

        if let Some(car) = pop.get_mut(me)?.ledger.cars_mut(Component::Cars)?.front_mut() {
            car.apply_use_intensity(use_intensity);
        }
        Ok(())
    }

    /// Drive the car for a year; a broken or retired car goes to a garage.
    fn process(&self, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        let cars = pop.get_mut(me)?.ledger.cars_mut(Component::Cars)?;
        let Some(car) = cars.front_mut() else {
            return Ok(());
        };
        car.use_car(ctx.rng);
        if car.is_functioning() {
            return Ok(());
        }
        let Some(garage) = select_garage(pop) else {
            return Ok(());
        };

        let (user, garage) = pop.pair_mut(me, garage)?;
        let Some(car) = user.ledger.cars_mut(Component::Cars)?.pop_front() else {
            return Ok(());
        };
        let in_repair = receive_car(garage, me, car, ctx)?;
        user_mut(user)?.waiting_for_repair = in_repair;
        Ok(())
    }

    fn update(&self, me: AgentId, pop: &mut World, _ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        pop.get_mut(me)?.ledger.restore_demand();
        Ok(())
    }
}
