//! Population construction.

use ce_core::{AgentKind, Brand, ModelConfig, SimRng};

use crate::{World, car_manufacturer, dismantler, garage, parts_manufacturer, recycler, refiner, user};

/// Create every agent `config` asks for, archetype by archetype in
/// [`AgentKind::ALL`] order.  That order is also the stage order.
///
/// Expects a validated config.  Car manufacturers are one per brand.
pub fn spawn_population(config: &ModelConfig, rng: &mut SimRng) -> World {
    let counts = &config.agent_counts;
    let mut pop = World::with_capacity(counts.total());

    for kind in AgentKind::ALL {
        for i in 0..counts.count(kind) {
            match kind {
                AgentKind::PartsManufacturer => parts_manufacturer::spawn(&mut pop, config, rng),
                AgentKind::Refiner           => refiner::spawn(&mut pop, config, rng),
                AgentKind::Recycler          => recycler::spawn(&mut pop, config, rng),
                AgentKind::CarManufacturer   => car_manufacturer::spawn(&mut pop, Brand::ALL[i], config, rng),
                AgentKind::User              => user::spawn(&mut pop, config, rng),
                AgentKind::Garage            => garage::spawn(&mut pop, config, rng),
                AgentKind::Dismantler        => dismantler::spawn(&mut pop, config, rng),
            };
        }
    }
    pop
}
