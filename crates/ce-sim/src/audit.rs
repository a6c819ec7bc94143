//! Whole-population consistency checks.
//!
//! These never fire for a correct model; they are enabled with
//! `ModelConfig::audit` to catch bookkeeping bugs at the stage that
//! introduced them.

use ce_agent::Stock;
use ce_behavior::World;
use ce_core::{AgentId, AgentKind, CarId, Component};
use rustc_hash::{FxHashMap, FxHashSet};

/// Slack allowed on scalar stocks for floating-point subtraction.
pub const STOCK_TOLERANCE: f64 = 1e-9;

/// Check every invariant, returning a description of the first violation.
///
/// - scalar stocks and outstanding demand are non-negative
/// - no car is held by two agents, or twice by one
/// - a user holds at most one car
/// - a garage's `customer_base` lists exactly the cars in its repair queue
pub fn check(pop: &World) -> Result<(), String> {
    let mut holders: FxHashMap<CarId, AgentId> = FxHashMap::default();

    for agent in pop.iter() {
        for (c, stock) in agent.ledger.stock.iter() {
            match stock {
                Stock::Scalar(v) if *v < -STOCK_TOLERANCE => {
                    return Err(format!("{} holds {v} {c}", agent.id));
                }
                Stock::Cars(cars) => {
                    for car in cars {
                        if let Some(other) = holders.insert(car.id, agent.id) {
                            return Err(format!("{} held by both {other} and {}", car.id, agent.id));
                        }
                    }
                }
                _ => {}
            }
        }
        if let Some((c, d)) = agent.ledger.demand.iter().find(|(_, d)| **d < -STOCK_TOLERANCE) {
            return Err(format!("{} has negative demand {d} for {c}", agent.id));
        }

        match agent.kind {
            AgentKind::User => {
                let n = agent.ledger.cars(Component::Cars).map(|c| c.len()).unwrap_or(0);
                if n > 1 {
                    return Err(format!("user {} owns {n} cars", agent.id));
                }
            }
            AgentKind::Garage => {
                let Some(state) = agent.role.as_garage() else {
                    return Err(format!("garage {} carries no garage state", agent.id));
                };
                let queued: FxHashSet<CarId> = agent
                    .ledger
                    .cars(Component::Cars)
                    .map(|cars| cars.iter().map(|c| c.id).collect())
                    .unwrap_or_default();
                let known: FxHashSet<CarId> = state.customer_base.keys().copied().collect();
                if queued != known {
                    return Err(format!(
                        "garage {} queues {} cars but has {} customers on record",
                        agent.id,
                        queued.len(),
                        known.len()
                    ));
                }
            }
            _ => {}
        }
    }
    Ok(())
}
