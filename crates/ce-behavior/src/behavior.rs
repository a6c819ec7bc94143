//! The `Behavior` capability trait and per-archetype dispatch.

use ce_core::{AgentId, AgentKind};

use crate::car_manufacturer::CarManufacturerBehavior;
use crate::dismantler::DismantlerBehavior;
use crate::garage::GarageBehavior;
use crate::parts_manufacturer::PartsManufacturerBehavior;
use crate::recycler::RecyclerBehavior;
use crate::refiner::RefinerBehavior;
use crate::user::UserBehavior;
use crate::{BehaviorResult, StageContext, World};

/// The three things an agent does each tick.
///
/// Every method receives the whole population, because buying and handing
/// goods over mutate the counterparty too.  Implementations only touch
/// other agents through paired transfers.
///
/// All methods default to doing nothing; an archetype overrides the stages
/// it takes part in.
pub trait Behavior: Sync {
    /// Stage 1: rank suppliers and buy.
    fn acquire(&self, _me: AgentId, _pop: &mut World, _ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        Ok(())
    }

    /// Stage 2: transform own stock (manufacture, shred, drive, repair).
    fn process(&self, _me: AgentId, _pop: &mut World, _ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        Ok(())
    }

    /// Stage 3: recompute next tick's prices and demand from realised sales.
    fn update(&self, _me: AgentId, _pop: &mut World, _ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
        Ok(())
    }
}

/// The three stages of a tick, in execution order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Stage {
    Acquire,
    Process,
    Update,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Acquire, Stage::Process, Stage::Update];
}

/// The behaviour implementing `kind`.
pub fn behavior_for(kind: AgentKind) -> &'static dyn Behavior {
    match kind {
        AgentKind::PartsManufacturer => &PartsManufacturerBehavior,
        AgentKind::Refiner           => &RefinerBehavior,
        AgentKind::Recycler          => &RecyclerBehavior,
        AgentKind::CarManufacturer   => &CarManufacturerBehavior,
        AgentKind::User              => &UserBehavior,
        AgentKind::Garage            => &GarageBehavior,
        AgentKind::Dismantler        => &DismantlerBehavior,
    }
}

/// Run one stage for one agent.
pub fn run_stage(stage: Stage, me: AgentId, pop: &mut World, ctx: &mut StageContext<'_>) -> BehaviorResult<()> {
    let behavior = behavior_for(pop.get(me)?.kind);
    match stage {
        Stage::Acquire => behavior.acquire(me, pop, ctx),
        Stage::Process => behavior.process(me, pop, ctx),
        Stage::Update  => behavior.update(me, pop, ctx),
    }
}
