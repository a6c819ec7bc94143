//! Archetype-specific agent state.

use ce_agent::{Agent, Population};
use ce_core::{AgentId, AgentKind};

use crate::car_manufacturer::CarManufacturerState;
use crate::garage::GarageState;
use crate::parts_manufacturer::PartsManufacturerState;
use crate::recycler::RecyclerState;
use crate::refiner::RefinerState;
use crate::user::UserState;
use crate::{BehaviorError, BehaviorResult};

/// The per-archetype half of an agent; the ledger is the shared half.
#[derive(Debug, Clone)]
pub enum Role {
    PartsManufacturer(PartsManufacturerState),
    Refiner(RefinerState),
    Recycler(RecyclerState),
    CarManufacturer(CarManufacturerState),
    User(UserState),
    Garage(GarageState),
    Dismantler,
}

impl Role {
    pub fn kind(&self) -> AgentKind {
        match self {
            Role::PartsManufacturer(_) => AgentKind::PartsManufacturer,
            Role::Refiner(_)           => AgentKind::Refiner,
            Role::Recycler(_)          => AgentKind::Recycler,
            Role::CarManufacturer(_)   => AgentKind::CarManufacturer,
            Role::User(_)              => AgentKind::User,
            Role::Garage(_)            => AgentKind::Garage,
            Role::Dismantler           => AgentKind::Dismantler,
        }
    }
}

/// Generates `Role::as_x`/`as_x_mut` plus a population lookup `x_mut`
/// that fails with `RoleMismatch` on the wrong archetype.
macro_rules! role_access {
    ($variant:ident, $state:ty, $as_ref:ident, $as_mut:ident, $lookup:ident) => {
        impl Role {
            #[inline]
            pub fn $as_ref(&self) -> Option<&$state> {
                match self {
                    Role::$variant(s) => Some(s),
                    _ => None,
                }
            }

            #[inline]
            pub fn $as_mut(&mut self) -> Option<&mut $state> {
                match self {
                    Role::$variant(s) => Some(s),
                    _ => None,
                }
            }
        }

        pub(crate) fn $lookup(agent: &mut Agent<Role>) -> BehaviorResult<&mut $state> {
            let id = agent.id;
            agent.role.$as_mut().ok_or(BehaviorError::RoleMismatch {
                agent:    id,
                expected: AgentKind::$variant,
            })
        }
    };
}

role_access!(PartsManufacturer, PartsManufacturerState, as_parts_manufacturer, as_parts_manufacturer_mut, parts_manufacturer_mut);
role_access!(Refiner, RefinerState, as_refiner, as_refiner_mut, refiner_mut);
role_access!(Recycler, RecyclerState, as_recycler, as_recycler_mut, recycler_mut);
role_access!(CarManufacturer, CarManufacturerState, as_car_manufacturer, as_car_manufacturer_mut, car_manufacturer_mut);
role_access!(User, UserState, as_user, as_user_mut, user_mut);
role_access!(Garage, GarageState, as_garage, as_garage_mut, garage_mut);

/// Shorthand for the population type the behaviours act on.
pub type World = Population<Role>;

/// Ids of every agent of `kind`, cloned so the population can be borrowed
/// mutably while iterating.
pub(crate) fn ids_of(pop: &World, kind: AgentKind) -> Vec<AgentId> {
    pop.of_kind(kind).to_vec()
}
