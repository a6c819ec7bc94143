use ce_agent::AgentError;
use ce_core::{AgentId, AgentKind, CarId};
use ce_goods::GoodsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Goods(#[from] GoodsError),

    #[error("{agent} does not carry {expected} state")]
    RoleMismatch { agent: AgentId, expected: AgentKind },

    #[error("garage {garage} holds {car} but has no owner on record")]
    UnknownCustomer { garage: AgentId, car: CarId },

    #[error("invariant violated: {0}")]
    Invariant(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
