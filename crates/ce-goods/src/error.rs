use ce_core::{CarId, CarState};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GoodsError {
    #[error("{car} cannot be repaired in state {state:?}")]
    NotBroken { car: CarId, state: CarState },
}

pub type GoodsResult<T> = Result<T, GoodsError>;
