use ce_behavior::BehaviorError;
use ce_core::{CeError, Tick};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("model configuration error: {0}")]
    Config(String),

    #[error("{what} count {got} does not match the {expected} available")]
    CountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("invariant violated at {tick}: {detail}")]
    Invariant { tick: Tick, detail: String },

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

impl From<CeError> for SimError {
    fn from(e: CeError) -> Self {
        match e {
            CeError::Config(msg) => SimError::Config(msg),
        }
    }
}

impl SimError {
    /// Attach `tick` to a behaviour failure.  Consistency failures become
    /// [`SimError::Invariant`]; everything else is passed through.
    pub(crate) fn at(tick: Tick, e: BehaviorError) -> Self {
        match e {
            BehaviorError::Invariant(_) | BehaviorError::UnknownCustomer { .. } => {
                SimError::Invariant { tick, detail: e.to_string() }
            }
            other => SimError::Behavior(other),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
