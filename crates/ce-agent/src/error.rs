use ce_core::{AgentId, Component};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AgentError {
    #[error("stock shape does not match component {component}")]
    ShapeMismatch { component: Component },

    #[error("agent {0} does not exist")]
    UnknownAgent(AgentId),
}

pub type AgentResult<T> = Result<T, AgentError>;
