//! Framework error type.
//!
//! Sub-crates define their own error enums and convert `CeError` into them
//! via `From` impls.

use thiserror::Error;

/// The top-level error type for `ce-core`.
#[derive(Debug, Error)]
pub enum CeError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ce-core`.
pub type CeResult<T> = Result<T, CeError>;
