//! Core error type.
//!
//! Downstream crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so construction-time validation failures propagate
//! with `?` all the way up to the binary.

use thiserror::Error;

use crate::AgentId;

/// Validation failures raised while building core values.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid {what} range: min {min} > max {max}")]
    InvalidRange {
        what: &'static str,
        min:  f64,
        max:  f64,
    },

    #[error("invalid {axis} boundary: min {min} must be < max {max}")]
    InvalidBoundary {
        axis: &'static str,
        min:  f64,
        max:  f64,
    },

    #[error("state has {positions} positions but {velocities} velocities")]
    ShapeMismatch {
        positions:  usize,
        velocities: usize,
    },

    #[error("agent {0} not present in state")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `chase-core`.
pub type CoreResult<T> = Result<T, CoreError>;
