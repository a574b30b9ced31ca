//! Placement error types.

use thiserror::Error;

/// Result type alias for placement operations.
pub type PlacementResult<T> = Result<T, PlacementError>;

/// Errors that can occur while ranking hosts.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// The candidate set or function list cannot be ranked as given.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A cost function produced NaN or an infinity; no host is selected.
    #[error("cost function {function} returned non-finite value {value} for host {host}")]
    ComputationError {
        function: String,
        host: String,
        value: f64,
    },

    #[error("unknown cost function: {0}")]
    UnknownCostFunction(String),

    #[error("invalid weight {weight} for cost function {function}")]
    InvalidWeight { function: String, weight: f64 },
}
