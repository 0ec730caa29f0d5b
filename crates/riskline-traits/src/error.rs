//! Error types for trait operations.

use riskline_core::RiskError;
use thiserror::Error;

/// Common error type for trait operations.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Requested resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Not enough data to satisfy the request
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// Database error
    #[error("database error: {0}")]
    DatabaseError(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Provider failures as seen by the risk pipeline.
///
/// `NotFound` carries the missing symbol. Anything that is not about the
/// data itself is reported as unavailable.
impl From<TraitError> for RiskError {
    fn from(e: TraitError) -> Self {
        match e {
            TraitError::NotFound(symbol) => RiskError::unknown_symbol(symbol),
            TraitError::InsufficientData(reason) => RiskError::insufficient_history(reason),
            other => RiskError::data_unavailable(other.to_string()),
        }
    }
}
