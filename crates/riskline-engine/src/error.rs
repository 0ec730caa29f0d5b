//! Engine error types.

use thiserror::Error;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Storage error
    #[error("storage error: {0}")]
    StorageError(String),

    /// Background task failed to stop cleanly
    #[error("task error: {0}")]
    TaskError(String),
}

impl From<riskline_traits::TraitError> for EngineError {
    fn from(e: riskline_traits::TraitError) -> Self {
        EngineError::StorageError(e.to_string())
    }
}
