//! Error types for the risk pipeline.
//!
//! Every numeric degeneracy is reported as its own variant. Nothing in the
//! pipeline recovers locally or substitutes a default value.

use thiserror::Error;

/// A specialized Result type for risk operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Failure kinds of the risk pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// The request contained no holdings.
    #[error("Portfolio has no holdings")]
    EmptyPortfolio,

    /// A holding failed schema validation.
    #[error("Invalid holding '{symbol}': {reason}")]
    InvalidHolding {
        /// Symbol as given by the caller.
        symbol: String,
        /// Why the holding was rejected.
        reason: String,
    },

    /// Holding weights sum to zero (or to a non-finite total).
    #[error("Degenerate weights: {reason}")]
    DegenerateWeights {
        /// What made the weights unusable.
        reason: String,
    },

    /// The price history provider does not know a requested symbol.
    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol {
        /// The symbol that could not be resolved.
        symbol: String,
    },

    /// The price history provider could not serve the request.
    #[error("Price data unavailable: {reason}")]
    DataUnavailable {
        /// Provider-side failure description.
        reason: String,
    },

    /// Fewer than two aligned observations, or misaligned history.
    #[error("Insufficient history: {reason}")]
    InsufficientHistory {
        /// Description of the shortfall.
        reason: String,
    },

    /// A single-symbol return was NaN or infinite.
    #[error("Non-finite return for {symbol} at period {period}")]
    NonFiniteReturn {
        /// Symbol whose return was undefined.
        symbol: String,
        /// Index into the return series (0 = first return).
        period: usize,
    },

    /// Cumulative wealth or its running peak reached zero.
    #[error("Wealth path collapsed to zero at period {period}")]
    DegenerateWealthPath {
        /// Index into the return series where wealth hit zero.
        period: usize,
    },

    /// A computed statistic was NaN or infinite.
    #[error("Non-finite result for {metric}: {value}")]
    NonFiniteResult {
        /// Name of the statistic.
        metric: String,
        /// The offending value.
        value: f64,
    },
}

impl RiskError {
    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Create a degenerate weights error.
    #[must_use]
    pub fn degenerate_weights(reason: impl Into<String>) -> Self {
        Self::DegenerateWeights {
            reason: reason.into(),
        }
    }

    /// Create an unknown symbol error.
    #[must_use]
    pub fn unknown_symbol(symbol: impl Into<String>) -> Self {
        Self::UnknownSymbol {
            symbol: symbol.into(),
        }
    }

    /// Create a data unavailable error.
    #[must_use]
    pub fn data_unavailable(reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            reason: reason.into(),
        }
    }

    /// Create an insufficient history error.
    #[must_use]
    pub fn insufficient_history(reason: impl Into<String>) -> Self {
        Self::InsufficientHistory {
            reason: reason.into(),
        }
    }

    /// Create a non-finite result error.
    #[must_use]
    pub fn non_finite_result(metric: impl Into<String>, value: f64) -> Self {
        Self::NonFiniteResult {
            metric: metric.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RiskError::unknown_symbol("TCS");
        assert_eq!(err.to_string(), "Unknown symbol: TCS");

        let err = RiskError::invalid_holding("INFY", "negative average cost");
        assert!(err.to_string().contains("INFY"));
        assert!(err.to_string().contains("negative average cost"));

        let err = RiskError::NonFiniteReturn {
            symbol: "AAPL".to_string(),
            period: 3,
        };
        assert_eq!(err.to_string(), "Non-finite return for AAPL at period 3");
    }

    #[test]
    fn test_error_clone() {
        let err = RiskError::EmptyPortfolio;
        assert_eq!(err.clone(), err);
    }
}
