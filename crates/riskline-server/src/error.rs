//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use riskline_core::RiskError;

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Risk pipeline failure.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Invalid request parameters.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backing store failure outside the risk pipeline.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorBody,
}

/// Error body details.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    /// HTTP status and error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Risk(e) => match e {
                RiskError::InvalidHolding { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_HOLDING")
                }
                RiskError::EmptyPortfolio => (StatusCode::BAD_REQUEST, "EMPTY_PORTFOLIO"),
                RiskError::DegenerateWeights { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "DEGENERATE_WEIGHTS")
                }
                RiskError::UnknownSymbol { .. } => (StatusCode::NOT_FOUND, "UNKNOWN_SYMBOL"),
                RiskError::DataUnavailable { .. } => {
                    (StatusCode::SERVICE_UNAVAILABLE, "DATA_UNAVAILABLE")
                }
                RiskError::InsufficientHistory { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_HISTORY")
                }
                RiskError::NonFiniteReturn { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "NON_FINITE_RETURN")
                }
                RiskError::DegenerateWealthPath { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "DEGENERATE_WEALTH_PATH")
                }
                RiskError::NonFiniteResult { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "NON_FINITE_RESULT")
                }
            },
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Storage(_) => (StatusCode::SERVICE_UNAVAILABLE, "DATA_UNAVAILABLE"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            error!("{}: {}", code, self);
        }

        let body = Json(ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

impl From<riskline_traits::TraitError> for ApiError {
    fn from(err: riskline_traits::TraitError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_risk_error_codes_are_distinct() {
        let errors = vec![
            RiskError::invalid_holding("TCS", "bad"),
            RiskError::EmptyPortfolio,
            RiskError::degenerate_weights("zero"),
            RiskError::unknown_symbol("ZZZ"),
            RiskError::data_unavailable("down"),
            RiskError::insufficient_history("short"),
            RiskError::NonFiniteReturn {
                symbol: "TCS".into(),
                period: 0,
            },
            RiskError::DegenerateWealthPath { period: 0 },
            RiskError::non_finite_result("var_95", f64::NAN),
        ];

        let codes: HashSet<_> = errors
            .into_iter()
            .map(|e| ApiError::from(e).status_and_code().1)
            .collect();
        assert_eq!(codes.len(), 9);
    }

    #[test]
    fn test_statuses() {
        assert_eq!(
            ApiError::from(RiskError::EmptyPortfolio).status_and_code().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(RiskError::unknown_symbol("X")).status_and_code().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(RiskError::data_unavailable("x")).status_and_code().0,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::BadRequest("limit".into()).status_and_code(),
            (StatusCode::BAD_REQUEST, "BAD_REQUEST")
        );
        assert_eq!(
            ApiError::from(RiskError::non_finite_result("x", f64::INFINITY))
                .status_and_code()
                .0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
