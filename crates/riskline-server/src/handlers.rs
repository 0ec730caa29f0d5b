//! Request handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use riskline_core::{Holding, PricePoint, RiskError, RiskSummary, Symbol};
use riskline_engine::RiskService;
use riskline_traits::PriceStore;

use crate::error::{ApiError, ApiResult};

/// Default price window for `/api/v1/prices`.
pub const DEFAULT_PRICE_WINDOW_HOURS: u64 = 24;

/// Default number of history points for `/api/v1/prices`.
pub const DEFAULT_PRICE_LIMIT: usize = 100;

/// Hard cap on history points per request.
pub const MAX_PRICE_LIMIT: usize = 5_000;

/// Application state.
pub struct AppState {
    /// Risk scoring service
    pub service: Arc<RiskService>,
    /// Price store, read for price reports
    pub store: Arc<dyn PriceStore>,
}

// =============================================================================
// STATUS
// =============================================================================

/// Root banner response.
#[derive(Serialize)]
pub struct MessageResponse {
    message: String,
}

/// Root handler.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Risk engine online".to_string(),
    })
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// RISK SCORING
// =============================================================================

/// One holding in a score request.
#[derive(Debug, Deserialize)]
pub struct HoldingRequest {
    /// Instrument symbol (case-insensitive)
    pub symbol: String,
    /// Signed quantity
    #[serde(alias = "quantity")]
    pub qty: f64,
    /// Average acquisition cost
    #[serde(alias = "average_cost")]
    pub avg_price: f64,
}

/// Score request body.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    /// Holdings to score
    pub portfolio: Vec<HoldingRequest>,
}

impl HoldingRequest {
    fn into_holding(self) -> Result<Holding, RiskError> {
        let symbol = Symbol::new(&self.symbol)?;
        Ok(Holding::new(symbol, self.qty, self.avg_price))
    }
}

/// Score a portfolio.
///
/// Responds with exactly `{var_95, volatility, max_drawdown, risk_score}`.
pub async fn score_risk(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScoreRequest>,
) -> ApiResult<Json<RiskSummary>> {
    let holdings = request
        .portfolio
        .into_iter()
        .map(HoldingRequest::into_holding)
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Scoring {} holdings", holdings.len());

    let summary = state.service.score(&holdings).await?;
    Ok(Json(summary))
}

// =============================================================================
// PRICES
// =============================================================================

/// Query parameters for price reports.
#[derive(Debug, Default, Deserialize)]
pub struct PriceQuery {
    /// Window length in hours (default 24)
    pub interval_hours: Option<u64>,
    /// Maximum history points, most recent kept (default 100, at least 1)
    pub limit: Option<usize>,
}

/// Direction of the price over the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    /// Closed above the window open
    Up,
    /// Closed at or below the window open
    Down,
}

/// Summary statistics over a price window, rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSnapshot {
    /// Last price
    pub price: f64,
    /// First price of the window
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Mean price
    pub avg: f64,
    /// `price - open`
    pub change: f64,
    /// `change / open * 100`
    pub change_percent: f64,
}

/// Window metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PriceWindowStats {
    /// Number of points in `history`
    pub data_points: usize,
    /// Window start, ms since epoch
    pub start_time: i64,
    /// Window end, ms since epoch
    pub end_time: i64,
    /// Direction over the window
    pub trend: Trend,
}

/// Price report response.
#[derive(Debug, Serialize)]
pub struct PriceReport {
    /// Normalized symbol
    pub symbol: String,
    /// Window length in hours
    pub interval_hours: u64,
    /// Window statistics
    pub current: PriceSnapshot,
    /// Window points, ascending by time
    pub history: Vec<PricePoint>,
    /// Window metadata
    pub stats: PriceWindowStats,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Statistics of a non-empty, time-ordered price window.
pub fn summarize_prices(points: &[PricePoint]) -> Option<(PriceSnapshot, Trend)> {
    let open = points.first()?.close;
    let price = points.last()?.close;

    let high = points.iter().map(|p| p.close).fold(f64::NEG_INFINITY, f64::max);
    let low = points.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
    let avg = points.iter().map(|p| p.close).sum::<f64>() / points.len() as f64;

    let change = price - open;
    let change_percent = if open != 0.0 { change / open * 100.0 } else { 0.0 };
    let trend = if change_percent > 0.0 { Trend::Up } else { Trend::Down };

    let snapshot = PriceSnapshot {
        price: round2(price),
        open: round2(open),
        high: round2(high),
        low: round2(low),
        avg: round2(avg),
        change: round2(change),
        change_percent: round2(change_percent),
    };
    Some((snapshot, trend))
}

/// Price report for one symbol over a recent window.
pub async fn get_prices(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<PriceQuery>,
) -> ApiResult<Json<PriceReport>> {
    let symbol = Symbol::new(&symbol)
        .map_err(|_| ApiError::NotFound(format!("Invalid symbol: {:?}", symbol)))?;

    if state.store.latest(&symbol).await?.is_none() {
        return Err(RiskError::unknown_symbol(symbol.as_str()).into());
    }

    let interval_hours = query.interval_hours.unwrap_or(DEFAULT_PRICE_WINDOW_HOURS);
    let limit = query.limit.unwrap_or(DEFAULT_PRICE_LIMIT).min(MAX_PRICE_LIMIT);
    if limit == 0 {
        return Err(ApiError::BadRequest("limit must be at least 1".to_string()));
    }

    let end_time = chrono::Utc::now().timestamp_millis();
    let window_ms = i64::try_from(interval_hours.saturating_mul(3_600_000)).unwrap_or(i64::MAX);
    let start_time = end_time.saturating_sub(window_ms);

    let history = state
        .store
        .history(&symbol, start_time, end_time, Some(limit))
        .await?;

    let (current, trend) = summarize_prices(&history).ok_or_else(|| {
        ApiError::NotFound(format!(
            "No price data available for {} in the last {} hours",
            symbol, interval_hours
        ))
    })?;

    Ok(Json(PriceReport {
        symbol: symbol.to_string(),
        interval_hours,
        current,
        stats: PriceWindowStats {
            data_points: history.len(),
            start_time,
            end_time,
            trend,
        },
        history,
    }))
}

/// Symbols known to the price store.
#[derive(Serialize)]
pub struct SymbolsResponse {
    symbols: Vec<Symbol>,
}

/// List symbols with recorded prices.
pub async fn list_symbols(State(state): State<Arc<AppState>>) -> ApiResult<Json<SymbolsResponse>> {
    let symbols = state.store.symbols().await?;
    Ok(Json(SymbolsResponse { symbols }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summarize_prices() {
        let points = vec![
            PricePoint::new(1, 100.0),
            PricePoint::new(2, 110.0),
            PricePoint::new(3, 95.0),
            PricePoint::new(4, 105.0),
        ];

        let (snap, trend) = summarize_prices(&points).unwrap();
        assert_eq!(snap.price, 105.0);
        assert_eq!(snap.open, 100.0);
        assert_eq!(snap.high, 110.0);
        assert_eq!(snap.low, 95.0);
        assert_relative_eq!(snap.avg, 102.5);
        assert_eq!(snap.change, 5.0);
        assert_eq!(snap.change_percent, 5.0);
        assert_eq!(trend, Trend::Up);
    }

    #[test]
    fn test_flat_window_trends_down() {
        let points = vec![PricePoint::new(1, 50.0), PricePoint::new(2, 50.0)];
        let (snap, trend) = summarize_prices(&points).unwrap();
        assert_eq!(snap.change, 0.0);
        assert_eq!(trend, Trend::Down);
    }

    #[test]
    fn test_rounding() {
        let points = vec![PricePoint::new(1, 3.0), PricePoint::new(2, 3.14159)];
        let (snap, _) = summarize_prices(&points).unwrap();
        assert_eq!(snap.price, 3.14);
        assert_eq!(snap.change_percent, 4.72);
    }

    #[test]
    fn test_empty_window() {
        assert!(summarize_prices(&[]).is_none());
    }

    #[test]
    fn test_holding_request_aliases() {
        let a: HoldingRequest =
            serde_json::from_str(r#"{"symbol":"tcs","qty":10,"avg_price":3500}"#).unwrap();
        let b: HoldingRequest =
            serde_json::from_str(r#"{"symbol":"tcs","quantity":10,"average_cost":3500}"#)
                .unwrap();

        let a = a.into_holding().unwrap();
        let b = b.into_holding().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.symbol.as_str(), "TCS");
    }

    #[test]
    fn test_blank_symbol_is_invalid_holding() {
        let req = HoldingRequest {
            symbol: "   ".into(),
            qty: 1.0,
            avg_price: 1.0,
        };
        assert!(matches!(
            req.into_holding(),
            Err(RiskError::InvalidHolding { .. })
        ));
    }
}
