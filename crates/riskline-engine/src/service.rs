//! Risk scoring service.
//!
//! Wires a [`PriceHistoryProvider`] to the pure risk pipeline:
//!
//! ```text
//! holdings ─> Portfolio ─> symbols ─> provider ─> PriceTable
//!                 │                                   │
//!                 └──────── raw weights ──────────────┴─> returns ─> RiskSummary
//! ```

use std::sync::Arc;
use std::time::Duration;

use riskline_core::{Holding, Portfolio, RiskError, RiskResult, RiskSummary};
use riskline_risk::returns::build_portfolio_returns;
use riskline_risk::{RiskCalculator, ScoreWeights};
use riskline_traits::PriceHistoryProvider;
use tracing::{debug, info, warn};

use crate::error::EngineError;

/// Default history window: one day.
pub const DEFAULT_LOOKBACK: Duration = Duration::from_secs(24 * 60 * 60);

/// Tunables of the risk service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskConfig {
    /// How far back the provider is asked to look.
    pub lookback: Duration,
    /// Composite score coefficients.
    pub score_weights: ScoreWeights,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
            score_weights: ScoreWeights::default(),
        }
    }
}

impl RiskConfig {
    /// Checks the configuration is usable.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.lookback.is_zero() {
            return Err(EngineError::ConfigError("lookback must be positive".into()));
        }
        if !self.score_weights.is_valid() {
            return Err(EngineError::ConfigError(format!(
                "score weights must be finite and non-negative: {:?}",
                self.score_weights
            )));
        }
        Ok(())
    }
}

/// Scores portfolios against price history.
///
/// Stateless between requests; safe to share behind an `Arc`.
pub struct RiskService {
    provider: Arc<dyn PriceHistoryProvider>,
    calculator: RiskCalculator,
    lookback: Duration,
}

impl RiskService {
    /// Create a service from a provider and a validated config.
    pub fn new(provider: Arc<dyn PriceHistoryProvider>, config: RiskConfig) -> Self {
        Self {
            provider,
            calculator: RiskCalculator::new(config.score_weights),
            lookback: config.lookback,
        }
    }

    /// Start building a service.
    pub fn builder() -> RiskServiceBuilder {
        RiskServiceBuilder::new()
    }

    /// The lookback window used for every request.
    pub fn lookback(&self) -> Duration {
        self.lookback
    }

    /// Compute the risk summary of a set of holdings.
    ///
    /// The provider is queried once; no retries.
    pub async fn score(&self, holdings: &[Holding]) -> RiskResult<RiskSummary> {
        let portfolio = Portfolio::from_holdings(holdings)?;
        let symbols = portfolio.symbols();
        debug!(
            holdings = holdings.len(),
            positions = portfolio.len(),
            "Portfolio aggregated"
        );

        let table = self
            .provider
            .get_price_table(&symbols, self.lookback)
            .await
            .map_err(|e| {
                warn!("Price history lookup failed: {}", e);
                RiskError::from(e)
            })?;
        debug!(rows = table.len(), symbols = symbols.len(), "Price table loaded");

        let returns = build_portfolio_returns(&table, &portfolio.raw_weights())?;
        let summary = self.calculator.compute(&returns)?;

        info!(
            periods = returns.len(),
            risk_score = summary.risk_score,
            "Risk computed: {}",
            summary
        );

        Ok(summary)
    }
}

/// Builder for [`RiskService`].
#[derive(Default)]
pub struct RiskServiceBuilder {
    provider: Option<Arc<dyn PriceHistoryProvider>>,
    config: RiskConfig,
}

impl RiskServiceBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price history provider.
    pub fn with_provider(mut self, provider: Arc<dyn PriceHistoryProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the full config.
    pub fn with_config(mut self, config: RiskConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the lookback window.
    pub fn with_lookback(mut self, lookback: Duration) -> Self {
        self.config.lookback = lookback;
        self
    }

    /// Set the score coefficients.
    pub fn with_score_weights(mut self, weights: ScoreWeights) -> Self {
        self.config.score_weights = weights;
        self
    }

    /// Build the service.
    pub fn build(self) -> Result<RiskService, EngineError> {
        let provider = self
            .provider
            .ok_or_else(|| EngineError::ConfigError("provider not configured".into()))?;
        self.config.validate()?;
        Ok(RiskService::new(provider, self.config))
    }
}
