//! Risk summary returned to callers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Four-number risk summary for a portfolio.
///
/// All values are in the units of the period returns they were computed
/// from (a return of `-0.02` is a 2% loss).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    /// 5th percentile of portfolio returns. Negative means a loss.
    pub var_95: f64,
    /// Population standard deviation of portfolio returns.
    pub volatility: f64,
    /// Largest peak-to-trough decline of cumulative wealth (<= 0).
    pub max_drawdown: f64,
    /// Composite score in [0, 1].
    pub risk_score: f64,
}

impl RiskSummary {
    /// True if every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.var_95.is_finite()
            && self.volatility.is_finite()
            && self.max_drawdown.is_finite()
            && self.risk_score.is_finite()
    }
}

impl fmt::Display for RiskSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VaR95={:.4} vol={:.4} mdd={:.4} score={:.3}",
            self.var_95, self.volatility, self.max_drawdown, self.risk_score
        )
    }
}
