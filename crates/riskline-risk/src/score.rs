//! Composite risk score.

use riskline_core::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// Coefficients of the composite risk score.
///
/// The score is `min(1, |VaR| * var + vol * volatility + |MDD| * drawdown)`.
/// With the default coefficients a 2% daily VaR or a 10% volatility alone
/// saturates the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Multiplier for the absolute 95% VaR.
    pub var: f64,
    /// Multiplier for volatility.
    pub volatility: f64,
    /// Multiplier for the absolute maximum drawdown.
    pub drawdown: f64,
}

impl ScoreWeights {
    /// Creates score weights.
    #[must_use]
    pub fn new(var: f64, volatility: f64, drawdown: f64) -> Self {
        Self {
            var,
            volatility,
            drawdown,
        }
    }

    /// True when every coefficient is finite and non-negative, which keeps
    /// the score inside `[0, 1]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.var, self.volatility, self.drawdown]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::new(50.0, 10.0, 1.0)
    }
}

/// Blends the three statistics into a score capped at 1.
///
/// # Errors
///
/// [`RiskError::NonFiniteResult`] if the uncapped blend is NaN or infinite.
/// The cap alone would hide a NaN, since `f64::min` discards it.
pub fn risk_score(
    var_95: f64,
    volatility: f64,
    max_drawdown: f64,
    weights: &ScoreWeights,
) -> RiskResult<f64> {
    let raw = var_95.abs() * weights.var
        + volatility * weights.volatility
        + max_drawdown.abs() * weights.drawdown;

    if !raw.is_finite() {
        return Err(RiskError::non_finite_result("risk_score", raw));
    }

    Ok(raw.min(1.0))
}
