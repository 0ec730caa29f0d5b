//! Risk summary calculator.
//!
//! Combines VaR, volatility, drawdown and the composite score into a single
//! [`RiskSummary`].

use riskline_core::{PortfolioReturnSeries, RiskError, RiskResult, RiskSummary};

use crate::drawdown::max_drawdown;
use crate::score::{risk_score, ScoreWeights};
use crate::var::historical_var;
use crate::volatility::population_std_dev;

/// Computes [`RiskSummary`] values from portfolio returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskCalculator {
    weights: ScoreWeights,
}

impl RiskCalculator {
    /// Creates a calculator with custom score coefficients.
    #[must_use]
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Returns the score coefficients.
    #[must_use]
    pub fn score_weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Computes the risk summary of a portfolio return series.
    ///
    /// # Errors
    ///
    /// - [`RiskError::InsufficientHistory`] if `returns` is empty
    /// - [`RiskError::DegenerateWealthPath`] if cumulative wealth hits zero
    /// - [`RiskError::NonFiniteResult`] if an input return or any computed
    ///   statistic is NaN or infinite
    pub fn compute(&self, returns: &PortfolioReturnSeries) -> RiskResult<RiskSummary> {
        let r = returns.as_slice();
        if r.is_empty() {
            return Err(RiskError::insufficient_history(
                "portfolio return series is empty",
            ));
        }

        if let Some(bad) = r.iter().find(|v| !v.is_finite()) {
            return Err(RiskError::non_finite_result("portfolio_return", *bad));
        }

        let var_95 = ensure_finite("var_95", historical_var(r)?)?;
        let volatility = population_std_dev(r)
            .ok_or_else(|| RiskError::insufficient_history("portfolio return series is empty"))?;
        let volatility = ensure_finite("volatility", volatility)?;
        let max_drawdown = ensure_finite("max_drawdown", max_drawdown(r)?)?;
        let risk_score = risk_score(var_95, volatility, max_drawdown, &self.weights)?;

        Ok(RiskSummary {
            var_95,
            volatility,
            max_drawdown,
            risk_score,
        })
    }
}

/// Computes the risk summary with the default score coefficients.
///
/// # Errors
///
/// See [`RiskCalculator::compute`].
pub fn compute_risk(returns: &PortfolioReturnSeries) -> RiskResult<RiskSummary> {
    RiskCalculator::default().compute(returns)
}

fn ensure_finite(metric: &str, value: f64) -> RiskResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RiskError::non_finite_result(metric, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::build_portfolio_returns;
    use approx::assert_relative_eq;
    use riskline_core::{PriceTable, Symbol};

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn series(values: &[f64]) -> PortfolioReturnSeries {
        PortfolioReturnSeries::new(values.to_vec())
    }

    #[test]
    fn test_flat_prices() {
        let table = PriceTable::from_closes([(sym("TCS"), vec![100.0; 5])]).unwrap();
        let returns = build_portfolio_returns(&table, &[(sym("TCS"), 10.0)]).unwrap();
        let summary = compute_risk(&returns).unwrap();

        assert_eq!(summary.var_95, 0.0);
        assert_eq!(summary.volatility, 0.0);
        assert_eq!(summary.max_drawdown, 0.0);
        assert_eq!(summary.risk_score, 0.0);
    }

    #[test]
    fn test_single_loss_period() {
        let table = PriceTable::from_closes([(sym("TCS"), vec![100.0, 90.0])]).unwrap();
        let returns = build_portfolio_returns(&table, &[(sym("TCS"), 10.0)]).unwrap();
        let summary = compute_risk(&returns).unwrap();

        assert_relative_eq!(summary.var_95, -0.10, epsilon = 1e-12);
        assert_eq!(summary.volatility, 0.0);
        assert_relative_eq!(summary.max_drawdown, -0.10, epsilon = 1e-12);
        // 0.10 * 50 + 0 + 0.10 = 5.1, capped
        assert_eq!(summary.risk_score, 1.0);
    }

    #[test]
    fn test_offsetting_positions() {
        let table = PriceTable::from_closes([
            (sym("UP"), vec![100.0, 110.0, 121.0]),
            (sym("DOWN"), vec![50.0, 45.0, 40.5]),
        ])
        .unwrap();
        let returns =
            build_portfolio_returns(&table, &[(sym("UP"), 1.0), (sym("DOWN"), 1.0)]).unwrap();
        let summary = compute_risk(&returns).unwrap();

        assert_relative_eq!(summary.var_95, 0.0, epsilon = 1e-12);
        assert_relative_eq!(summary.volatility, 0.0, epsilon = 1e-12);
        assert_relative_eq!(summary.max_drawdown, 0.0, epsilon = 1e-12);
        assert_relative_eq!(summary.risk_score, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_uncapped_score_blend() {
        let summary = compute_risk(&series(&[0.001, -0.001])).unwrap();

        // sorted [-0.001, 0.001], rank 0.05 -> -0.001 + 0.05 * 0.002 = -0.0009
        assert_relative_eq!(summary.var_95, -0.0009, epsilon = 1e-12);
        assert_relative_eq!(summary.volatility, 0.001, epsilon = 1e-12);
        // wealth 1.001 then 1.001 * 0.999 = 0.999999 -> dd = -0.001
        assert_relative_eq!(summary.max_drawdown, -0.001, epsilon = 1e-12);

        let expected = 0.0009 * 50.0 + 0.001 * 10.0 + 0.001;
        assert_relative_eq!(summary.risk_score, expected, epsilon = 1e-12);
        assert!(summary.risk_score < 1.0);
    }

    #[test]
    fn test_custom_weights() {
        let calc = RiskCalculator::new(ScoreWeights::new(0.0, 0.0, 1.0));
        let summary = calc.compute(&series(&[-0.05])).unwrap();
        assert_relative_eq!(summary.risk_score, 0.05, epsilon = 1e-12);
        assert_eq!(calc.score_weights().var, 0.0);
    }

    #[test]
    fn test_empty_series() {
        assert!(matches!(
            compute_risk(&series(&[])),
            Err(RiskError::InsufficientHistory { .. })
        ));
    }

    #[test]
    fn test_non_finite_input() {
        let err = compute_risk(&series(&[0.01, f64::NAN])).unwrap_err();
        assert!(matches!(err, RiskError::NonFiniteResult { .. }));
    }

    #[test]
    fn test_wipeout() {
        let err = compute_risk(&series(&[0.01, -1.0])).unwrap_err();
        assert_eq!(err, RiskError::DegenerateWealthPath { period: 1 });
    }

    #[test]
    fn test_summary_is_finite() {
        let summary = compute_risk(&series(&[0.02, -0.03, 0.01, -0.015, 0.005])).unwrap();
        assert!(summary.is_finite());
        assert!(summary.volatility >= 0.0);
        assert!(summary.max_drawdown <= 0.0);
        assert!((0.0..=1.0).contains(&summary.risk_score));
    }
}
