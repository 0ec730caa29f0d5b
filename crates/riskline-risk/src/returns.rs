//! Return series construction.
//!
//! Converts an aligned [`PriceTable`] into per-symbol simple returns and
//! combines them into one weighted portfolio return series.

use riskline_core::{PortfolioReturnSeries, PriceTable, ReturnSeries, RiskError, RiskResult, Symbol};

/// Computes simple returns `p_t / p_{t-1} - 1` for one symbol.
///
/// The result is one element shorter than `closes`.
///
/// # Errors
///
/// - [`RiskError::InsufficientHistory`] if fewer than two prices are given
/// - [`RiskError::NonFiniteReturn`] if any return is NaN or infinite
///   (e.g. a zero previous price). The value is never coerced to zero.
pub fn simple_returns(symbol: &Symbol, closes: &[f64]) -> RiskResult<ReturnSeries> {
    if closes.len() < 2 {
        return Err(RiskError::insufficient_history(format!(
            "{} has {} price(s), need at least 2",
            symbol,
            closes.len()
        )));
    }

    let returns = closes
        .windows(2)
        .enumerate()
        .map(|(period, w)| {
            let r = w[1] / w[0] - 1.0;
            if r.is_finite() {
                Ok(r)
            } else {
                Err(RiskError::NonFiniteReturn {
                    symbol: symbol.to_string(),
                    period,
                })
            }
        })
        .collect::<RiskResult<Vec<f64>>>()?;

    Ok(ReturnSeries::new(returns))
}

/// Normalizes raw weights so they sum to one.
///
/// Each weight is divided by the total, so relative magnitudes and signs are
/// preserved: a short position keeps a negative weight.
///
/// # Errors
///
/// - [`RiskError::EmptyPortfolio`] if `raw` is empty
/// - [`RiskError::DegenerateWeights`] if any weight is non-finite or the
///   weights sum to zero
pub fn normalize_weights(raw: &[(Symbol, f64)]) -> RiskResult<Vec<(Symbol, f64)>> {
    if raw.is_empty() {
        return Err(RiskError::EmptyPortfolio);
    }

    if let Some((symbol, w)) = raw.iter().find(|(_, w)| !w.is_finite()) {
        return Err(RiskError::degenerate_weights(format!(
            "weight for {} is not finite: {}",
            symbol, w
        )));
    }

    let total: f64 = raw.iter().map(|(_, w)| w).sum();
    if total == 0.0 || !total.is_finite() {
        return Err(RiskError::degenerate_weights(format!(
            "weights sum to {}",
            total
        )));
    }

    Ok(raw
        .iter()
        .map(|(symbol, w)| (symbol.clone(), w / total))
        .collect())
}

/// Builds the weighted portfolio return series.
///
/// For each symbol column the period-over-period percentage change is
/// computed and the undefined leading row is dropped, so every symbol's
/// returns stay on the same time index. The portfolio return at each period
/// is `sum_i(w_i * r_i,t)` with normalized weights.
///
/// `weights` holds one raw (unnormalized) weight per position, typically the
/// signed quantity. A symbol listed twice contributes once per occurrence.
///
/// # Errors
///
/// - [`RiskError::EmptyPortfolio`] if `weights` is empty
/// - [`RiskError::UnknownSymbol`] if a weighted symbol has no price column
/// - [`RiskError::InsufficientHistory`] if the table has fewer than 2 rows
/// - [`RiskError::DegenerateWeights`] if the weights sum to zero
/// - [`RiskError::NonFiniteReturn`] if any single-symbol return is undefined
pub fn build_portfolio_returns(
    table: &PriceTable,
    weights: &[(Symbol, f64)],
) -> RiskResult<PortfolioReturnSeries> {
    if weights.is_empty() {
        return Err(RiskError::EmptyPortfolio);
    }

    if let Some((missing, _)) = weights.iter().find(|(s, _)| !table.contains(s)) {
        return Err(RiskError::unknown_symbol(missing.as_str()));
    }

    if table.len() < 2 {
        return Err(RiskError::insufficient_history(format!(
            "need at least 2 aligned observations, got {}",
            table.len()
        )));
    }

    let normalized = normalize_weights(weights)?;

    let mut portfolio = vec![0.0; table.len() - 1];
    for (symbol, weight) in &normalized {
        // Presence checked above.
        let closes = table
            .column(symbol)
            .ok_or_else(|| RiskError::unknown_symbol(symbol.as_str()))?;
        let returns = simple_returns(symbol, closes)?;

        for (acc, r) in portfolio.iter_mut().zip(returns.as_slice()) {
            *acc += weight * r;
        }
    }

    Ok(PortfolioReturnSeries::new(portfolio))
}
