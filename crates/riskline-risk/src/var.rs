//! Historical Value at Risk.
//!
//! VaR here is the lower tail quantile of the historical return series,
//! expressed in return units and not scaled to any horizon. A negative
//! value denotes a loss.

use riskline_core::{RiskError, RiskResult};

/// Lower tail probability of the reported 95% VaR.
pub const VAR_95_TAIL: f64 = 0.05;

/// Percentile of an ascending-sorted slice with linear interpolation.
///
/// Uses the conventional definition: the value at fractional rank
/// `(n - 1) * q`, interpolated between the two neighbouring order
/// statistics. Returns `None` for an empty slice or `q` outside `[0, 1]`.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let rank = (sorted.len() - 1) as f64 * q;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Calculate the historical 95% VaR of a return series.
///
/// # Arguments
///
/// * `returns` - Period returns (as decimals, e.g., -0.01 for -1%)
///
/// # Returns
///
/// The 5th percentile of `returns`. With one sample, that sample.
pub fn historical_var(returns: &[f64]) -> RiskResult<f64> {
    if returns.is_empty() {
        return Err(RiskError::insufficient_history("no returns provided"));
    }

    // Sort returns (ascending - worst returns first)
    let mut sorted = returns.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    percentile(&sorted, VAR_95_TAIL)
        .ok_or_else(|| RiskError::insufficient_history("no returns provided"))
}
