//! Maximum drawdown of the cumulative wealth path.

use riskline_core::{RiskError, RiskResult};

/// Maximum drawdown of a return series.
///
/// Wealth starts at `W_0 = 1` and compounds as `W_t = W_{t-1} * (1 + r_t)`.
/// The running peak `P_t` includes the starting wealth, so a loss in the
/// very first period already counts as a drawdown. Each period's drawdown is
/// `(W_t - P_t) / P_t` and the result is the minimum over all periods.
///
/// Returns a value `<= 0`; `0` means wealth never fell below a prior peak.
///
/// # Errors
///
/// [`RiskError::DegenerateWealthPath`] if wealth reaches exactly zero (a
/// total wipeout), where later relative declines are undefined.
pub fn max_drawdown(returns: &[f64]) -> RiskResult<f64> {
    let mut wealth = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut worst = 0.0_f64;

    for (period, r) in returns.iter().enumerate() {
        wealth *= 1.0 + r;
        peak = peak.max(wealth);

        if wealth == 0.0 || peak == 0.0 {
            return Err(RiskError::DegenerateWealthPath { period });
        }

        let drawdown = (wealth - peak) / peak;
        if drawdown < worst || drawdown.is_nan() {
            worst = drawdown;
        }
    }

    Ok(worst)
}
