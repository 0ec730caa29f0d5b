//! Return series types.

use serde::{Deserialize, Serialize};

/// Simple period returns for one symbol, `r_t = p_t / p_{t-1} - 1`.
///
/// One element shorter than the price series it was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries(Vec<f64>);

impl ReturnSeries {
    /// Wraps already computed returns.
    pub fn new(returns: Vec<f64>) -> Self {
        Self(returns)
    }

    /// Returns as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no periods.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Weighted portfolio returns, `sum_i(w_i * r_i,t)` per period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReturnSeries(Vec<f64>);

impl PortfolioReturnSeries {
    /// Wraps already computed portfolio returns.
    pub fn new(returns: Vec<f64>) -> Self {
        Self(returns)
    }

    /// Returns as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no periods.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
