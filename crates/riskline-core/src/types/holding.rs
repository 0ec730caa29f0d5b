//! Portfolio holding as supplied by a caller.

use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};
use crate::types::Symbol;

/// A single holding in a risk request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Instrument symbol.
    pub symbol: Symbol,

    /// Signed quantity. Only used for relative weighting, so a short
    /// position keeps its negative sign through normalization.
    pub quantity: f64,

    /// Average acquisition cost. Carried for future P&L calculations;
    /// the risk statistics do not use it.
    pub average_cost: f64,
}

impl Holding {
    /// Creates a new holding.
    pub fn new(symbol: Symbol, quantity: f64, average_cost: f64) -> Self {
        Self {
            symbol,
            quantity,
            average_cost,
        }
    }

    /// Validates the numeric fields.
    ///
    /// The quantity must be finite; the average cost must be finite and
    /// non-negative.
    pub fn validate(&self) -> RiskResult<()> {
        if !self.quantity.is_finite() {
            return Err(RiskError::invalid_holding(
                self.symbol.as_str(),
                format!("quantity must be finite, got {}", self.quantity),
            ));
        }
        if !self.average_cost.is_finite() {
            return Err(RiskError::invalid_holding(
                self.symbol.as_str(),
                format!("average cost must be finite, got {}", self.average_cost),
            ));
        }
        if self.average_cost < 0.0 {
            return Err(RiskError::invalid_holding(
                self.symbol.as_str(),
                format!("average cost must be non-negative, got {}", self.average_cost),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    #[test]
    fn test_valid_holding() {
        assert!(Holding::new(sym("TCS"), 10.0, 3500.0).validate().is_ok());
        // Short positions are allowed
        assert!(Holding::new(sym("TCS"), -4.0, 3500.0).validate().is_ok());
        // Zero cost is allowed (e.g. bonus shares)
        assert!(Holding::new(sym("TCS"), 1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_negative_cost_rejected() {
        let err = Holding::new(sym("INFY"), 1.0, -1.0).validate().unwrap_err();
        assert!(matches!(err, RiskError::InvalidHolding { ref symbol, .. } if symbol == "INFY"));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Holding::new(sym("INFY"), f64::NAN, 1.0).validate().is_err());
        assert!(Holding::new(sym("INFY"), f64::INFINITY, 1.0).validate().is_err());
        assert!(Holding::new(sym("INFY"), 1.0, f64::NAN).validate().is_err());
    }
}
