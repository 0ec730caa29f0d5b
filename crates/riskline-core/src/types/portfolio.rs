//! Validated, aggregated portfolio.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{RiskError, RiskResult};
use crate::types::{Holding, Symbol};

/// Net position in one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Instrument symbol.
    pub symbol: Symbol,
    /// Net signed quantity across all holdings of this symbol.
    pub quantity: f64,
}

/// A portfolio ready for risk computation.
///
/// Built from raw holdings with these rules:
/// - at least one holding is required
/// - every holding must pass [`Holding::validate`]
/// - repeated symbols are merged by summing their quantities
/// - positions with a net quantity of exactly zero are dropped
///
/// Positions are ordered by symbol, so the same holdings always produce
/// the same portfolio regardless of input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    /// Builds a portfolio from raw holdings.
    ///
    /// # Errors
    ///
    /// - [`RiskError::EmptyPortfolio`] if `holdings` is empty
    /// - [`RiskError::InvalidHolding`] if any holding fails validation
    /// - [`RiskError::DegenerateWeights`] if every net position is zero
    pub fn from_holdings(holdings: &[Holding]) -> RiskResult<Self> {
        if holdings.is_empty() {
            return Err(RiskError::EmptyPortfolio);
        }

        let mut net: BTreeMap<Symbol, f64> = BTreeMap::new();
        for holding in holdings {
            holding.validate()?;
            *net.entry(holding.symbol.clone()).or_insert(0.0) += holding.quantity;
        }

        let positions: Vec<Position> = net
            .into_iter()
            .filter(|(_, quantity)| *quantity != 0.0)
            .map(|(symbol, quantity)| Position { symbol, quantity })
            .collect();

        if positions.is_empty() {
            return Err(RiskError::degenerate_weights(
                "all holding quantities are zero",
            ));
        }

        Ok(Self { positions })
    }

    /// Returns the net positions, ordered by symbol.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Returns the distinct symbols held.
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        self.positions.iter().map(|p| p.symbol.clone()).collect()
    }

    /// Returns `(symbol, quantity)` pairs to be used as raw weights.
    pub fn raw_weights(&self) -> Vec<(Symbol, f64)> {
        self.positions
            .iter()
            .map(|p| (p.symbol.clone(), p.quantity))
            .collect()
    }

    /// Number of net positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for a constructed portfolio.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
