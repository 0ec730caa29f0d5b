//! Storage traits for persistence.
//!
//! [`PriceStore`] is the price cache shared between the market simulator
//! (writer) and the price history provider (reader).

use async_trait::async_trait;
use riskline_core::{PricePoint, Symbol};
use serde::{Deserialize, Serialize};

use crate::error::TraitError;

/// One observed closing price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    /// Instrument
    pub symbol: Symbol,
    /// Observation time, milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Closing price
    pub close: f64,
}

impl PriceTick {
    /// Create a new tick.
    pub fn new(symbol: Symbol, timestamp: i64, close: f64) -> Self {
        Self {
            symbol,
            timestamp,
            close,
        }
    }

    /// The tick as a point on a price series.
    pub fn point(&self) -> PricePoint {
        PricePoint::new(self.timestamp, self.close)
    }
}

/// Storage for price ticks.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Record one tick and update the symbol's latest price.
    async fn record(&self, tick: &PriceTick) -> Result<(), TraitError>;

    /// Record a round of ticks atomically.
    async fn record_batch(&self, ticks: &[PriceTick]) -> Result<(), TraitError>;

    /// Get the most recent tick for a symbol.
    async fn latest(&self, symbol: &Symbol) -> Result<Option<PriceTick>, TraitError>;

    /// Get ticks in `[from_ms, to_ms]`, ascending by time.
    ///
    /// With a `limit`, only the most recent `limit` points of the range are
    /// returned (still ascending).
    async fn history(
        &self,
        symbol: &Symbol,
        from_ms: i64,
        to_ms: i64,
        limit: Option<usize>,
    ) -> Result<Vec<PricePoint>, TraitError>;

    /// All symbols that have at least one tick.
    async fn symbols(&self) -> Result<Vec<Symbol>, TraitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_point() {
        let tick = PriceTick::new(Symbol::new("TCS").unwrap(), 1_000, 3500.0);
        assert_eq!(tick.point(), PricePoint::new(1_000, 3500.0));
    }

    #[test]
    fn test_tick_serde() {
        let tick = PriceTick::new(Symbol::new("infy").unwrap(), 42, 1600.5);
        let json = serde_json::to_string(&tick).unwrap();
        assert_eq!(json, r#"{"symbol":"INFY","timestamp":42,"close":1600.5}"#);
    }
}
