//! Market data source traits.
//!
//! The risk pipeline needs one thing from market data: closing prices for a
//! set of symbols over a lookback window, already aligned on a common time
//! index.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use riskline_core::{PriceTable, Symbol};

use crate::error::TraitError;

/// Source of aligned historical prices.
///
/// Implementations must return a table where every requested symbol has a
/// column and every column shares the same timestamps. Rows missing for any
/// symbol are dropped, never filled or shifted.
///
/// Errors:
/// - [`TraitError::NotFound`] with the symbol if it has never been seen
/// - [`TraitError::InsufficientData`] if the aligned window is unusable
/// - anything else for backend failures
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Get aligned closes for `symbols` over the last `lookback`.
    async fn get_price_table(
        &self,
        symbols: &BTreeSet<Symbol>,
        lookback: Duration,
    ) -> Result<PriceTable, TraitError>;
}

#[async_trait]
impl<T: PriceHistoryProvider + ?Sized> PriceHistoryProvider for std::sync::Arc<T> {
    async fn get_price_table(
        &self,
        symbols: &BTreeSet<Symbol>,
        lookback: Duration,
    ) -> Result<PriceTable, TraitError> {
        (**self).get_price_table(symbols, lookback).await
    }
}
