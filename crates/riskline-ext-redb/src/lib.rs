//! # Riskline Ext Redb
//!
//! Embedded storage implementation using redb for the Riskline risk engine.
//!
//! This crate provides:
//! - [`RedbPriceStore`]: the price tick cache written by the market simulator
//! - [`RedbPriceHistory`]: a [`PriceHistoryProvider`] reading aligned
//!   lookback windows out of a [`RedbPriceStore`]

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redb::{Database, ReadableTable, TableDefinition};

use riskline_core::{PricePoint, PriceSeries, PriceTable, Symbol};
use riskline_traits::error::TraitError;
use riskline_traits::market_data::PriceHistoryProvider;
use riskline_traits::storage::{PriceStore, PriceTick};

// Table definitions
const TICKS: TableDefinition<(&str, i64), f64> = TableDefinition::new("price_ticks");
const LATEST: TableDefinition<&str, (i64, f64)> = TableDefinition::new("latest_prices");

fn db_err(e: impl std::fmt::Display) -> TraitError {
    TraitError::DatabaseError(e.to_string())
}

/// Redb-based price store.
///
/// Ticks are keyed by `(symbol, timestamp_ms)` so a symbol's history is one
/// contiguous, time-ordered key range. The latest close per symbol is kept
/// in a separate table for O(1) lookups.
pub struct RedbPriceStore {
    db: Arc<Database>,
}

impl RedbPriceStore {
    /// Create a new redb price store.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn write_ticks(&self, ticks: &[PriceTick]) -> Result<(), TraitError> {
        let write_txn = self.db.begin_write().map_err(db_err)?;
        {
            let mut history = write_txn.open_table(TICKS).map_err(db_err)?;
            let mut latest = write_txn.open_table(LATEST).map_err(db_err)?;

            for tick in ticks {
                let symbol = tick.symbol.as_str();
                history
                    .insert((symbol, tick.timestamp), tick.close)
                    .map_err(db_err)?;

                // Out-of-order writes must not roll the latest price back.
                let newer = match latest.get(symbol).map_err(db_err)? {
                    Some(existing) => existing.value().0 <= tick.timestamp,
                    None => true,
                };
                if newer {
                    latest
                        .insert(symbol, (tick.timestamp, tick.close))
                        .map_err(db_err)?;
                }
            }
        }
        write_txn.commit().map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl PriceStore for RedbPriceStore {
    async fn record(&self, tick: &PriceTick) -> Result<(), TraitError> {
        self.write_ticks(std::slice::from_ref(tick))
    }

    async fn record_batch(&self, ticks: &[PriceTick]) -> Result<(), TraitError> {
        if ticks.is_empty() {
            return Ok(());
        }
        self.write_ticks(ticks)
    }

    async fn latest(&self, symbol: &Symbol) -> Result<Option<PriceTick>, TraitError> {
        let read_txn = self.db.begin_read().map_err(db_err)?;

        let table = match read_txn.open_table(LATEST) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(db_err(e)),
        };

        match table.get(symbol.as_str()) {
            Ok(Some(data)) => {
                let (timestamp, close) = data.value();
                Ok(Some(PriceTick::new(symbol.clone(), timestamp, close)))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn history(
        &self,
        symbol: &Symbol,
        from_ms: i64,
        to_ms: i64,
        limit: Option<usize>,
    ) -> Result<Vec<PricePoint>, TraitError> {
        if from_ms > to_ms {
            return Ok(vec![]);
        }

        let read_txn = self.db.begin_read().map_err(db_err)?;

        let table = match read_txn.open_table(TICKS) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(vec![]),
            Err(e) => return Err(db_err(e)),
        };

        let sym = symbol.as_str();
        let range = table.range((sym, from_ms)..=(sym, to_ms)).map_err(db_err)?;

        let mut points = Vec::new();
        match limit {
            Some(limit) => {
                // Walk backwards so only the newest `limit` rows are read.
                for result in range.rev().take(limit) {
                    let (key, value) = result.map_err(db_err)?;
                    points.push(PricePoint::new(key.value().1, value.value()));
                }
                points.reverse();
            }
            None => {
                for result in range {
                    let (key, value) = result.map_err(db_err)?;
                    points.push(PricePoint::new(key.value().1, value.value()));
                }
            }
        }

        Ok(points)
    }

    async fn symbols(&self) -> Result<Vec<Symbol>, TraitError> {
        let read_txn = self.db.begin_read().map_err(db_err)?;

        let table = match read_txn.open_table(LATEST) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(vec![]),
            Err(e) => return Err(db_err(e)),
        };

        let mut symbols = Vec::new();
        for result in table.iter().map_err(db_err)? {
            let (key, _) = result.map_err(db_err)?;
            let symbol =
                Symbol::new(key.value()).map_err(|e| TraitError::ParseError(e.to_string()))?;
            symbols.push(symbol);
        }
        Ok(symbols)
    }
}

/// Price history provider backed by a [`RedbPriceStore`].
///
/// Reads `[now - lookback, now]` for every requested symbol and keeps only
/// the timestamps present for all of them (an inner join). Missing rows are
/// dropped, never forward-filled or shifted.
pub struct RedbPriceHistory {
    store: Arc<RedbPriceStore>,
}

impl RedbPriceHistory {
    /// Create a provider reading from `store`.
    pub fn new(store: Arc<RedbPriceStore>) -> Self {
        Self { store }
    }

    /// Same as [`PriceHistoryProvider::get_price_table`] with an explicit
    /// window end, in milliseconds since the Unix epoch.
    pub async fn get_price_table_at(
        &self,
        symbols: &BTreeSet<Symbol>,
        lookback: Duration,
        now_ms: i64,
    ) -> Result<PriceTable, TraitError> {
        if symbols.is_empty() {
            return Ok(PriceTable::default());
        }

        let lookback_ms = i64::try_from(lookback.as_millis()).unwrap_or(i64::MAX);
        let from_ms = now_ms.saturating_sub(lookback_ms);

        let mut histories = BTreeMap::new();
        for symbol in symbols {
            if self.store.latest(symbol).await?.is_none() {
                return Err(TraitError::NotFound(symbol.to_string()));
            }
            let points = self.store.history(symbol, from_ms, now_ms, None).await?;
            histories.insert(symbol.clone(), points);
        }

        let mut common: Option<BTreeSet<i64>> = None;
        for points in histories.values() {
            let stamps: BTreeSet<i64> = points.iter().map(|p| p.timestamp).collect();
            common = Some(match common {
                Some(acc) => acc.intersection(&stamps).copied().collect(),
                None => stamps,
            });
        }
        let common = common.unwrap_or_default();

        if common.len() < 2 {
            return Err(TraitError::InsufficientData(format!(
                "{} aligned observation(s) in the last {}s, need at least 2",
                common.len(),
                lookback.as_secs()
            )));
        }

        let mut series = BTreeMap::new();
        for (symbol, points) in histories {
            let aligned: Vec<PricePoint> = points
                .into_iter()
                .filter(|p| common.contains(&p.timestamp))
                .collect();
            let s = PriceSeries::new(aligned).map_err(|e| TraitError::Internal(e.to_string()))?;
            series.insert(symbol, s);
        }

        PriceTable::new(series).map_err(|e| TraitError::Internal(e.to_string()))
    }
}

#[async_trait]
impl PriceHistoryProvider for RedbPriceHistory {
    async fn get_price_table(
        &self,
        symbols: &BTreeSet<Symbol>,
        lookback: Duration,
    ) -> Result<PriceTable, TraitError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        self.get_price_table_at(symbols, lookback, now_ms).await
    }
}

/// Open (or create) a redb price store at `path`.
pub fn create_redb_store(path: impl AsRef<Path>) -> Result<Arc<RedbPriceStore>, TraitError> {
    let db = Database::create(path).map_err(db_err)?;
    Ok(Arc::new(RedbPriceStore::new(Arc::new(db))))
}

/// Create an in-memory price store for testing.
pub fn create_memory_store() -> Result<Arc<RedbPriceStore>, TraitError> {
    let db = Database::builder()
        .create_with_backend(redb::backends::InMemoryBackend::new())
        .map_err(db_err)?;
    Ok(Arc::new(RedbPriceStore::new(Arc::new(db))))
}
