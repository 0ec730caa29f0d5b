//! Price history types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};
use crate::types::Symbol;

/// A single closing price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price point.
    pub fn new(timestamp: i64, close: f64) -> Self {
        Self { timestamp, close }
    }
}

/// Time-ordered closing prices for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a series, requiring strictly ascending timestamps.
    pub fn new(points: Vec<PricePoint>) -> RiskResult<Self> {
        if let Some(pos) = points
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(RiskError::insufficient_history(format!(
                "timestamps not strictly ascending at index {}",
                pos + 1
            )));
        }
        Ok(Self { points })
    }

    /// Creates a series from closes alone, indexed 0, 1, 2, ...
    pub fn from_closes(closes: &[f64]) -> Self {
        Self {
            points: closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint::new(i as i64, close))
                .collect(),
        }
    }

    /// Returns the observations.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Returns the timestamps in order.
    pub fn timestamps(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    /// Returns the closing prices in order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Closing prices for several symbols on one common time index.
///
/// Construction guarantees every column has exactly the same timestamps,
/// so a row index always refers to the same instant for every symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    index: Vec<i64>,
    columns: BTreeMap<Symbol, Vec<f64>>,
}

impl PriceTable {
    /// Builds a table from per-symbol series.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InsufficientHistory`] if the series do not share
    /// an identical time index.
    pub fn new(series: BTreeMap<Symbol, PriceSeries>) -> RiskResult<Self> {
        let mut iter = series.iter();
        let index = match iter.next() {
            Some((_, first)) => first.timestamps(),
            None => return Ok(Self::default()),
        };

        for (symbol, s) in iter {
            let aligned = s.len() == index.len()
                && s.points().iter().zip(&index).all(|(p, t)| p.timestamp == *t);
            if !aligned {
                return Err(RiskError::insufficient_history(format!(
                    "history for {} is not aligned with the common time index",
                    symbol
                )));
            }
        }

        let columns = series
            .into_iter()
            .map(|(symbol, s)| (symbol, s.closes()))
            .collect();

        Ok(Self { index, columns })
    }

    /// Builds a table from closes aligned by position.
    ///
    /// All columns must have the same length.
    pub fn from_closes<I>(columns: I) -> RiskResult<Self>
    where
        I: IntoIterator<Item = (Symbol, Vec<f64>)>,
    {
        let series = columns
            .into_iter()
            .map(|(symbol, closes)| (symbol, PriceSeries::from_closes(&closes)))
            .collect();
        Self::new(series)
    }

    /// The common time index.
    pub fn index(&self) -> &[i64] {
        &self.index
    }

    /// Closing prices for a symbol.
    pub fn column(&self, symbol: &Symbol) -> Option<&[f64]> {
        self.columns.get(symbol).map(Vec::as_slice)
    }

    /// True if the table has a column for `symbol`.
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.columns.contains_key(symbol)
    }

    /// Symbols present in the table.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.columns.keys()
    }

    /// Number of time points.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if the table has no time points.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
