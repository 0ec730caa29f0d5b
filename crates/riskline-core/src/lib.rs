//! # Riskline Core
//!
//! Core types and the error taxonomy shared by every Riskline crate.
//!
//! - **Types**: [`Symbol`], [`Holding`], [`Portfolio`], [`PriceSeries`],
//!   [`PriceTable`], [`ReturnSeries`], [`PortfolioReturnSeries`], [`RiskSummary`]
//! - **Errors**: [`RiskError`], one variant per failure kind surfaced to callers
//!
//! ## Design Philosophy
//!
//! - **Request scoped**: every value here is created per request and dropped
//!   after the response is sent. Nothing is shared or cached.
//! - **Fail loudly**: constructors validate and return typed errors instead of
//!   coercing bad input into zeros.
//!
//! ## Example
//!
//! ```rust
//! use riskline_core::prelude::*;
//!
//! let holdings = vec![
//!     Holding::new(Symbol::new("tcs").unwrap(), 10.0, 3500.0),
//!     Holding::new(Symbol::new("INFY").unwrap(), 5.0, 1600.0),
//! ];
//! let portfolio = Portfolio::from_holdings(&holdings).unwrap();
//! assert_eq!(portfolio.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

pub use error::{RiskError, RiskResult};
pub use types::*;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::types::{
        Holding, Portfolio, PortfolioReturnSeries, Position, PricePoint, PriceSeries, PriceTable,
        ReturnSeries, RiskSummary, Symbol,
    };
}
