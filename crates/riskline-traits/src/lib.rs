//! # Riskline Traits
//!
//! Trait definitions for the Riskline risk engine.
//!
//! This crate contains ONLY trait definitions and the plain data types they
//! exchange. All implementations live in extension crates.
//!
//! ## Module Structure
//!
//! - [`market_data`]: [`PriceHistoryProvider`](market_data::PriceHistoryProvider),
//!   the source of aligned price history for risk computation
//! - [`storage`]: [`PriceStore`](storage::PriceStore), the price cache
//!   written by the market simulator
//!
//! ## Dependency Injection
//!
//! The risk service is generic over its provider:
//!
//! ```ignore
//! let store = Arc::new(RedbPriceStore::new(db));
//! let provider = RedbPriceHistory::new(store.clone());
//! let service = RiskService::new(provider, RiskConfig::default());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod market_data;
pub mod storage;

// Re-export commonly used types
pub use error::TraitError;
pub use market_data::PriceHistoryProvider;
pub use storage::{PriceStore, PriceTick};
