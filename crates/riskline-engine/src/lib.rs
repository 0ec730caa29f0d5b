//! # Riskline Engine
//!
//! The stateful side of Riskline.
//!
//! This crate provides:
//! - [`RiskService`]: scores holdings against a [`PriceHistoryProvider`]
//! - [`MarketSimulator`]: background random walk feeding a [`PriceStore`]
//!
//! ## Architecture
//!
//! ```text
//! MarketSimulator ─> PriceStore ─> PriceHistoryProvider ─> RiskService ─> RiskSummary
//! ```
//!
//! The simulator and the service never share memory; the store is the only
//! channel between them.
//!
//! ## Usage
//!
//! ```ignore
//! let store = create_redb_store("data/prices.redb")?;
//! let handle = MarketSimulator::new(store.clone(), SimulatorConfig::default())
//!     .await?
//!     .spawn();
//!
//! let service = RiskService::builder()
//!     .with_provider(Arc::new(RedbPriceHistory::new(store)))
//!     .with_lookback(Duration::from_secs(3600))
//!     .build()?;
//!
//! let summary = service.score(&holdings).await?;
//! handle.shutdown().await?;
//! ```
//!
//! [`PriceHistoryProvider`]: riskline_traits::PriceHistoryProvider
//! [`PriceStore`]: riskline_traits::PriceStore

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod service;
pub mod simulator;

// Re-exports
pub use error::EngineError;
pub use service::{RiskConfig, RiskService, RiskServiceBuilder, DEFAULT_LOOKBACK};
pub use simulator::{MarketSimulator, SimulatorConfig, SimulatorHandle, DEFAULT_UNIVERSE};
