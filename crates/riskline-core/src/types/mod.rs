//! Domain types for the risk pipeline.

mod holding;
mod portfolio;
mod prices;
mod returns;
mod summary;
mod symbol;

pub use holding::Holding;
pub use portfolio::{Portfolio, Position};
pub use prices::{PricePoint, PriceSeries, PriceTable};
pub use returns::{PortfolioReturnSeries, ReturnSeries};
pub use summary::RiskSummary;
pub use symbol::Symbol;
