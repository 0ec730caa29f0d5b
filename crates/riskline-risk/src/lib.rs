//! # riskline-risk
//!
//! The numerical core of Riskline: turning aligned price history into a
//! portfolio return series and then into risk statistics.
//!
//! - **Returns**: per-symbol simple returns, weight normalization and the
//!   weighted portfolio return series
//! - **VaR**: historical 95% Value at Risk (linear percentile interpolation)
//! - **Volatility**: population standard deviation of returns
//! - **Drawdown**: maximum peak-to-trough decline of cumulative wealth
//! - **Score**: bounded composite risk score
//!
//! Everything here is a pure function of its inputs. No I/O, no caching.
//!
//! ## Example
//!
//! ```
//! use riskline_core::{PriceTable, Symbol};
//! use riskline_risk::prelude::*;
//!
//! let tcs = Symbol::new("TCS").unwrap();
//! let table = PriceTable::from_closes([(tcs.clone(), vec![100.0, 90.0])]).unwrap();
//!
//! let returns = build_portfolio_returns(&table, &[(tcs, 10.0)]).unwrap();
//! let summary = compute_risk(&returns).unwrap();
//!
//! assert!((summary.var_95 + 0.10).abs() < 1e-12);
//! assert_eq!(summary.risk_score, 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calculator;
pub mod drawdown;
pub mod returns;
pub mod score;
pub mod var;
pub mod volatility;

pub use calculator::{compute_risk, RiskCalculator};
pub use riskline_core::RiskError;
pub use score::ScoreWeights;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::calculator::{compute_risk, RiskCalculator};
    pub use crate::drawdown::max_drawdown;
    pub use crate::returns::{build_portfolio_returns, normalize_weights, simple_returns};
    pub use crate::score::{risk_score, ScoreWeights};
    pub use crate::var::{historical_var, percentile, VAR_95_TAIL};
    pub use crate::volatility::population_std_dev;
    pub use crate::RiskError;
}
