//! Ticker symbol identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// Ticker symbol (e.g. `TCS`, `AAPL`).
///
/// Symbols are trimmed and upper-cased on construction, so `" tcs"` and
/// `"TCS"` refer to the same instrument. Empty symbols are rejected.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol, normalizing case and whitespace.
    pub fn new(raw: impl AsRef<str>) -> RiskResult<Self> {
        let normalized = raw.as_ref().trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(RiskError::invalid_holding(
                raw.as_ref(),
                "symbol must not be empty",
            ));
        }
        Ok(Self(normalized))
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = RiskError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = RiskError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let symbol = Symbol::new("  reliance ").unwrap();
        assert_eq!(symbol.as_str(), "RELIANCE");
        assert_eq!(symbol, Symbol::new("RELIANCE").unwrap());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            Symbol::new("   "),
            Err(RiskError::InvalidHolding { .. })
        ));
    }

    #[test]
    fn test_serde() {
        let symbol: Symbol = serde_json::from_str("\"hdfcbank\"").unwrap();
        assert_eq!(symbol.as_str(), "HDFCBANK");
        assert_eq!(serde_json::to_string(&symbol).unwrap(), "\"HDFCBANK\"");
        assert!(serde_json::from_str::<Symbol>("\"\"").is_err());
    }
}
