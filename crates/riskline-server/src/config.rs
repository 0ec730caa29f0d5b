//! Server configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use riskline_core::Symbol;
use riskline_engine::{RiskConfig, SimulatorConfig, DEFAULT_UNIVERSE};
use riskline_risk::ScoreWeights;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Storage path
    #[serde(default = "default_storage_path")]
    pub storage_path: String,

    /// Risk computation settings
    #[serde(default)]
    pub risk: RiskSection,

    /// Market simulator settings
    #[serde(default)]
    pub simulator: SimulatorSection,
}

/// `[risk]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSection {
    /// History window in seconds
    #[serde(default = "default_lookback_secs")]
    pub lookback_secs: u64,

    /// Score multiplier for |VaR|
    #[serde(default = "default_var_weight")]
    pub var_weight: f64,

    /// Score multiplier for volatility
    #[serde(default = "default_volatility_weight")]
    pub volatility_weight: f64,

    /// Score multiplier for |max drawdown|
    #[serde(default = "default_drawdown_weight")]
    pub drawdown_weight: f64,
}

/// `[simulator]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorSection {
    /// Run the simulator alongside the server
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Milliseconds between price rounds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Width of the uniform price step
    #[serde(default = "default_max_step")]
    pub max_step: f64,

    /// Minimum price
    #[serde(default = "default_floor")]
    pub floor: f64,

    /// Fixed RNG seed
    pub seed: Option<u64>,

    /// Symbol -> initial price
    #[serde(default = "default_symbols")]
    pub symbols: BTreeMap<String, f64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

fn default_storage_path() -> String {
    "./data/riskline.redb".to_string()
}

fn default_lookback_secs() -> u64 {
    riskline_engine::DEFAULT_LOOKBACK.as_secs()
}

fn default_var_weight() -> f64 {
    ScoreWeights::default().var
}

fn default_volatility_weight() -> f64 {
    ScoreWeights::default().volatility
}

fn default_drawdown_weight() -> f64 {
    ScoreWeights::default().drawdown
}

fn default_interval_ms() -> u64 {
    2_000
}

fn default_max_step() -> f64 {
    10.0
}

fn default_floor() -> f64 {
    50.0
}

fn default_symbols() -> BTreeMap<String, f64> {
    DEFAULT_UNIVERSE
        .iter()
        .map(|(s, p)| (s.to_string(), *p))
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            storage_path: default_storage_path(),
            risk: RiskSection::default(),
            simulator: SimulatorSection::default(),
        }
    }
}

impl Default for RiskSection {
    fn default() -> Self {
        Self {
            lookback_secs: default_lookback_secs(),
            var_weight: default_var_weight(),
            volatility_weight: default_volatility_weight(),
            drawdown_weight: default_drawdown_weight(),
        }
    }
}

impl Default for SimulatorSection {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: default_interval_ms(),
            max_step: default_max_step(),
            floor: default_floor(),
            seed: None,
            symbols: default_symbols(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, std::io::Error> {
        toml::from_str(content).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

impl RiskSection {
    /// Engine-side risk settings.
    pub fn to_risk_config(&self) -> RiskConfig {
        RiskConfig {
            lookback: Duration::from_secs(self.lookback_secs),
            score_weights: ScoreWeights::new(
                self.var_weight,
                self.volatility_weight,
                self.drawdown_weight,
            ),
        }
    }
}

impl SimulatorSection {
    /// Engine-side simulator settings.
    ///
    /// Fails on a symbol that is blank after trimming.
    pub fn to_simulator_config(&self) -> Result<SimulatorConfig, std::io::Error> {
        let symbols = self
            .symbols
            .iter()
            .map(|(s, p)| {
                Symbol::new(s)
                    .map(|s| (s, *p))
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(SimulatorConfig {
            symbols,
            interval: Duration::from_millis(self.interval_ms),
            max_step: self.max_step,
            floor: self.floor,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert!(config.simulator.enabled);
        assert_eq!(config.simulator.symbols.len(), 8);
        assert_eq!(config.risk.to_risk_config(), RiskConfig::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.risk.lookback_secs, 86_400);
        assert_eq!(config.simulator.interval_ms, 2_000);
    }

    #[test]
    fn test_partial_sections() {
        let config = ServerConfig::from_toml(
            r#"
            port = 9000

            [risk]
            lookback_secs = 600
            var_weight = 25.0

            [simulator]
            enabled = false
            seed = 7

            [simulator.symbols]
            tcs = 3500.0
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        let risk = config.risk.to_risk_config();
        assert_eq!(risk.lookback, Duration::from_secs(600));
        assert_eq!(risk.score_weights, ScoreWeights::new(25.0, 10.0, 1.0));

        assert!(!config.simulator.enabled);
        let sim = config.simulator.to_simulator_config().unwrap();
        assert_eq!(sim.seed, Some(7));
        assert_eq!(sim.symbols.len(), 1);
        assert_eq!(sim.symbols[&Symbol::new("TCS").unwrap()], 3500.0);
    }

    #[test]
    fn test_blank_symbol_rejected() {
        let mut section = SimulatorSection::default();
        section.symbols.insert("  ".to_string(), 100.0);
        assert!(section.to_simulator_config().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = ServerConfig::from_toml("port = \"eighty\"").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
