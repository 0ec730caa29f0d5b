//! Market price simulator.
//!
//! A stand-alone background service that random-walks a fixed universe of
//! symbols and writes every round of prices into a [`PriceStore`]. It owns
//! its price state; the risk pipeline only ever sees what lands in the store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use riskline_core::Symbol;
use riskline_traits::{PriceStore, PriceTick};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::error::EngineError;

/// Starting universe: symbol and initial price.
pub const DEFAULT_UNIVERSE: [(&str, f64); 8] = [
    ("AAPL", 150.0),
    ("GOOGL", 140.0),
    ("MSFT", 320.0),
    ("TSLA", 180.0),
    ("TCS", 3500.0),
    ("INFY", 1600.0),
    ("RELIANCE", 2800.0),
    ("HDFCBANK", 1500.0),
];

/// Simulator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Symbols and their starting prices.
    pub symbols: BTreeMap<Symbol, f64>,
    /// Time between rounds.
    pub interval: Duration,
    /// Width of the uniform step; each move lies in `[-max_step/2, max_step/2)`.
    pub max_step: f64,
    /// Prices never drop below this.
    pub floor: f64,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        let symbols = DEFAULT_UNIVERSE
            .iter()
            .filter_map(|(s, p)| Symbol::new(s).ok().map(|s| (s, *p)))
            .collect();
        Self {
            symbols,
            interval: Duration::from_secs(2),
            max_step: 10.0,
            floor: 50.0,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Checks the configuration is usable.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.symbols.is_empty() {
            return Err(EngineError::ConfigError("simulator has no symbols".into()));
        }
        if let Some((symbol, price)) = self
            .symbols
            .iter()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(EngineError::ConfigError(format!(
                "initial price for {} must be positive, got {}",
                symbol, price
            )));
        }
        if self.interval.is_zero() {
            return Err(EngineError::ConfigError("simulator interval must be positive".into()));
        }
        if !self.max_step.is_finite() || self.max_step < 0.0 {
            return Err(EngineError::ConfigError(format!(
                "max_step must be non-negative, got {}",
                self.max_step
            )));
        }
        if !self.floor.is_finite() || self.floor <= 0.0 {
            return Err(EngineError::ConfigError(format!(
                "floor must be positive, got {}",
                self.floor
            )));
        }
        Ok(())
    }
}

/// Random-walk price generator bound to a store.
pub struct MarketSimulator {
    store: Arc<dyn PriceStore>,
    prices: BTreeMap<Symbol, f64>,
    rng: StdRng,
    config: SimulatorConfig,
}

impl MarketSimulator {
    /// Create a simulator writing to `store`.
    ///
    /// Symbols the store already holds resume from their latest close; only
    /// symbols it has never seen start at the configured price.
    pub async fn new(
        store: Arc<dyn PriceStore>,
        config: SimulatorConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let mut prices = config.symbols.clone();
        let mut resumed = 0;
        for (symbol, price) in prices.iter_mut() {
            if let Some(tick) = store.latest(symbol).await? {
                if tick.close.is_finite() && tick.close > 0.0 {
                    *price = tick.close;
                    resumed += 1;
                }
            }
        }
        if resumed > 0 {
            info!("Simulator resumed {} symbols from stored prices", resumed);
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            store,
            prices,
            rng,
            config,
        })
    }

    /// Current simulated prices.
    pub fn prices(&self) -> &BTreeMap<Symbol, f64> {
        &self.prices
    }

    /// Advance every price by one random step, stamped with `timestamp_ms`.
    ///
    /// Does not touch the store.
    pub fn step(&mut self, timestamp_ms: i64) -> Vec<PriceTick> {
        let half = self.config.max_step / 2.0;
        let floor = self.config.floor;

        let mut ticks = Vec::with_capacity(self.prices.len());
        for (symbol, price) in self.prices.iter_mut() {
            let delta = if half > 0.0 {
                self.rng.gen_range(-half..half)
            } else {
                0.0
            };
            *price = (*price + delta).max(floor);
            ticks.push(PriceTick::new(symbol.clone(), timestamp_ms, *price));
        }
        ticks
    }

    /// Write the current prices without moving them.
    pub async fn publish_current(&self, timestamp_ms: i64) -> Result<(), EngineError> {
        let ticks: Vec<_> = self
            .prices
            .iter()
            .map(|(s, p)| PriceTick::new(s.clone(), timestamp_ms, *p))
            .collect();
        self.store.record_batch(&ticks).await?;
        Ok(())
    }

    /// Run one round: step all prices and record them as one batch.
    pub async fn tick(&mut self, timestamp_ms: i64) -> Result<Vec<PriceTick>, EngineError> {
        let ticks = self.step(timestamp_ms);
        self.store.record_batch(&ticks).await?;
        Ok(ticks)
    }

    /// Run the simulator on its own task until shut down.
    ///
    /// The current prices are published immediately so every symbol is
    /// known to the store before the first interval elapses.
    pub fn spawn(mut self) -> SimulatorHandle {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
        let period = self.config.interval;

        let join = tokio::spawn(async move {
            if let Err(e) = self.publish_current(now_ms()).await {
                warn!("Simulator failed to publish initial prices: {}", e);
            }

            let mut ticker = interval(period);
            // First tick completes immediately; initial prices already went out.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.tick(now_ms()).await {
                            Ok(ticks) => debug!("Simulator recorded {} ticks", ticks.len()),
                            Err(e) => warn!("Simulator round failed: {}", e),
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        info!("Market simulator shutting down");
                        break;
                    }
                }
            }
        });

        info!("Started market simulator every {:?}", period);

        SimulatorHandle { shutdown_tx, join }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Handle to a running simulator.
pub struct SimulatorHandle {
    shutdown_tx: broadcast::Sender<()>,
    join: JoinHandle<()>,
}

impl SimulatorHandle {
    /// Signal shutdown and wait for the task to exit.
    pub async fn shutdown(self) -> Result<(), EngineError> {
        let _ = self.shutdown_tx.send(());
        self.join
            .await
            .map_err(|e| EngineError::TaskError(e.to_string()))
    }
}
