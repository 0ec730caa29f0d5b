//! Riskline server entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use riskline_engine::{MarketSimulator, RiskService};
use riskline_ext_redb::{create_redb_store, RedbPriceHistory};
use riskline_server::{AppState, Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,riskline=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Riskline Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/riskline.toml".to_string());

    let server_config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    // Create storage
    if let Some(parent) = std::path::Path::new(&server_config.storage_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let store = create_redb_store(&server_config.storage_path)?;

    // Start simulator
    let simulator = if server_config.simulator.enabled {
        let sim_config = server_config.simulator.to_simulator_config()?;
        Some(
            MarketSimulator::new(store.clone(), sim_config)
                .await?
                .spawn(),
        )
    } else {
        info!("Market simulator disabled");
        None
    };

    // Build service
    let service = RiskService::builder()
        .with_provider(Arc::new(RedbPriceHistory::new(store.clone())))
        .with_config(server_config.risk.to_risk_config())
        .build()?;

    let state = Arc::new(AppState {
        service: Arc::new(service),
        store,
    });

    // Start server
    let server = Server::new(server_config, state);
    server.start().await?;

    if let Some(handle) = simulator {
        handle.shutdown().await?;
    }

    Ok(())
}
