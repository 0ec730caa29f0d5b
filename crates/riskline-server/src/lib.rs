//! # Riskline Server
//!
//! REST server for the Riskline portfolio risk engine.
//!
//! ## Features
//!
//! - Portfolio risk scoring (`POST /risk/score`, `POST /api/v1/risk/score`)
//! - Price reports from the simulated market (`GET /api/v1/prices/{symbol}`)
//! - Health endpoints
//! - Configuration via TOML file
//!
//! ## Usage
//!
//! ```ignore
//! use riskline_server::Server;
//!
//! let server = Server::new(config, state);
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use handlers::AppState;

/// The Riskline server.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server and run until Ctrl+C.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::new(
            self.config.host.parse().unwrap_or([0, 0, 0, 0].into()),
            self.config.port,
        );

        info!("Starting Riskline server on {}", addr);
        info!("  GET  /");
        info!("  GET  /health");
        info!("  POST /api/v1/risk/score");
        info!("  GET  /api/v1/prices/{{symbol}}");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

/// Shutdown signal handler.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    info!("Shutting down...");
}
