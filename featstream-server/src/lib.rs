//! Feature streaming HTTP server
//!
//! A thin axum wrapper around `featstream-api`: query parameters in, a
//! chunked byte stream out. The storage engine and filter parser are
//! injected capabilities, so the same router serves production (DuckDB)
//! and tests (canned engines) unchanged.
//!
//! # Endpoints
//!
//! - `GET /features` — paged, filtered feature stream in one of four formats
//! - `GET /features/count` — predicate match count
//! - `GET /metadata` — source schema pass-through
//! - `GET /health` — liveness
//!
//! # Example
//!
//! ```ignore
//! use featstream_server::{AppState, FeatServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = AppState::new(ServerConfig::default(), engine, filters);
//!     FeatServer::new(state).run().await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod links;
pub mod params;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;
pub use telemetry::{init_logging, LogFormat, TelemetryConfig};

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Feature streaming HTTP server
pub struct FeatServer {
    /// Application state
    state: Arc<AppState>,
    /// Configured router
    router: Router,
}

impl FeatServer {
    /// Create a new server from state (configuration plus capabilities)
    pub fn new(state: AppState) -> Self {
        let state = Arc::new(state);
        let router = routes::build_router(state.clone());
        Self { state, router }
    }

    /// Get a reference to the application state
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Get the router for testing
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind and serve until shutdown
    pub async fn run(self) -> std::io::Result<()> {
        let addr = self.state.config.listen_addr;
        let listener = TcpListener::bind(addr).await?;

        info!(addr = %addr, "server listening");

        axum::serve(listener, self.router).await
    }
}
