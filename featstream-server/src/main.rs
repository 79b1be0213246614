//! Feature streaming server CLI
//!
//! Run with: `cargo run -p featstream-server -- --help`

use clap::Parser;
use featstream_api::Cql2Parser;
use featstream_duckdb::{DuckDbConfig, DuckDbEngine};
use featstream_server::{init_logging, AppState, FeatServer, ServerConfig, TelemetryConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();

    let telemetry = TelemetryConfig::with_server_config(&config);
    init_logging(&telemetry);

    let engine = DuckDbEngine::connect(&DuckDbConfig {
        extensions: config.engine_extensions.clone(),
    })?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.listen_addr,
        cors = config.cors_enabled,
        extensions = ?config.engine_extensions,
        "starting feature server"
    );

    let state = AppState::new(config, Arc::new(engine), Arc::new(Cql2Parser));
    FeatServer::new(state).run().await?;
    Ok(())
}
