//! Server configuration

use clap::Parser;
use std::net::SocketAddr;

/// Feature streaming HTTP server configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "featstream")]
#[command(about = "Streaming feature server over columnar geospatial files")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "FEATSTREAM_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    /// Enable CORS (Cross-Origin Resource Sharing)
    #[arg(
        long,
        env = "FEATSTREAM_CORS_ENABLED",
        action = clap::ArgAction::Set,
        default_value_t = true
    )]
    pub cors_enabled: bool,

    /// Page size when the request does not specify one
    #[arg(long, env = "FEATSTREAM_DEFAULT_LIMIT", default_value = "10")]
    pub default_limit: u64,

    /// Maximum accepted page size
    #[arg(long, env = "FEATSTREAM_MAX_LIMIT", default_value = "10000")]
    pub max_limit: u64,

    /// Engine extensions to install/load at startup (comma-separated)
    #[arg(
        long = "engine-extension",
        env = "FEATSTREAM_ENGINE_EXTENSIONS",
        value_delimiter = ',',
        default_value = "httpfs,spatial"
    )]
    pub engine_extensions: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FEATSTREAM_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        // Defaults come from the clap attributes; parsing an empty
        // command line applies them all.
        Self::parse_from(["featstream"])
    }
}
