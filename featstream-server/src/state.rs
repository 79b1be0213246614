//! Application state management
//!
//! One `AppState` per process, shared across handlers. The storage engine
//! and filter parser are capabilities injected at construction; handlers
//! never know which implementations sit behind them. Engine sessions are
//! checked out per request inside the engine itself, so the state carries
//! no per-request mutable data.

use crate::config::ServerConfig;
use featstream_api::{FilterParser, QueryEngine};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Storage/query capability
    pub engine: Arc<dyn QueryEngine>,
    /// Filter-parse capability
    pub filters: Arc<dyn FilterParser>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        engine: Arc<dyn QueryEngine>,
        filters: Arc<dyn FilterParser>,
    ) -> Self {
        Self {
            config,
            engine,
            filters,
        }
    }
}
