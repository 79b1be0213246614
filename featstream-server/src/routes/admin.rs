//! Health check and schema introspection endpoints.

use crate::error::Result;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use featstream_api::ApiError;
use featstream_core::ColumnInfo;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// `GET /health`
pub async fn health() -> Json<JsonValue> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Deserialize)]
pub struct MetadataParams {
    /// Source location to describe.
    pub url: String,
}

/// `GET /metadata` — thin pass-through of the engine's schema description.
pub async fn metadata(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MetadataParams>,
) -> Result<Json<Vec<ColumnInfo>>> {
    let columns = state
        .engine
        .describe(&params.url)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(columns))
}
