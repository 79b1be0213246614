//! Feature streaming endpoints.
//!
//! One request maps to one predicate build, one count query, one paged
//! scan, one lazy materialization, and one encoder. The response body is
//! a chunked stream; after the first flushed byte an error can only
//! truncate the body, so failures mid-stream end the connection and are
//! logged rather than mapped to a status code.

use crate::error::{Result, ServerError};
use crate::links::build_links;
use crate::params::FeatureParams;
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::Response;
use axum::Json;
use featstream_api::{encode, materialize, predicate, ApiError, Predicate, ScanPlan};
use featstream_core::{BBox, Page};
use futures::TryStreamExt;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{info, warn};

/// `GET /features` — stream features matching the request filters.
pub async fn features(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(params): Query<FeatureParams>,
) -> Result<Response> {
    let (limit, requested_offset) = params
        .page_bounds(state.config.default_limit, state.config.max_limit)
        .map_err(ServerError::Validation)?;
    let format = params.format;

    let pred = build_predicate(&state, &params)?;

    // Count first; the clamped offset feeds both the scan and the
    // reported metadata.
    let total = state
        .engine
        .count(&params.url, &pred)
        .await
        .map_err(ApiError::from)?;
    let page = Page::clamp(total, limit, requested_offset);

    let plan = ScanPlan::new(
        params.url.clone(),
        params.geom_column.clone(),
        pred,
        format,
        page.limit,
        page.offset,
    );
    let batches = state.engine.scan(plan).await.map_err(ApiError::from)?;
    let features = materialize::features(batches, params.geom_column.clone());

    let media_type = format.media_type();
    let links = build_links(&uri, &page, media_type);

    info!(
        url = %params.url,
        format = ?format,
        total,
        limit = page.limit,
        offset = page.offset,
        "streaming features"
    );

    let stream = encode(format, features, page, links)
        .inspect_err(|e| warn!(error = %e, "feature stream aborted"));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, media_type.as_str())
        .body(Body::from_stream(stream))
        .expect("response builder cannot fail");
    Ok(response)
}

/// `GET /features/count` — count-only pass-through.
pub async fn count(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeatureParams>,
) -> Result<Json<JsonValue>> {
    let pred = build_predicate(&state, &params)?;
    let total = state
        .engine
        .count(&params.url, &pred)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(serde_json::json!({ "numberMatched": total })))
}

/// Compose the request predicate from the optional bbox and filter.
fn build_predicate(state: &AppState, params: &FeatureParams) -> Result<Predicate> {
    let bbox = match params.bbox.as_deref() {
        Some(raw) => Some(raw.parse::<BBox>().map_err(ApiError::from)?),
        None => None,
    };
    let filter = params
        .filter
        .as_deref()
        .map(|text| (text, params.filter_lang));
    Ok(predicate::build(
        bbox.as_ref(),
        filter,
        state.filters.as_ref(),
    )?)
}
