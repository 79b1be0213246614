//! Pipeline error types.

use crate::engine::EngineError;
use crate::filter::FilterSyntaxError;
use featstream_core::BBoxParseError;
use thiserror::Error;

/// Errors surfaced by the feature pipeline.
///
/// Bbox and filter variants are client-input errors; the boundary layer
/// maps them to a 4xx response. Engine and serialization failures are
/// fatal for the request and are not retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-supplied bbox failed to parse.
    #[error(transparent)]
    BBox(#[from] BBoxParseError),

    /// Client-supplied filter expression rejected by the parser.
    #[error("filter syntax error: {0}")]
    Filter(#[from] FilterSyntaxError),

    /// Storage engine failure (missing source, permissions, malformed
    /// data file).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A feature could not be encoded for the selected format.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Serialization(e.to_string())
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, ApiError>;
