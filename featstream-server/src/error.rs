//! Server error types with HTTP status code mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use featstream_api::ApiError;
use serde::Serialize;
use thiserror::Error;

/// Server error wrapping pipeline errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Request parameter outside its allowed range.
    #[error("{0}")]
    Validation(String),
}

impl ServerError {
    /// Map error to HTTP status code.
    ///
    /// Bad client input (bbox, filter, parameter ranges) is 422 so the
    /// message reaches the caller; engine and serialization failures are
    /// server-side. Streaming errors never reach this mapping — once the
    /// body has started, the status line is already gone.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Api(ApiError::BBox(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Api(ApiError::Filter(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Api(ApiError::Engine(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Api(ApiError::Serialization(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        ServerError::Validation(msg.into())
    }
}

/// JSON error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// HTTP status code
    pub status: u16,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            format!(r#"{{"error":"{}","status":{}}}"#, self, status.as_u16())
        });

        (status, [("content-type", "application/json")], json).into_response()
    }
}

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use featstream_api::{EngineError, FilterSyntaxError};
    use featstream_core::BBoxParseError;

    #[test]
    fn client_input_errors_map_to_422() {
        let bbox = ServerError::Api(ApiError::BBox(BBoxParseError::WrongArity));
        assert_eq!(bbox.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let filter =
            ServerError::Api(ApiError::Filter(FilterSyntaxError("nope".to_string())));
        assert_eq!(filter.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let validation = ServerError::validation("limit must be between 1 and 10000");
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_errors_map_to_500() {
        let engine = ServerError::Api(ApiError::Engine(EngineError::Execution(
            "boom".to_string(),
        )));
        assert_eq!(engine.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
