//! Error types for the core data model.

use thiserror::Error;

/// Bounding-box parse errors. Client input, never retried.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BBoxParseError {
    /// Wrong number of comma-separated tokens.
    #[error("bbox must be 4 comma-separated floats")]
    WrongArity,

    /// A token is not a finite float.
    #[error("all bbox values must be floats")]
    NotANumber,
}
