//! Storage/query engine capability.
//!
//! The engine owns SQL execution, batch sizing, and the geometry-to-text
//! conversion functions named in a scan's projection. Everything upstream
//! treats it as a black box behind this trait: hand it a source location
//! and a predicate, get back a count or a lazy stream of row batches.

use crate::plan::ScanPlan;
use crate::predicate::Predicate;
use async_trait::async_trait;
use featstream_core::{ColumnInfo, RowBatch};
use futures::stream::BoxStream;
use thiserror::Error;

/// Engine failures. Assumed non-transient within a request; never retried.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A session could not be opened or checked out.
    #[error("engine session error: {0}")]
    Session(String),

    /// The source could not be opened (missing file, permissions,
    /// malformed data).
    #[error("cannot read source {src}: {message}")]
    Source { src: String, message: String },

    /// Query execution failed after the source was opened.
    #[error("query execution error: {0}")]
    Execution(String),
}

/// Stream of row batches from one paged scan. Single-pass.
pub type RowBatchStream = BoxStream<'static, Result<RowBatch, EngineError>>;

/// SQL-capable columnar storage behind the pipeline.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Count rows of `source` matching `predicate`.
    async fn count(&self, source: &str, predicate: &Predicate) -> Result<u64, EngineError>;

    /// Execute a paged, projected scan, yielding row batches lazily.
    /// Batch sizing is the engine's choice.
    async fn scan(&self, plan: ScanPlan) -> Result<RowBatchStream, EngineError>;

    /// Describe the columns of `source`.
    async fn describe(&self, source: &str) -> Result<Vec<ColumnInfo>, EngineError>;
}
