//! Feature streaming pipeline.
//!
//! Translates request filters into a parameterized predicate, plans a
//! count-then-page scan against the storage engine, materializes row
//! batches into a lazy feature sequence, and encodes that sequence into
//! one of four byte-stream formats.
//!
//! The storage engine and the filter-expression parser are capabilities
//! implemented elsewhere and injected behind [`QueryEngine`] and
//! [`FilterParser`].

pub mod encode;
pub mod engine;
pub mod error;
pub mod filter;
pub mod materialize;
pub mod plan;
pub mod predicate;

pub use encode::{encode, ByteStream};
pub use engine::{EngineError, QueryEngine, RowBatchStream};
pub use error::{ApiError, Result};
pub use filter::{Cql2Parser, FilterLang, FilterParser, FilterSyntaxError, SqlFilter};
pub use plan::{GeometryEncoding, ScanPlan};
pub use predicate::Predicate;
