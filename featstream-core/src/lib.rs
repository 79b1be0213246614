//! Core data model for the feature streaming service.
//!
//! Leaf types shared across the pipeline: bounding boxes, dynamically
//! shaped rows with statically tagged values, GeoJSON-model features,
//! output formats, and pagination math. No async, no I/O.

pub mod bbox;
pub mod error;
pub mod feature;
pub mod format;
pub mod page;
pub mod row;

pub use bbox::BBox;
pub use error::BBoxParseError;
pub use feature::{Feature, Geometry};
pub use format::{MediaType, OutputFormat};
pub use page::{Link, LinkRel, Page};
pub use row::{ColumnInfo, FieldValue, Row, RowBatch};
