//! Row-batch to feature materialization.
//!
//! Turns the engine's batch stream into a lazy, single-pass feature
//! sequence. Single consumption is enforced by ownership: the batch
//! stream moves into the producer and cannot be restarted. Each batch is
//! fully drained before the next one is polled, so memory stays bounded
//! by one batch regardless of the total match count.

use crate::engine::RowBatchStream;
use crate::error::Result;
use async_stream::try_stream;
use featstream_core::{Feature, FieldValue, Geometry};
use futures::{Stream, StreamExt};

/// Lazy feature sequence over a batch stream.
///
/// The geometry column is removed from each row; a JSON decode is
/// attempted and the raw text is kept on failure (e.g. WKT for tabular
/// output). Rows whose geometry is null or absent are dropped — a record
/// with no geometry is not a feature.
pub fn features(
    mut batches: RowBatchStream,
    geom_column: String,
) -> impl Stream<Item = Result<Feature>> + Send {
    try_stream! {
        while let Some(batch) = batches.next().await {
            let batch = batch?;
            for mut row in batch.rows {
                let Some(value) = row.take(&geom_column) else {
                    continue;
                };
                let geometry = match value {
                    FieldValue::Null => continue,
                    FieldValue::String(text) => Geometry::decode(text),
                    FieldValue::Json(json) => Geometry::Decoded(json),
                    FieldValue::Bool(b) => Geometry::Raw(b.to_string()),
                    FieldValue::Int(i) => Geometry::Raw(i.to_string()),
                    FieldValue::Float(f) => Geometry::Raw(f.to_string()),
                };
                yield Feature {
                    geometry,
                    properties: row,
                };
            }
        }
    }
}
