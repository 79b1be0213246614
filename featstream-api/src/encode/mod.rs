//! Stream encoders.
//!
//! One contract, four formats: consume the lazy feature sequence exactly
//! once, in order, and yield encoded bytes incrementally so output can be
//! flushed to the client before the sequence is exhausted. At most one
//! encoded feature is held at a time.

mod collection;
mod csv;
mod lines;

pub use collection::feature_collection;
pub use csv::csv_rows;
pub use lines::feature_lines;

use crate::error::Result;
use bytes::Bytes;
use featstream_core::{Feature, Link, OutputFormat, Page};
use futures::stream::BoxStream;
use futures::Stream;

/// Encoded byte-chunk stream handed to the HTTP body.
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// Dispatch a feature stream to the encoder for `format`.
///
/// GeoJSONSeq and NDJSON share an encoder; they differ only in the
/// advertised media type.
pub fn encode<S>(format: OutputFormat, features: S, page: Page, links: Vec<Link>) -> ByteStream
where
    S: Stream<Item = Result<Feature>> + Send + 'static,
{
    match format {
        OutputFormat::Geojson => Box::pin(feature_collection(features, page, links)),
        OutputFormat::Geojsonseq | OutputFormat::Ndjson => Box::pin(feature_lines(features)),
        OutputFormat::Csv => Box::pin(csv_rows(features)),
    }
}
