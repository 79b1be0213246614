//! Newline-delimited feature encoder (GeoJSONSeq / NDJSON).

use crate::error::Result;
use async_stream::try_stream;
use bytes::Bytes;
use featstream_core::Feature;
use futures::{pin_mut, Stream, StreamExt};

/// Encode one feature JSON per line: no wrapping, no separators, no
/// trailing metadata. GeoJSONSeq and NDJSON both use this encoding; only
/// the advertised media type differs.
pub fn feature_lines<S>(features: S) -> impl Stream<Item = Result<Bytes>> + Send
where
    S: Stream<Item = Result<Feature>> + Send + 'static,
{
    try_stream! {
        pin_mut!(features);
        while let Some(feature) = features.next().await {
            let feature = feature?;
            let mut chunk = Vec::with_capacity(256);
            serde_json::to_writer(&mut chunk, &feature)?;
            chunk.push(b'\n');
            yield Bytes::from(chunk);
        }
    }
}
