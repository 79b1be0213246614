//! GeoJSON FeatureCollection encoder.

use crate::error::Result;
use async_stream::try_stream;
use bytes::Bytes;
use featstream_core::{Feature, Link, Page};
use futures::{pin_mut, Stream, StreamExt};

/// Literal opening fragment; the features array is closed by [`tail`].
const HEAD: &[u8] = b"{\"type\":\"FeatureCollection\",\"features\":[";

/// Encode a FeatureCollection with trailing pagination metadata.
///
/// Features are emitted one chunk each, comma-separated with no separator
/// before the first. The closing chunk terminates the array and merges
/// `numberMatched`, `numberReturned`, `limit`, `offset` and `links` at the
/// same nesting level, so the concatenation of all chunks is exactly one
/// JSON object. `numberReturned` is the count actually emitted, which can
/// be below the page size when rows were dropped for missing geometry.
pub fn feature_collection<S>(
    features: S,
    page: Page,
    links: Vec<Link>,
) -> impl Stream<Item = Result<Bytes>> + Send
where
    S: Stream<Item = Result<Feature>> + Send + 'static,
{
    try_stream! {
        yield Bytes::from_static(HEAD);

        let mut returned: u64 = 0;
        pin_mut!(features);
        while let Some(feature) = features.next().await {
            let feature = feature?;
            let mut chunk = Vec::with_capacity(256);
            if returned > 0 {
                chunk.push(b',');
            }
            serde_json::to_writer(&mut chunk, &feature)?;
            returned += 1;
            yield Bytes::from(chunk);
        }

        yield Bytes::from(tail(&page, returned, &links)?);
    }
}

/// Closing fragment: array terminator plus object-level metadata.
///
/// Each metadata value is serialized structurally and joined with fixed
/// punctuation — no splicing of a separately serialized object.
fn tail(page: &Page, returned: u64, links: &[Link]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(192);
    out.extend_from_slice(b"],\"numberMatched\":");
    serde_json::to_writer(&mut out, &page.total)?;
    out.extend_from_slice(b",\"numberReturned\":");
    serde_json::to_writer(&mut out, &returned)?;
    out.extend_from_slice(b",\"limit\":");
    serde_json::to_writer(&mut out, &page.limit)?;
    out.extend_from_slice(b",\"offset\":");
    serde_json::to_writer(&mut out, &page.offset)?;
    out.extend_from_slice(b",\"links\":");
    serde_json::to_writer(&mut out, &links)?;
    out.push(b'}');
    Ok(out)
}
