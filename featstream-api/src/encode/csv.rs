//! CSV encoder.
//!
//! The row shape is the feature record itself: a `type` column, the
//! geometry in its raw decoded-or-text form rendered as a string, and the
//! properties object rendered as compact JSON text. The typed record
//! fixes the column set, so later rows cannot drift from the header.
//! RFC 4180 quoting, CRLF row endings.

use crate::error::Result;
use async_stream::try_stream;
use bytes::Bytes;
use featstream_core::{Feature, Geometry};
use futures::{pin_mut, Stream, StreamExt};

const HEADER: &[u8] = b"type,geometry,properties\r\n";

/// Encode features as CSV. The header is emitted once, ahead of the first
/// data row; an empty sequence produces no output at all.
pub fn csv_rows<S>(features: S) -> impl Stream<Item = Result<Bytes>> + Send
where
    S: Stream<Item = Result<Feature>> + Send + 'static,
{
    try_stream! {
        let mut wrote_header = false;
        pin_mut!(features);
        while let Some(feature) = features.next().await {
            let feature = feature?;
            if !wrote_header {
                wrote_header = true;
                yield Bytes::from_static(HEADER);
            }
            yield Bytes::from(encode_row(&feature)?);
        }
    }
}

fn encode_row(feature: &Feature) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(128);
    write_cell(&mut out, "Feature");
    out.push(b',');
    match &feature.geometry {
        Geometry::Raw(text) => write_cell(&mut out, text),
        Geometry::Decoded(value) => write_cell(&mut out, &serde_json::to_string(value)?),
    }
    out.push(b',');
    write_cell(&mut out, &serde_json::to_string(&feature.properties)?);
    out.extend_from_slice(b"\r\n");
    Ok(out)
}

/// RFC 4180: quote a value containing a comma, quote, or newline; double
/// embedded quotes.
fn write_cell(out: &mut Vec<u8>, value: &str) {
    let needs_quoting = value
        .bytes()
        .any(|b| matches!(b, b',' | b'"' | b'\n' | b'\r'));
    if !needs_quoting {
        out.extend_from_slice(value.as_bytes());
        return;
    }

    out.push(b'"');
    for b in value.bytes() {
        if b == b'"' {
            out.push(b'"');
        }
        out.push(b);
    }
    out.push(b'"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::test_support::{collect_bytes, point_features};
    use featstream_core::{FieldValue, Row};
    use futures::stream;

    #[tokio::test]
    async fn header_then_identical_rows() {
        let bytes = collect_bytes(csv_rows(point_features())).await;
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.split("\r\n");
        assert_eq!(lines.next(), Some("type,geometry,properties"));
        let rows: Vec<&str> = lines.filter(|l| !l.is_empty()).collect();
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert_eq!(
                row,
                r#"Feature,"{""type"":""Point"",""coordinates"":[0,0]}",{}"#
            );
        }
    }

    #[tokio::test]
    async fn wkt_geometry_passes_through_unquoted() {
        let feature = Feature {
            geometry: Geometry::Raw("POINT (30 10)".to_string()),
            properties: Row::new(),
        };
        let bytes = collect_bytes(csv_rows(stream::iter(vec![Ok(feature)]))).await;
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "type,geometry,properties\r\nFeature,POINT (30 10),{}\r\n");
    }

    #[tokio::test]
    async fn properties_render_as_json_cell() {
        let mut properties = Row::new();
        properties.push("name", FieldValue::String("St. \"Pauli\"".to_string()));
        properties.push("population", FieldValue::Int(120));
        let feature = Feature {
            geometry: Geometry::Raw("POINT (9 53)".to_string()),
            properties,
        };
        let bytes = collect_bytes(csv_rows(stream::iter(vec![Ok(feature)]))).await;
        let text = String::from_utf8(bytes).unwrap();

        let row = text.split("\r\n").nth(1).unwrap();
        assert_eq!(
            row,
            r#"Feature,POINT (9 53),"{""name"":""St. \""Pauli\"""",""population"":120}""#
        );
    }

    #[tokio::test]
    async fn empty_sequence_emits_no_header() {
        let empty = stream::iter(Vec::<crate::error::Result<Feature>>::new());
        let bytes = collect_bytes(csv_rows(empty)).await;
        assert!(bytes.is_empty());
    }
}
