//! GeoJSON-model feature records.

use crate::row::Row;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as JsonValue;

/// Geometry as resolved at materialization time.
///
/// JSON-family output projects geometry to GeoJSON text inside the engine,
/// which decodes into `Decoded`; tabular output projects to WKT, which
/// stays `Raw`. The decode is best-effort and never fails — text that is
/// not JSON is passed through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Decoded(JsonValue),
    Raw(String),
}

impl Geometry {
    /// Decode geometry text, retaining the input on failure.
    pub fn decode(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Geometry::Decoded(value),
            Err(_) => Geometry::Raw(text),
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Geometry::Decoded(_))
    }
}

/// A single geometry+properties record.
///
/// Rows without a geometry value never become features; by the time a
/// `Feature` exists its geometry is present in one of the two forms.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Row,
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", "Feature")?;
        match &self.geometry {
            Geometry::Decoded(value) => map.serialize_entry("geometry", value)?,
            Geometry::Raw(text) => map.serialize_entry("geometry", text)?,
        }
        map.serialize_entry("properties", &self.properties)?;
        map.end()
    }
}
