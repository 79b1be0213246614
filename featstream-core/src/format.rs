//! Output formats and media types.

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

/// Response media types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Json,
    NdJson,
    GeoJson,
    GeoJsonSeq,
    Csv,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Json => "application/json",
            MediaType::NdJson => "application/ndjson",
            MediaType::GeoJson => "application/geo+json",
            MediaType::GeoJsonSeq => "application/geo+json-seq",
            MediaType::Csv => "text/csv",
        }
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Selectable output format (the `f` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Geojson,
    Geojsonseq,
    Ndjson,
    Csv,
}

impl OutputFormat {
    pub fn media_type(self) -> MediaType {
        match self {
            OutputFormat::Geojson => MediaType::GeoJson,
            OutputFormat::Geojsonseq => MediaType::GeoJsonSeq,
            OutputFormat::Ndjson => MediaType::NdJson,
            OutputFormat::Csv => MediaType::Csv,
        }
    }

    /// Tabular formats take geometry as WKT instead of GeoJSON text.
    pub fn is_tabular(self) -> bool {
        matches!(self, OutputFormat::Csv)
    }
}
