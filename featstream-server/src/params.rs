//! Query-string parameters for the feature endpoints.

use featstream_api::FilterLang;
use featstream_core::OutputFormat;
use serde::Deserialize;

/// Parameters accepted by `/features` and `/features/count`.
///
/// `limit`/`offset` are taken as raw integers and range-checked in
/// [`FeatureParams::page_bounds`] so violations surface as a 422 with a
/// message, not a bare deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureParams {
    /// Source location (e.g. a GeoParquet URL).
    pub url: String,
    /// Page size.
    pub limit: Option<i64>,
    /// Row offset before paging.
    pub offset: Option<i64>,
    /// Geometry column name.
    #[serde(rename = "geom-column", default = "default_geom_column")]
    pub geom_column: String,
    /// Attribute filter expression.
    pub filter: Option<String>,
    /// Filter dialect.
    #[serde(rename = "filter-lang", default)]
    pub filter_lang: FilterLang,
    /// Spatial filter, `xmin,ymin,xmax,ymax`.
    pub bbox: Option<String>,
    /// Output format selector.
    #[serde(rename = "f", default)]
    pub format: OutputFormat,
}

fn default_geom_column() -> String {
    "geometry".to_string()
}

impl FeatureParams {
    /// Resolve and validate `(limit, offset)` against configured bounds.
    pub fn page_bounds(&self, default_limit: u64, max_limit: u64) -> Result<(u64, u64), String> {
        let limit = match self.limit {
            None => default_limit,
            Some(l) if l >= 1 && (l as u64) <= max_limit => l as u64,
            Some(l) => {
                return Err(format!("limit must be between 1 and {max_limit}, got {l}"));
            }
        };
        let offset = match self.offset {
            None => 0,
            Some(o) if o >= 0 => o as u64,
            Some(o) => return Err(format!("offset must be non-negative, got {o}")),
        };
        Ok((limit, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>) -> FeatureParams {
        FeatureParams {
            url: "data.parquet".to_string(),
            limit,
            offset,
            geom_column: default_geom_column(),
            filter: None,
            filter_lang: FilterLang::default(),
            bbox: None,
            format: OutputFormat::default(),
        }
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(params(None, None).page_bounds(10, 10_000), Ok((10, 0)));
    }

    #[test]
    fn accepts_in_range_values() {
        assert_eq!(
            params(Some(500), Some(30)).page_bounds(10, 10_000),
            Ok((500, 30))
        );
        assert_eq!(params(Some(1), Some(0)).page_bounds(10, 10_000), Ok((1, 0)));
        assert_eq!(
            params(Some(10_000), None).page_bounds(10, 10_000),
            Ok((10_000, 0))
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(params(Some(0), None).page_bounds(10, 10_000).is_err());
        assert!(params(Some(-3), None).page_bounds(10, 10_000).is_err());
        assert!(params(Some(10_001), None).page_bounds(10, 10_000).is_err());
        assert!(params(None, Some(-1)).page_bounds(10, 10_000).is_err());
    }

    #[test]
    fn deserializes_renamed_fields() {
        let params: FeatureParams = serde_json::from_str(
            r#"{"url":"d.parquet","geom-column":"geom","filter-lang":"cql2-json","f":"csv"}"#,
        )
        .unwrap();
        assert_eq!(params.geom_column, "geom");
        assert_eq!(params.filter_lang, FilterLang::Cql2Json);
        assert_eq!(params.format, OutputFormat::Csv);
    }
}
