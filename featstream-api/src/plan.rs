//! Scan planning: projection, geometry conversion, paging.
//!
//! The count pass runs the bare predicate. The paged pass projects every
//! column except geometry verbatim and pushes geometry through a text
//! conversion *inside the engine*, so row materialization never handles
//! geometry types and the pipeline stays format-agnostic from there on.

use crate::predicate::Predicate;
use featstream_core::OutputFormat;

/// Geometry-to-text conversion applied inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryEncoding {
    /// GeoJSON text, decoded downstream for the JSON-family formats.
    GeoJson,
    /// Well-known text, passed through for tabular output.
    Wkt,
}

impl GeometryEncoding {
    /// Pick the conversion for an output format.
    pub fn for_format(format: OutputFormat) -> Self {
        if format.is_tabular() {
            GeometryEncoding::Wkt
        } else {
            GeometryEncoding::GeoJson
        }
    }

    /// SQL function evaluating the conversion.
    pub fn sql_function(self) -> &'static str {
        match self {
            GeometryEncoding::GeoJson => "ST_AsGeoJSON",
            GeometryEncoding::Wkt => "ST_AsText",
        }
    }
}

/// One paged, projected scan against a source.
#[derive(Debug, Clone)]
pub struct ScanPlan {
    pub source: String,
    pub geom_column: String,
    pub predicate: Predicate,
    pub encoding: GeometryEncoding,
    pub limit: u64,
    /// Clamped offset; the same value the response metadata reports.
    pub offset: u64,
}

impl ScanPlan {
    pub fn new(
        source: String,
        geom_column: String,
        predicate: Predicate,
        format: OutputFormat,
        limit: u64,
        offset: u64,
    ) -> Self {
        Self {
            source,
            geom_column,
            predicate,
            encoding: GeometryEncoding::for_format(format),
            limit,
            offset,
        }
    }

    /// Select list: geometry converted to text, every other column
    /// verbatim.
    pub fn projection(&self) -> String {
        let column = quote_ident(&self.geom_column);
        format!(
            "{func}({column}) AS {column}, * EXCLUDE ({column})",
            func = self.encoding.sql_function(),
        )
    }
}

/// Double-quote an identifier, escaping embedded quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(format: OutputFormat) -> ScanPlan {
        ScanPlan::new(
            "s3://data/places.parquet".to_string(),
            "geometry".to_string(),
            Predicate::new(),
            format,
            10,
            0,
        )
    }

    #[test]
    fn json_formats_project_geojson_text() {
        for format in [
            OutputFormat::Geojson,
            OutputFormat::Geojsonseq,
            OutputFormat::Ndjson,
        ] {
            assert_eq!(
                plan(format).projection(),
                "ST_AsGeoJSON(\"geometry\") AS \"geometry\", * EXCLUDE (\"geometry\")"
            );
        }
    }

    #[test]
    fn csv_projects_wkt() {
        assert_eq!(
            plan(OutputFormat::Csv).projection(),
            "ST_AsText(\"geometry\") AS \"geometry\", * EXCLUDE (\"geometry\")"
        );
    }

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("geom"), "\"geom\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
