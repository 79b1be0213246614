//! Attribute-filter parsing capability.
//!
//! Filter expressions arrive as opaque CQL2 text or CQL2 JSON. The
//! pipeline never interprets them itself: a parser turns the expression
//! into an escaped SQL fragment plus positional parameter values, and only
//! that fragment reaches the predicate.

use serde::Deserialize;
use thiserror::Error;

/// Filter surface syntax selector (the `filter-lang` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum FilterLang {
    #[default]
    #[serde(rename = "cql2-text")]
    Cql2Text,
    #[serde(rename = "cql2-json")]
    Cql2Json,
}

/// A parsed filter: SQL fragment with `$n` placeholders plus the values
/// bound to them, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFilter {
    pub fragment: String,
    pub params: Vec<String>,
}

/// Parser rejection, carrying the underlying message for the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FilterSyntaxError(pub String);

/// Filter-parse capability.
pub trait FilterParser: Send + Sync {
    /// Parse `input` in the given dialect into a SQL fragment and bound
    /// parameter values.
    fn parse(&self, input: &str, lang: FilterLang) -> Result<SqlFilter, FilterSyntaxError>;
}

/// CQL2 parser covering both the text and JSON encodings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cql2Parser;

impl FilterParser for Cql2Parser {
    fn parse(&self, input: &str, lang: FilterLang) -> Result<SqlFilter, FilterSyntaxError> {
        let expr = match lang {
            FilterLang::Cql2Text => input.parse::<cql2::Expr>().map_err(reject)?,
            FilterLang::Cql2Json => serde_json::from_str::<cql2::Expr>(input)
                .map_err(|e| FilterSyntaxError(e.to_string()))?,
        };
        let sql = expr.to_sql().map_err(reject)?;
        Ok(SqlFilter {
            fragment: sql.query,
            params: sql.params,
        })
    }
}

fn reject(e: cql2::Error) -> FilterSyntaxError {
    tracing::debug!(error = %e, "filter expression rejected");
    FilterSyntaxError(e.to_string())
}
