//! WHERE-clause composition.
//!
//! A predicate is an ordered conjunction of clauses plus the positional
//! parameter list for whatever placeholders those clauses carry. Clause
//! text only ever comes from trusted producers: the bbox clause inlines
//! validated floats, and filter text arrives already escaped and
//! parameterized from the filter parser. Raw user input is never spliced
//! in here.

use crate::error::Result;
use crate::filter::{FilterLang, FilterParser};
use featstream_core::BBox;

/// Conjunction of filter clauses with positionally aligned parameters.
///
/// Parameters are appended in clause order; reordering clauses would
/// require reordering parameters identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<String>,
    params: Vec<String>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the bbox overlap clause (carries no parameters).
    pub fn push_bbox(&mut self, bbox: &BBox) {
        self.clauses.push(bbox.overlap_clause());
    }

    /// Append a clause together with its bound parameters.
    pub fn push_clause(&mut self, clause: impl Into<String>, params: Vec<String>) {
        self.clauses.push(clause.into());
        self.params.extend(params);
    }

    /// True when no clauses are present: every row matches.
    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Bound parameter values, in placeholder order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The conjunction as WHERE-clause text, or `None` for match-all.
    pub fn where_clause(&self) -> Option<String> {
        if self.clauses.is_empty() {
            None
        } else {
            Some(self.clauses.join(" AND "))
        }
    }
}

/// Build the predicate for one request from its optional spatial and
/// attribute filters.
pub fn build(
    bbox: Option<&BBox>,
    filter: Option<(&str, FilterLang)>,
    parser: &dyn FilterParser,
) -> Result<Predicate> {
    let mut predicate = Predicate::new();
    if let Some(bbox) = bbox {
        predicate.push_bbox(bbox);
    }
    if let Some((text, lang)) = filter {
        let parsed = parser.parse(text, lang)?;
        predicate.push_clause(parsed.fragment, parsed.params);
    }
    Ok(predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterSyntaxError, SqlFilter};

    /// Parser stub returning a fixed fragment, or rejecting everything.
    struct FixedParser(Option<SqlFilter>);

    impl FilterParser for FixedParser {
        fn parse(
            &self,
            _input: &str,
            _lang: FilterLang,
        ) -> std::result::Result<SqlFilter, FilterSyntaxError> {
            self.0
                .clone()
                .ok_or_else(|| FilterSyntaxError("unexpected token".to_string()))
        }
    }

    #[test]
    fn empty_predicate_matches_all() {
        let predicate = build(None, None, &FixedParser(None)).unwrap();
        assert!(predicate.is_match_all());
        assert_eq!(predicate.where_clause(), None);
        assert!(predicate.params().is_empty());
    }

    #[test]
    fn bbox_and_filter_join_with_and() {
        let bbox = BBox::new(0.0, 1.0, 2.0, 3.0);
        let parser = FixedParser(Some(SqlFilter {
            fragment: "(\"name\" = $1)".to_string(),
            params: vec!["Berlin".to_string()],
        }));
        let predicate = build(Some(&bbox), Some(("ignored", FilterLang::Cql2Text)), &parser).unwrap();

        let clause = predicate.where_clause().unwrap();
        assert_eq!(
            clause,
            "bbox.xmax >= 0 AND bbox.xmin <= 2 AND bbox.ymax >= 1 AND bbox.ymin <= 3 AND (\"name\" = $1)"
        );
        assert_eq!(predicate.params(), ["Berlin".to_string()]);
    }

    #[test]
    fn parser_rejection_propagates() {
        let err = build(None, Some(("???", FilterLang::Cql2Text)), &FixedParser(None))
            .unwrap_err();
        assert!(err.to_string().contains("unexpected token"));
    }
}
