//! Pagination math and navigation metadata.

use crate::format::MediaType;
use serde::Serialize;

/// Pagination facts for one request.
///
/// The clamped `offset` is computed once, before the paged scan runs, and
/// the same value feeds both the scan and the reported metadata so the two
/// can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Rows matching the predicate, from the count pass.
    pub total: u64,
    /// Requested page size.
    pub limit: u64,
    /// Offset as requested by the caller, before clamping.
    pub requested_offset: u64,
    /// Offset actually used, clamped into `[0, max(total - limit, 0)]`.
    pub offset: u64,
}

impl Page {
    pub fn clamp(total: u64, limit: u64, requested_offset: u64) -> Self {
        let offset = requested_offset.min(total.saturating_sub(limit));
        Self {
            total,
            limit,
            requested_offset,
            offset,
        }
    }

    /// Offset of the following page, when one exists.
    pub fn next_offset(&self) -> Option<u64> {
        (self.offset + self.limit < self.total).then(|| self.offset + self.limit)
    }

    /// Offset of the preceding page. Present whenever the caller asked for
    /// a non-zero offset, even if clamping pulled the page back.
    pub fn prev_offset(&self) -> Option<u64> {
        (self.requested_offset > 0).then(|| self.offset.saturating_sub(self.limit))
    }
}

/// Link relation for pagination navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRel {
    #[serde(rename = "self")]
    SelfRel,
    Next,
    Prev,
}

/// Navigation link reported in FeatureCollection metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub rel: LinkRel,
    pub href: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_offset_into_valid_window() {
        // offset past the end pulls back to the last page
        let page = Page::clamp(100, 10, 500);
        assert_eq!(page.offset, 90);
        assert_eq!(page.requested_offset, 500);

        // within range stays put
        assert_eq!(Page::clamp(100, 10, 40).offset, 40);

        // limit larger than total clamps to zero
        assert_eq!(Page::clamp(5, 10, 3).offset, 0);

        // empty result set clamps to zero
        assert_eq!(Page::clamp(0, 10, 7).offset, 0);
    }

    #[test]
    fn clamped_offset_stays_in_bounds() {
        for total in [0u64, 1, 9, 10, 11, 100] {
            for limit in [1u64, 5, 10, 50] {
                for requested in [0u64, 1, 10, 99, 10_000] {
                    let page = Page::clamp(total, limit, requested);
                    assert_eq!(
                        page.offset,
                        requested.min(total.saturating_sub(limit)),
                        "total={total} limit={limit} requested={requested}"
                    );
                    if total > 0 {
                        assert!(page.offset < total);
                    } else {
                        assert_eq!(page.offset, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn next_present_only_when_rows_remain() {
        assert_eq!(Page::clamp(100, 10, 0).next_offset(), Some(10));
        assert_eq!(Page::clamp(100, 10, 90).next_offset(), None);
        assert_eq!(Page::clamp(5, 10, 0).next_offset(), None);
        assert_eq!(Page::clamp(0, 10, 0).next_offset(), None);
    }

    #[test]
    fn prev_follows_requested_offset() {
        // no prev from the start
        assert_eq!(Page::clamp(100, 10, 0).prev_offset(), None);

        // one page back
        assert_eq!(Page::clamp(100, 10, 30).prev_offset(), Some(20));

        // floors at zero
        assert_eq!(Page::clamp(100, 10, 5).prev_offset(), Some(0));

        // a clamped-out-of-range request still gets a prev link
        let page = Page::clamp(10, 10, 50);
        assert_eq!(page.offset, 0);
        assert_eq!(page.prev_offset(), Some(0));
    }

    #[test]
    fn link_serializes_rel_and_media_type() {
        let link = Link {
            title: Some("Next page".to_string()),
            rel: LinkRel::Next,
            href: "/features?offset=10".to_string(),
            media_type: MediaType::GeoJson,
        };
        assert_eq!(
            serde_json::to_string(&link).unwrap(),
            r#"{"title":"Next page","rel":"next","href":"/features?offset=10","type":"application/geo+json"}"#
        );
    }
}
