//! Navigation link construction.
//!
//! Hrefs reuse the request URI, swapping only the `offset` query
//! parameter, so each link replays the exact query it navigates within.

use axum::http::Uri;
use featstream_core::{Link, LinkRel, MediaType, Page};

/// Build `self`/`next`/`prev` links for one page of results.
pub fn build_links(uri: &Uri, page: &Page, media_type: MediaType) -> Vec<Link> {
    let mut links = vec![Link {
        title: Some("This document".to_string()),
        rel: LinkRel::SelfRel,
        href: uri.to_string(),
        media_type,
    }];

    if let Some(next) = page.next_offset() {
        links.push(Link {
            title: Some("Next page".to_string()),
            rel: LinkRel::Next,
            href: with_offset(uri, next),
            media_type,
        });
    }
    if let Some(prev) = page.prev_offset() {
        links.push(Link {
            title: Some("Previous page".to_string()),
            rel: LinkRel::Prev,
            href: with_offset(uri, prev),
            media_type,
        });
    }

    links
}

/// Rebuild the URI with `offset` replaced (or appended).
fn with_offset(uri: &Uri, offset: u64) -> String {
    let mut parts: Vec<String> = uri
        .query()
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty() && !pair.starts_with("offset="))
        .map(str::to_string)
        .collect();
    parts.push(format!("offset={offset}"));
    format!("{}?{}", uri.path(), parts.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn replaces_existing_offset() {
        let uri = uri("/features?url=d.parquet&offset=20&limit=10");
        assert_eq!(
            with_offset(&uri, 30),
            "/features?url=d.parquet&limit=10&offset=30"
        );
    }

    #[test]
    fn appends_offset_when_absent() {
        let uri = uri("/features?url=d.parquet");
        assert_eq!(with_offset(&uri, 10), "/features?url=d.parquet&offset=10");
    }

    #[test]
    fn first_page_has_self_and_next_only() {
        let page = Page::clamp(100, 10, 0);
        let links = build_links(
            &uri("/features?url=d.parquet"),
            &page,
            MediaType::GeoJson,
        );
        let rels: Vec<LinkRel> = links.iter().map(|l| l.rel).collect();
        assert_eq!(rels, [LinkRel::SelfRel, LinkRel::Next]);
        assert_eq!(links[1].href, "/features?url=d.parquet&offset=10");
    }

    #[test]
    fn middle_page_has_all_three() {
        let page = Page::clamp(100, 10, 40);
        let links = build_links(
            &uri("/features?url=d.parquet&offset=40"),
            &page,
            MediaType::GeoJson,
        );
        let rels: Vec<LinkRel> = links.iter().map(|l| l.rel).collect();
        assert_eq!(rels, [LinkRel::SelfRel, LinkRel::Next, LinkRel::Prev]);
        assert_eq!(links[1].href, "/features?url=d.parquet&offset=50");
        assert_eq!(links[2].href, "/features?url=d.parquet&offset=30");
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Page::clamp(100, 10, 90);
        let links = build_links(
            &uri("/features?url=d.parquet&offset=90"),
            &page,
            MediaType::GeoJson,
        );
        let rels: Vec<LinkRel> = links.iter().map(|l| l.rel).collect();
        assert_eq!(rels, [LinkRel::SelfRel, LinkRel::Prev]);
    }
}
