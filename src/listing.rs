//! Anchor extraction from media server directory listings.
//!
//! Listing pages are simple autoindex HTML; only `href` attributes of
//! `<a>` elements are looked at.

use scraper::{Html, Selector};
use std::sync::LazyLock;

static ANCHOR_HREF: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").unwrap_or_else(|e| unreachable!("invalid anchor selector: {e:?}"))
});

/// `href` values of all anchors, in page order.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    Html::parse_document(html)
        .select(&ANCHOR_HREF)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Format directories offered on a media prefix page.
///
/// Directory links end in `/`; the parent link `../` is left out.
pub fn format_list(html: &str) -> Vec<String> {
    extract_hrefs(html)
        .into_iter()
        .filter(|href| href.rfind('/').is_some_and(|pos| pos > 0))
        .map(|href| href[..href.len() - 1].to_string())
        .filter(|name| name != "..")
        .collect()
}

/// Candidate media file names on a format listing page.
pub fn media_links(html: &str) -> Vec<String> {
    extract_hrefs(html)
        .into_iter()
        .filter(|href| href.rfind('.').is_some_and(|pos| pos > 0) && href.len() > 5)
        .collect()
}
