//! Title-page link discovery
//!
//! Links are found with a textual scan of the raw HTML rather than a DOM
//! walk: only anchors whose `href` points at a chart entry
//! (`/title/tt<digits>/?ref_=chtmvm_t_<digits>`) are returned.

use regex::Regex;
use std::sync::LazyLock;

static TITLE_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a[^>]+href=["'](/title/tt\d+/\?ref_=chtmvm_t_\d+)["']"#)
        .expect("hardcoded regex pattern is valid")
});

/// Returns every chart-entry href in document order, duplicates included
///
/// # Example
///
/// ```
/// use cine_scrape::crawler::extract_links;
///
/// let html = "<a href='/title/tt1234567/?ref_=chtmvm_t_5'>x</a>";
/// assert_eq!(extract_links(Some(html)), vec!["/title/tt1234567/?ref_=chtmvm_t_5"]);
/// assert!(extract_links(None).is_empty());
/// ```
pub fn extract_links(html: Option<&str>) -> Vec<String> {
    let Some(html) = html else {
        return Vec::new();
    };

    TITLE_LINK_REGEX
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
