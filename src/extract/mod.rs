//! Structured extraction from title and chart pages
//!
//! Both extractors compile their CSS selectors once, from a [`MarkupConfig`],
//! and then turn raw HTML into flat records. A selector that finds nothing
//! yields an absent field; extraction itself never fails because the HTML5
//! parser recovers from any input.
//!
//! [`MarkupConfig`]: crate::config::MarkupConfig

mod detail;
mod listing;

pub use detail::{DetailExtractor, DetailRecord};
pub use listing::{ListingExtractor, ListingRecord};

use crate::ScrapeError;
use scraper::{ElementRef, Selector};

/// Compiles a CSS selector, mapping failures to [`ScrapeError::Selector`]
pub(crate) fn compile(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Concatenated descendant text of an element, trimmed
pub(crate) fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
