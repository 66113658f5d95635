//! Robots.txt handling module
//!
//! Fetches and interprets the target site's robots.txt for the research
//! report.

mod parser;

pub use parser::ParsedRobots;

use reqwest::Client;
use url::Url;

/// Location of robots.txt for the host serving `page`
pub fn robots_url(page: &Url) -> Option<Url> {
    page.join("/robots.txt").ok()
}

/// Fetches robots.txt for the site hosting `page`
///
/// # Returns
///
/// * `Some(ParsedRobots)` - The file was downloaded with a success status
/// * `None` - Network error, non-success status or unreadable body; the
///   failure is logged at warn level
pub async fn fetch_robots(client: &Client, page: &Url) -> Option<ParsedRobots> {
    let url = robots_url(page)?;
    tracing::debug!("Fetching robots.txt from {}", url);

    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", url, e);
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::warn!("Fetching {} returned HTTP {}", url, response.status());
        return None;
    }

    match response.text().await {
        Ok(body) => Some(ParsedRobots::from_content(&body)),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", url, e);
            None
        }
    }
}
