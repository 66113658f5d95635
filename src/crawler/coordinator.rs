//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties together:
//! - The LIFO frontier and its visited set
//! - Page fetching through a [`PageSource`]
//! - Detail extraction for every fetched page
//! - Link discovery and resolution against the seed URL

use crate::crawler::fetcher::PageSource;
use crate::crawler::frontier::CrawlFrontier;
use crate::crawler::links::extract_links;
use crate::extract::{DetailExtractor, DetailRecord};
use crate::output::CrawlStatistics;
use crate::ScrapeError;
use std::time::Instant;
use url::Url;

/// Drives a depth-first crawl from a seed URL
pub struct Crawler<'a, S> {
    source: &'a S,
    extractor: &'a DetailExtractor,
    max_pages: Option<usize>,
}

impl<'a, S: PageSource> Crawler<'a, S> {
    /// Creates an unbounded crawler
    pub fn new(source: &'a S, extractor: &'a DetailExtractor) -> Self {
        Self {
            source,
            extractor,
            max_pages: None,
        }
    }

    /// Stops the crawl once `max_pages` records have been produced
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Crawls from `seed_url` and returns one record per fetched page
    ///
    /// See [`crawl_with_stats`](Self::crawl_with_stats).
    pub async fn crawl(&self, seed_url: &str) -> Result<Vec<DetailRecord>, ScrapeError> {
        self.crawl_with_stats(seed_url).await.map(|(records, _)| records)
    }

    /// Crawls from `seed_url`, returning the records and crawl counters
    ///
    /// # Loop
    ///
    /// 1. Pop the most recently discovered URL
    /// 2. Skip it if it was already fetched
    /// 3. Fetch it; a page that cannot be retrieved is skipped and *not*
    ///    marked visited, so a later duplicate gets fetched again
    /// 4. Mark it visited, extract a record, and push every discovered link
    ///    (resolved against the seed) without checking the visited set
    ///
    /// The loop ends when the worklist is empty or the page cap is reached.
    ///
    /// # Errors
    ///
    /// Fails if the seed URL does not parse or the source reports a fatal
    /// error. Pages that merely fail to download never abort the crawl.
    pub async fn crawl_with_stats(
        &self,
        seed_url: &str,
    ) -> Result<(Vec<DetailRecord>, CrawlStatistics), ScrapeError> {
        let base = Url::parse(seed_url)?;
        let mut frontier = CrawlFrontier::new(seed_url);
        let mut records = Vec::new();
        let mut stats = CrawlStatistics::default();
        let start_time = Instant::now();

        tracing::info!("Starting crawl from {}", seed_url);

        while let Some(url) = frontier.pop() {
            if self.max_pages.is_some_and(|max| records.len() >= max) {
                tracing::info!(
                    "Page limit of {} reached, {} URLs left in frontier",
                    records.len(),
                    frontier.pending() + 1
                );
                stats.stopped_at_limit = true;
                break;
            }

            if frontier.is_visited(&url) {
                stats.duplicates_skipped += 1;
                continue;
            }

            let Some(html) = self.source.fetch(&url).await? else {
                stats.fetch_failures += 1;
                continue;
            };

            frontier.mark_visited(url.clone());
            stats.pages_fetched += 1;
            records.push(self.extractor.extract(&html));

            for link in extract_links(Some(&html)) {
                match base.join(&link) {
                    Ok(absolute) => {
                        frontier.push(absolute.to_string());
                        stats.links_discovered += 1;
                    }
                    Err(e) => tracing::debug!("Failed to resolve link {}: {}", link, e),
                }
            }

            if stats.pages_fetched % 10 == 0 {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                    stats.pages_fetched,
                    frontier.pending(),
                    stats.pages_fetched as f64 / elapsed.as_secs_f64()
                );
            }
        }

        stats.records = records.len() as u64;
        stats.elapsed = start_time.elapsed();

        tracing::info!(
            "Crawl completed: {} pages crawled, {} unique URLs visited in {:?}",
            stats.pages_fetched,
            frontier.visited_count(),
            stats.elapsed
        );

        Ok((records, stats))
    }
}
