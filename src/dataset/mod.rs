//! Dataset assembly
//!
//! Joins the records crawled from title pages with the rows listed on the
//! chart page. The join is an inner join on the title string: titles present
//! on only one side are dropped, and repeated titles produce every pairing.

use crate::config::Config;
use crate::crawler::{Crawler, PageSource};
use crate::extract::{DetailExtractor, DetailRecord, ListingExtractor, ListingRecord};
use crate::output::{self, CrawlStatistics};
use crate::ScrapeError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Column order of the persisted dataset
pub const COLUMNS: [&str; 11] = [
    "original_title",
    "title",
    "rating",
    "genre1",
    "genre2",
    "genre3",
    "director",
    "year",
    "duration",
    "classification",
    "ranking",
];

/// One joined row; field order is the CSV column order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub original_title: Option<String>,
    pub title: String,
    pub rating: Option<String>,
    pub genre1: Option<String>,
    pub genre2: Option<String>,
    pub genre3: Option<String>,
    pub director: Option<String>,
    pub year: Option<String>,
    pub duration: Option<String>,
    pub classification: Option<String>,
    pub ranking: Option<String>,
}

impl DatasetRow {
    fn joined(detail: &DetailRecord, listing: &ListingRecord) -> Self {
        Self {
            original_title: detail.original_title.clone(),
            title: listing.title.clone(),
            rating: detail.rating.clone(),
            genre1: detail.genre1.clone(),
            genre2: detail.genre2.clone(),
            genre3: detail.genre3.clone(),
            director: detail.director.clone(),
            year: listing.year.clone(),
            duration: listing.duration.clone(),
            classification: listing.classification.clone(),
            ranking: listing.ranking.clone(),
        }
    }
}

/// The joined table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the dataset as CSV, creating parent directories as needed
    pub fn write_csv(&self, path: &Path) -> Result<(), ScrapeError> {
        output::write_dataset_csv(&self.rows, path)
    }

    /// Reads a dataset previously written by [`write_csv`](Self::write_csv)
    pub fn read_csv(path: &Path) -> Result<Self, ScrapeError> {
        Ok(Self {
            rows: output::read_dataset_csv(path)?,
        })
    }
}

/// Inner join of detail and listing records on `title`
///
/// Rows follow detail order; for each detail record, matching listing
/// records follow listing order. A detail record without a title never
/// matches.
///
/// # Example
///
/// ```
/// use cine_scrape::{inner_join, DetailRecord, ListingRecord};
///
/// let details = vec![DetailRecord { title: Some("A".into()), ..Default::default() }];
/// let listings = vec![
///     ListingRecord { title: "A".into(), ..Default::default() },
///     ListingRecord { title: "B".into(), ..Default::default() },
/// ];
/// let dataset = inner_join(&details, &listings);
/// assert_eq!(dataset.len(), 1);
/// assert_eq!(dataset.rows[0].title, "A");
/// ```
pub fn inner_join(details: &[DetailRecord], listings: &[ListingRecord]) -> Dataset {
    let mut by_title: HashMap<&str, Vec<&ListingRecord>> = HashMap::new();
    for listing in listings {
        by_title.entry(listing.title.as_str()).or_default().push(listing);
    }

    let rows = details
        .iter()
        .filter_map(|detail| {
            let title = detail.title.as_deref()?;
            let matches = by_title.get(title)?;
            Some(matches.iter().map(move |listing| DatasetRow::joined(detail, listing)))
        })
        .flatten()
        .collect();

    Dataset { rows }
}

/// Everything produced by one [`build_dataset`] run
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub dataset: Dataset,
    pub crawl: CrawlStatistics,
    pub listing_records: usize,
}

/// Crawls the seed, re-reads the chart and joins both sides
///
/// The chart page is downloaded a second time, independently of the crawl.
///
/// # Errors
///
/// * [`ScrapeError::Selector`] - a markup selector does not compile
/// * [`ScrapeError::SeedUnavailable`] - the chart could not be downloaded
///   for listing extraction
/// * Any fatal error raised by the crawl
pub async fn build_dataset<S: PageSource>(
    source: &S,
    config: &Config,
) -> Result<BuildOutcome, ScrapeError> {
    let seed_url = config.scraper.seed_url.as_str();
    let detail_extractor = DetailExtractor::new(&config.markup)?;
    let listing_extractor = ListingExtractor::new(&config.markup, config.scraper.listing_mode)?;

    let (details, crawl) = Crawler::new(source, &detail_extractor)
        .with_max_pages(config.scraper.max_pages)
        .crawl_with_stats(seed_url)
        .await?;
    tracing::info!("Collected {} detail records", details.len());

    let chart = source
        .fetch(seed_url)
        .await?
        .ok_or_else(|| ScrapeError::SeedUnavailable {
            url: seed_url.to_string(),
        })?;
    let listings = listing_extractor.extract(&chart);
    tracing::info!("Collected {} listing records", listings.len());

    let dataset = inner_join(&details, &listings);
    tracing::info!("Joined dataset has {} rows", dataset.len());

    Ok(BuildOutcome {
        dataset,
        crawl,
        listing_records: listings.len(),
    })
}
