//! Chart page extraction
//!
//! The chart lists one row per title with its year, duration, classification
//! and ranking. Rows are normally read in a single structural pass: each
//! field is looked up inside the row container it belongs to. Pages without
//! row containers fall back to positional pairing, which zips three
//! document-wide element lists together by index.

use crate::config::{ListingMode, MarkupConfig};
use crate::extract::{compile, stripped_text};
use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// One title as presented on the chart page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    pub year: Option<String>,
    pub duration: Option<String>,
    pub classification: Option<String>,
    pub ranking: Option<String>,
}

/// Extracts [`ListingRecord`]s from a chart page
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    row: Selector,
    name: Selector,
    metadata_group: Selector,
    metadata_item: Selector,
    ranking: Selector,
    ranking_attribute: String,
    mode: ListingMode,
}

impl ListingExtractor {
    /// Compiles the chart-page selectors
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Selector`] if any selector fails to parse.
    pub fn new(markup: &MarkupConfig, mode: ListingMode) -> Result<Self, ScrapeError> {
        Ok(Self {
            row: compile(&markup.listing_row)?,
            name: compile(&markup.listing_name)?,
            metadata_group: compile(&markup.metadata_group)?,
            metadata_item: compile(&markup.metadata_item)?,
            ranking: compile(&markup.ranking)?,
            ranking_attribute: markup.ranking_attribute.clone(),
            mode,
        })
    }

    /// Parses a chart page into one record per listed title, in page order
    pub fn extract(&self, html: &str) -> Vec<ListingRecord> {
        let document = Html::parse_document(html);

        match self.mode {
            ListingMode::Structural => {
                let rows: Vec<ElementRef<'_>> = document.select(&self.row).collect();
                if rows.is_empty() {
                    tracing::debug!("No listing rows found, falling back to positional pairing");
                    return self.extract_positional(&document);
                }
                rows.into_iter()
                    .filter_map(|row| self.extract_row(row))
                    .collect()
            }
            ListingMode::Positional => self.extract_positional(&document),
        }
    }

    /// Reads one row container; rows without a name element are skipped
    fn extract_row(&self, row: ElementRef<'_>) -> Option<ListingRecord> {
        let name = row.select(&self.name).next()?;
        let metadata = row.select(&self.metadata_group).next();
        let ranking = row.select(&self.ranking).next();
        Some(self.build_record(name, metadata, ranking))
    }

    /// Zips names (minus the leading header), metadata groups and ranking
    /// badges by position, stopping at the shortest list
    fn extract_positional(&self, document: &Html) -> Vec<ListingRecord> {
        let names = document.select(&self.name).skip(1);
        let metadata = document.select(&self.metadata_group);
        let rankings = document.select(&self.ranking);

        names
            .zip(metadata)
            .zip(rankings)
            .map(|((name, metadata), ranking)| self.build_record(name, Some(metadata), Some(ranking)))
            .collect()
    }

    fn build_record(
        &self,
        name: ElementRef<'_>,
        metadata: Option<ElementRef<'_>>,
        ranking: Option<ElementRef<'_>>,
    ) -> ListingRecord {
        let (year, duration, classification) = match metadata.map(|m| self.metadata_items(m)) {
            Some(items) => match <[String; 3]>::try_from(items) {
                Ok([year, duration, classification]) => {
                    (Some(year), Some(duration), Some(classification))
                }
                Err(_) => (None, None, None),
            },
            None => (None, None, None),
        };

        let ranking = ranking
            .and_then(|r| r.value().attr(&self.ranking_attribute))
            .filter(|label| !label.trim().is_empty())
            .and_then(parse_ranking);

        ListingRecord {
            title: stripped_text(name),
            year,
            duration,
            classification,
            ranking,
        }
    }

    fn metadata_items(&self, group: ElementRef<'_>) -> Vec<String> {
        group.select(&self.metadata_item).map(stripped_text).collect()
    }
}

/// Takes the text after the last `:` of an accessibility label
///
/// `"Current ranking: 12"` becomes `"12"`; a label without a colon is
/// returned stripped.
fn parse_ranking(label: &str) -> Option<String> {
    label.rsplit(':').next().map(|last| last.trim().to_string())
}
