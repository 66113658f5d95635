//! Title page extraction
//!
//! A title page yields one [`DetailRecord`]: original title, display title,
//! rating, up to three genres and the director.

use crate::config::MarkupConfig;
use crate::extract::{compile, stripped_text};
use crate::ScrapeError;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static ORIGINAL_TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Original title: (.+)").expect("hardcoded regex pattern is valid")
});

/// Fields scraped from a single title page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub original_title: Option<String>,
    pub title: Option<String>,
    pub rating: Option<String>,
    pub genre1: Option<String>,
    pub genre2: Option<String>,
    pub genre3: Option<String>,
    pub director: Option<String>,
}

/// Extracts [`DetailRecord`]s using precompiled selectors
#[derive(Debug, Clone)]
pub struct DetailExtractor {
    original_title: Selector,
    title: Selector,
    rating: Selector,
    genre_list: Selector,
    genre_chip: Selector,
    chip_label: Selector,
    director: Selector,
}

impl DetailExtractor {
    /// Compiles the title-page selectors from the markup configuration
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Selector`] if any selector fails to parse.
    pub fn new(markup: &MarkupConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            original_title: compile(&markup.original_title)?,
            title: compile(&markup.title)?,
            rating: compile(&markup.rating)?,
            genre_list: compile(&markup.genre_list)?,
            genre_chip: compile(&markup.genre_chip)?,
            chip_label: compile("span")?,
            director: compile(&markup.director)?,
        })
    }

    /// Parses a title page into a [`DetailRecord`]
    ///
    /// Every field whose element cannot be found is `None`; this never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use cine_scrape::config::MarkupConfig;
    /// use cine_scrape::extract::DetailExtractor;
    ///
    /// let extractor = DetailExtractor::new(&MarkupConfig::default()).unwrap();
    /// let html = r#"<span class="hero__primary-text"> Dune </span>"#;
    /// let record = extractor.extract(html);
    /// assert_eq!(record.title.as_deref(), Some("Dune"));
    /// assert_eq!(record.director, None);
    /// ```
    pub fn extract(&self, html: &str) -> DetailRecord {
        let document = Html::parse_document(html);

        let original_title = self.first_text(&document, &self.original_title).and_then(|raw| {
            ORIGINAL_TITLE_REGEX
                .captures(&raw)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        });

        let mut genres = self.genres(&document).into_iter();

        DetailRecord {
            original_title,
            title: self.first_text(&document, &self.title),
            rating: self.first_text(&document, &self.rating),
            genre1: genres.next(),
            genre2: genres.next(),
            genre3: genres.next(),
            director: self.first_text(&document, &self.director),
        }
    }

    /// Stripped text of the first element matching `selector`
    fn first_text(&self, document: &Html, selector: &Selector) -> Option<String> {
        document.select(selector).next().map(stripped_text)
    }

    /// Genre chip labels inside the first genre container, in document order
    fn genres(&self, document: &Html) -> Vec<String> {
        let Some(container) = document.select(&self.genre_list).next() else {
            return Vec::new();
        };

        container
            .select(&self.genre_chip)
            .map(|chip| match chip.select(&self.chip_label).next() {
                Some(label) => stripped_text(label),
                None => stripped_text(chip),
            })
            .collect()
    }
}
