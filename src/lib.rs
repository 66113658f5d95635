//! Cine-Scrape: a movie chart harvester
//!
//! This crate crawls a movie chart page, follows links to the individual title
//! pages, extracts their metadata and joins everything into a tabular dataset.
//! A secondary research pass documents the target site (robots.txt,
//! technologies, domain registration).

pub mod config;
pub mod crawler;
pub mod dataset;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod research;
pub mod robots;

use thiserror::Error;

/// Main error type for Cine-Scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid CSS selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Seed page could not be downloaded: {url}")]
    SeedUnavailable { url: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Cine-Scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{extract_links, Crawler, HttpFetcher, PageSource};
pub use dataset::{build_dataset, inner_join, Dataset, DatasetRow};
pub use extract::{DetailExtractor, DetailRecord, ListingExtractor, ListingRecord};
