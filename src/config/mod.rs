//! Configuration module for Cine-Scrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use cine_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("cine-scrape.toml")).unwrap();
//! println!("Crawl starts at: {}", config.scraper.seed_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ListingMode, MarkupConfig, OutputConfig, ResearchConfig, ScraperConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
