//! Output module for persisting results
//!
//! This module handles:
//! - Writing and reading the joined dataset as CSV
//! - Rendering the background research report as markdown
//! - Printing crawl statistics

mod csv_output;
mod markdown;
pub mod stats;

pub use csv_output::{read_dataset_csv, write_dataset_csv};
pub use markdown::{format_research_report, write_research_report};
pub use stats::{print_statistics, CrawlStatistics};
