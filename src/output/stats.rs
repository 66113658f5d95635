//! Crawl statistics
//!
//! Counters collected by the crawl loop and printed once a run finishes.

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Pages downloaded successfully
    pub pages_fetched: u64,

    /// Pops that ended without a page after all retries
    pub fetch_failures: u64,

    /// Pops skipped because the URL had already been fetched
    pub duplicates_skipped: u64,

    /// Links pushed onto the frontier
    pub links_discovered: u64,

    /// Detail records produced
    pub records: u64,

    /// Whether the crawl ended on the page cap rather than an empty frontier
    pub stopped_at_limit: bool,

    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Share of fetch attempts (per pop) that produced a page, in percent
    pub fn success_rate(&self) -> f64 {
        let attempts = self.pages_fetched + self.fetch_failures;
        if attempts == 0 {
            return 0.0;
        }
        (self.pages_fetched as f64 / attempts as f64) * 100.0
    }
}

/// Prints crawl and dataset statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics, listing_rows: usize, dataset_rows: usize) {
    println!("=== Cine-Scrape Statistics ===\n");

    println!("Crawl:");
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Fetch failures: {}", stats.fetch_failures);
    println!("  Duplicates skipped: {}", stats.duplicates_skipped);
    println!("  Links discovered: {}", stats.links_discovered);
    println!("  Success rate: {:.2}%", stats.success_rate());
    println!("  Elapsed: {:.2}s", stats.elapsed.as_secs_f64());
    if stats.stopped_at_limit {
        println!("  Stopped at page limit");
    }

    println!("\nDataset:");
    println!("  Detail records: {}", stats.records);
    println!("  Listing records: {}", listing_rows);
    println!("  Joined rows: {}", dataset_rows);
}
