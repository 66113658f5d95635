//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with bounded retries
//! - Title-page link discovery
//! - The LIFO crawl frontier
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod links;

pub use coordinator::Crawler;
pub use fetcher::{
    build_http_client, FetchObserver, HttpFetcher, PageSource, TracingObserver, TransientFailure,
};
pub use frontier::CrawlFrontier;
pub use links::extract_links;
