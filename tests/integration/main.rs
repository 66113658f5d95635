//! Integration tests for Cine-Scrape
//!
//! These tests run against wiremock servers standing in for the chart site.

mod crawl_tests;
mod research_tests;
