//! Crawl frontier: a LIFO worklist plus a visited set
//!
//! The worklist may hold the same URL many times. Duplicates are only
//! filtered when popped, and a URL counts as visited only once it has been
//! fetched successfully.

use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct CrawlFrontier {
    worklist: Vec<String>,
    visited: HashSet<String>,
}

impl CrawlFrontier {
    /// Creates a frontier holding only the seed
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            worklist: vec![seed.into()],
            visited: HashSet::new(),
        }
    }

    /// Removes the most recently pushed URL
    pub fn pop(&mut self) -> Option<String> {
        self.worklist.pop()
    }

    /// Pushes without consulting the visited set
    pub fn push(&mut self, url: String) {
        self.worklist.push(url);
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn mark_visited(&mut self, url: String) {
        self.visited.insert(url);
    }

    /// Number of entries waiting in the worklist, duplicates included
    pub fn pending(&self) -> usize {
        self.worklist.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
