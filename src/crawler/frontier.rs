//! Crawl frontier
//!
//! Pages are crawled level by level: every page at depth `d` is fetched
//! before any page at depth `d + 1`. Each URL is claimed at most once per
//! crawl; the claim is a single check-and-insert on the visited set.

use std::collections::HashSet;
use url::Url;

/// A page waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// Absolute URL without fragment
    pub url: Url,
    /// Link hops from the seed
    pub depth: u32,
}

/// Visited set plus the queue of pages for the next level
#[derive(Debug)]
pub struct Frontier {
    max_depth: u32,
    visited: HashSet<String>,
    pending: Vec<QueuedUrl>,
}

impl Frontier {
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            visited: HashSet::new(),
            pending: Vec::new(),
        }
    }

    /// Queues `url` at `depth` unless it is too deep or already claimed
    ///
    /// Returns true when the URL was queued.
    pub fn push(&mut self, url: Url, depth: u32) -> bool {
        if depth > self.max_depth {
            return false;
        }
        if !self.visited.insert(url.as_str().to_string()) {
            return false;
        }
        self.pending.push(QueuedUrl { url, depth });
        true
    }

    /// Takes every queued page; empty once the crawl is exhausted
    pub fn next_level(&mut self) -> Vec<QueuedUrl> {
        std::mem::take(&mut self.pending)
    }

    #[cfg(test)]
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of URLs claimed so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
