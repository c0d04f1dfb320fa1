//! Crawler module for site traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and HEAD/GET link probing
//! - The level-ordered frontier with visited-set deduplication
//! - Search and dead-link evaluation of each page's anchors
//! - Overall crawl coordination

mod coordinator;
mod events;
mod fetcher;
mod frontier;
mod prober;
mod results;
#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::Crawler;
pub use events::{CrawlEvent, PageFailure, SkipReason};
pub use fetcher::{build_http_client, FetchedPage, HttpTransport, Transport};
pub use frontier::{Frontier, QueuedUrl};
pub use prober::{probe_uncached, Prober, StatusCache, DEAD_STATUS_THRESHOLD, UNREACHABLE_STATUS};
pub use results::{CrawlMode, CrawlReport, CrawlRequest, DeadLink, SearchMatch};

use crate::config::CrawlerConfig;
use crate::SleuthError;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for a one-off crawl. It builds an HTTP
/// client from `config` and returns every result the crawl found.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `request` - Seed URL, depth bound and mode
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl ran to completion
/// * `Err(SleuthError)` - The HTTP client could not be built
pub async fn crawl(config: &CrawlerConfig, request: &CrawlRequest) -> Result<CrawlReport, SleuthError> {
    let crawler = Crawler::http(config)?;
    Ok(crawler.crawl(request).await)
}
