//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives a crawl from its seed URL:
//! - Managing the level-ordered frontier
//! - Fetching each level's pages with bounded concurrency
//! - Walking parsed pages for anchors and text
//! - Evaluating anchors against the search or dead-link policy
//!
//! A crawl never fails as a whole. Fetch, status and parse failures abandon
//! the affected branch and are reported through `tracing` and the optional
//! event channel.

use crate::config::CrawlerConfig;
use crate::crawler::events::{CrawlEvent, EventSink, PageFailure, SkipReason};
use crate::crawler::frontier::{Frontier, QueuedUrl};
use crate::crawler::prober::{Prober, DEAD_STATUS_THRESHOLD};
use crate::crawler::results::{CrawlMode, CrawlReport, CrawlRequest, DeadLink, SearchMatch};
use crate::crawler::{HttpTransport, Transport};
use crate::dom::{parse_html, truncate, Document, Visit, MAX_MATCH_LEN};
use crate::url::{navigable_target, same_host_url};
use futures::future;
use futures::stream::{self, Stream, StreamExt};
use std::collections::HashSet;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// A fetched and parsed page
struct LoadedPage {
    url: Url,
    depth: u32,
    document: Document,
}

/// A same-host link found on a page, waiting for its status
struct PendingLink {
    source_url: String,
    target: Url,
    depth: u32,
}

/// Main crawler structure
///
/// Holds no per-crawl state: the visited set, status cache and results live
/// inside a single [`Crawler::crawl`] call, so one crawler can run many
/// independent crawls.
pub struct Crawler<T> {
    transport: T,
    max_concurrent_requests: usize,
    events: EventSink,
}

impl Crawler<HttpTransport> {
    /// Creates a crawler that talks HTTP with a client built from `config`
    pub fn http(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(HttpTransport::new(config)?, config))
    }
}

impl<T: Transport> Crawler<T> {
    /// Creates a crawler over `transport`
    ///
    /// # Arguments
    ///
    /// * `transport` - Network access for page fetches and link probes
    /// * `config` - Supplies the concurrency bound
    pub fn new(transport: T, config: &CrawlerConfig) -> Self {
        Self {
            transport,
            max_concurrent_requests: config.max_concurrent_requests.max(1),
            events: EventSink::default(),
        }
    }

    /// Sends a [`CrawlEvent`] to `sender` for everything the crawl does
    pub fn with_events(mut self, sender: UnboundedSender<CrawlEvent>) -> Self {
        self.events = EventSink::new(sender);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs one crawl to completion
    ///
    /// A seed URL that does not parse, or a search term that is empty after
    /// trimming, yields an empty report without touching the network.
    pub async fn crawl(&self, request: &CrawlRequest) -> CrawlReport {
        let seed = match Url::parse(&request.base_url) {
            Ok(seed) => seed,
            Err(e) => {
                tracing::warn!("Invalid seed URL {}: {}", request.base_url, e);
                return CrawlReport::empty(&request.mode);
            }
        };

        tracing::info!(
            "Starting crawl of {} (max depth {})",
            seed,
            request.max_depth
        );

        let mut frontier = Frontier::new(request.max_depth);
        let report = match &request.mode {
            CrawlMode::Search { term } => {
                let term = term.trim();
                if term.is_empty() {
                    tracing::info!("Empty search term, nothing to crawl");
                    return CrawlReport::Search(Vec::new());
                }
                CrawlReport::Search(self.run_search(&seed, term, &mut frontier).await)
            }
            CrawlMode::DeadLinks => {
                CrawlReport::DeadLinks(self.run_dead_links(&seed, &mut frontier).await)
            }
        };

        tracing::info!(
            "Crawl completed: {} pages visited, {} results",
            frontier.visited_count(),
            report.len()
        );
        self.events.emit(CrawlEvent::Finished {
            pages_visited: frontier.visited_count(),
            results: report.len(),
        });

        report
    }

    /// Search mode: every anchor is followed; hrefs and text are matched
    async fn run_search(&self, seed: &Url, term: &str, frontier: &mut Frontier) -> Vec<SearchMatch> {
        let mut matches = Vec::new();
        frontier.push(strip_fragment(seed), 0);

        loop {
            let level = frontier.next_level();
            if level.is_empty() {
                break;
            }

            let pages = self.load_level(level);
            futures::pin_mut!(pages);
            while let Some(page) = pages.next().await {
                let page_url = page.url.as_str();
                let depth = page.depth;

                page.document.walk(&mut |visit| match visit {
                    Visit::Anchor { href, element } => {
                        let Some(target) = self.follow(href, &page.url, seed) else {
                            return;
                        };

                        if href.contains(term) {
                            let anchor_text = element.text();
                            let text = if anchor_text.is_empty() {
                                href
                            } else {
                                anchor_text.as_str()
                            };
                            matches.push(SearchMatch {
                                page_url: page_url.to_string(),
                                match_text: truncate(text, MAX_MATCH_LEN),
                                depth,
                            });
                        }

                        frontier.push(target, depth.saturating_add(1));
                    }
                    Visit::Text { content, .. } if visit.is_searchable_text() => {
                        let text = content.trim();
                        if !text.is_empty() && text.contains(term) {
                            matches.push(SearchMatch {
                                page_url: page_url.to_string(),
                                match_text: truncate(text, MAX_MATCH_LEN),
                                depth,
                            });
                        }
                    }
                    Visit::Text { .. } => {}
                });
            }
        }

        matches
    }

    /// Dead-link mode: links are probed; only live targets are followed
    async fn run_dead_links(&self, seed: &Url, frontier: &mut Frontier) -> Vec<DeadLink> {
        let prober = Prober::new(&self.transport);
        let mut dead_links = Vec::new();
        frontier.push(strip_fragment(seed), 0);

        loop {
            let level = frontier.next_level();
            if level.is_empty() {
                break;
            }

            let mut links = Vec::new();
            let pages = self.load_level(level);
            futures::pin_mut!(pages);
            while let Some(page) = pages.next().await {
                page.document.walk(&mut |visit| {
                    if let Visit::Anchor { href, .. } = visit {
                        if let Some(target) = self.follow(href, &page.url, seed) {
                            links.push(PendingLink {
                                source_url: page.url.to_string(),
                                target,
                                depth: page.depth.saturating_add(1),
                            });
                        }
                    }
                });
            }

            // One probe sequence per distinct target, run concurrently.
            let mut seen = HashSet::new();
            let uncached: Vec<&str> = links
                .iter()
                .map(|link| link.target.as_str())
                .filter(|url| !prober.cache().contains(url) && seen.insert(*url))
                .collect();

            let probed: Vec<(&str, u16)> = stream::iter(uncached)
                .map(|url| {
                    let prober = &prober;
                    async move { (url, prober.probe_status(url).await) }
                })
                .buffer_unordered(self.max_concurrent_requests)
                .collect()
                .await;

            for (url, status) in probed {
                tracing::debug!("Probed {}: {}", url, status);
                self.events.emit(CrawlEvent::LinkProbed {
                    url: url.to_string(),
                    status,
                });
            }

            for link in links {
                let status = prober.probe_status(link.target.as_str()).await;
                if status >= DEAD_STATUS_THRESHOLD {
                    tracing::info!(
                        "Dead link on {}: {} ({})",
                        link.source_url,
                        link.target,
                        status
                    );
                    dead_links.push(DeadLink {
                        source_url: link.source_url,
                        broken_url: link.target.to_string(),
                        depth: link.depth,
                        status,
                    });
                } else {
                    frontier.push(link.target, link.depth);
                }
            }
        }

        dead_links
    }

    /// Fetches and parses one level of pages, yielding each as it completes
    ///
    /// Pages that fail to load are dropped from the stream.
    fn load_level(&self, level: Vec<QueuedUrl>) -> impl Stream<Item = LoadedPage> + '_ {
        stream::iter(level)
            .map(move |queued| self.load_page(queued))
            .buffer_unordered(self.max_concurrent_requests)
            .filter_map(future::ready)
    }

    async fn load_page(&self, queued: QueuedUrl) -> Option<LoadedPage> {
        let QueuedUrl { url, depth } = queued;
        tracing::debug!("Fetching {} (depth {})", url, depth);

        let page = match self.transport.fetch(url.as_str()).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Error visiting {}: {}", url, e);
                self.page_failed(&url, depth, PageFailure::Transport(e.to_string()));
                return None;
            }
        };

        if page.status_code != 200 {
            tracing::warn!("Error visiting {}: HTTP {}", url, page.status_code);
            self.page_failed(&url, depth, PageFailure::Status(page.status_code));
            return None;
        }

        let document = match parse_html(&page.body, page.content_type.as_deref()) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Error parsing HTML at {}: {}", url, e);
                self.page_failed(&url, depth, PageFailure::Parse(e.to_string()));
                return None;
            }
        };

        self.events.emit(CrawlEvent::PageFetched {
            url: url.to_string(),
            depth,
        });
        Some(LoadedPage {
            url,
            depth,
            document,
        })
    }

    fn page_failed(&self, url: &Url, depth: u32, failure: PageFailure) {
        self.events.emit(CrawlEvent::PageFailed {
            url: url.to_string(),
            depth,
            failure,
        });
    }

    /// Resolves an anchor href to a same-host target, if it has one
    fn follow(&self, href: &str, page_url: &Url, seed: &Url) -> Option<Url> {
        let Some(target) = navigable_target(href, page_url) else {
            tracing::trace!("Skipping unwanted link: {}", href);
            self.skipped(href, SkipReason::NotNavigable);
            return None;
        };

        if !same_host_url(seed, &target) {
            tracing::trace!("Skipping external link: {}", target);
            self.skipped(href, SkipReason::External);
            return None;
        }

        Some(target)
    }

    fn skipped(&self, href: &str, reason: SkipReason) {
        self.events.emit(CrawlEvent::LinkSkipped {
            href: href.to_string(),
            reason,
        });
    }
}

fn strip_fragment(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_fragment(None);
    url
}
