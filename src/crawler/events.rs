//! Diagnostic side channel for crawls
//!
//! Callers that want to observe what a crawl did (beyond its results) pass an
//! unbounded sender to [`Crawler::with_events`](crate::crawler::Crawler::with_events).

use tokio::sync::mpsc::UnboundedSender;

/// Why a page branch was abandoned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFailure {
    /// The request itself failed (network, timeout, DNS)
    Transport(String),
    /// The page answered with a non-200 status
    Status(u16),
    /// The body could not be used as HTML
    Parse(String),
}

/// Why an anchor was not considered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty, fragment-only, non-navigational scheme or unresolvable href
    NotNavigable,
    /// Resolved to a different host than the seed
    External,
}

/// Something observable that happened during a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    PageFetched { url: String, depth: u32 },
    PageFailed { url: String, depth: u32, failure: PageFailure },
    LinkSkipped { href: String, reason: SkipReason },
    LinkProbed { url: String, status: u16 },
    Finished { pages_visited: usize, results: usize },
}

/// Optional event sink; sends are fire-and-forget
#[derive(Debug, Clone, Default)]
pub(crate) struct EventSink {
    sender: Option<UnboundedSender<CrawlEvent>>,
}

impl EventSink {
    pub(crate) fn new(sender: UnboundedSender<CrawlEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    pub(crate) fn emit(&self, event: CrawlEvent) {
        if let Some(sender) = &self.sender {
            // A dropped receiver just means nobody is listening anymore.
            let _ = sender.send(event);
        }
    }
}
