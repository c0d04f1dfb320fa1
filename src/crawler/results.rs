//! Crawl request and result record types

use serde::Serialize;

/// What a crawl looks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlMode {
    /// Report links whose href, and text nodes whose content, contain `term`
    Search { term: String },
    /// Report same-host links whose target answers with status >= 400
    DeadLinks,
}

/// Parameters of one crawl; immutable while the crawl runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// Absolute seed URL (depth 0)
    pub base_url: String,
    /// Deepest page depth that is still fetched
    pub max_depth: u32,
    pub mode: CrawlMode,
}

impl CrawlRequest {
    pub fn search(base_url: impl Into<String>, max_depth: u32, term: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_depth,
            mode: CrawlMode::Search { term: term.into() },
        }
    }

    pub fn dead_links(base_url: impl Into<String>, max_depth: u32) -> Self {
        Self {
            base_url: base_url.into(),
            max_depth,
            mode: CrawlMode::DeadLinks,
        }
    }
}

/// A search hit on a crawled page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    /// Page the match was found on
    pub page_url: String,
    /// Anchor text, href or text node content, truncated for display
    pub match_text: String,
    /// Depth of the page the match was found on
    pub depth: u32,
}

/// A same-host link whose target is unreachable or answers with an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadLink {
    /// Page containing the link
    pub source_url: String,
    /// Resolved target of the link
    pub broken_url: String,
    /// Depth of the link (source page depth + 1)
    pub depth: u32,
    /// Observed status, or 503 when the target could not be reached
    pub status: u16,
}

/// Everything a finished crawl found; results carry no ordering guarantee
///
/// Serializes as `{"searchResults": [...]}` or `{"deadLinks": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CrawlReport {
    #[serde(rename = "searchResults")]
    Search(Vec<SearchMatch>),
    #[serde(rename = "deadLinks")]
    DeadLinks(Vec<DeadLink>),
}

impl CrawlReport {
    /// An empty report of the kind `mode` produces
    pub fn empty(mode: &CrawlMode) -> Self {
        match mode {
            CrawlMode::Search { .. } => Self::Search(Vec::new()),
            CrawlMode::DeadLinks => Self::DeadLinks(Vec::new()),
        }
    }

    /// Number of result records
    pub fn len(&self) -> usize {
        match self {
            Self::Search(matches) => matches.len(),
            Self::DeadLinks(links) => links.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
