//! Link-Sleuth: a same-host site crawler
//!
//! This crate walks a website from a seed URL, following same-host links up to
//! a bounded depth, and reports either links and text matching a search string
//! or links that resolve to a dead (4xx/5xx/unreachable) target.

pub mod config;
pub mod crawler;
pub mod dom;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Link-Sleuth operations
#[derive(Debug, Error)]
pub enum SleuthError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Failures of the fetch/probe transport
///
/// A transport error never aborts a crawl; the branch that hit it is
/// abandoned (page fetch) or recorded as unreachable (link probe).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("HTTP error for {url}: {message}")]
    Request { url: String, message: String },
}

impl TransportError {
    /// The URL the failed request was addressed to
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url } | Self::Connect { url } | Self::Request { url, .. } => url,
        }
    }
}

/// HTML parsing errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Expected HTML, got {content_type}")]
    ContentMismatch { content_type: String },
}

/// Result type alias for Link-Sleuth operations
pub type Result<T> = std::result::Result<T, SleuthError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    CrawlEvent, CrawlMode, CrawlReport, CrawlRequest, Crawler, DeadLink, HttpTransport,
    SearchMatch, Transport,
};
pub use crate::url::{is_skippable, resolve, same_host};
