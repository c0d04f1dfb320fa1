use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default per-request timeout, shared by page fetches and link probes
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of requests allowed in flight at once
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 4;

/// Default number of result files retained in the results directory
pub const DEFAULT_KEEP_RESULTS: usize = 5;

/// Main configuration structure for Link-Sleuth
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Timeout for a single fetch or probe (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Maximum number of fetches or probes in flight at once
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: usize,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl CrawlerConfig {
    /// The configured timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            user_agent: format!("link-sleuth/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving dated result files
    #[serde(rename = "results-dir")]
    pub results_dir: PathBuf,

    /// How many of the most recent result files to keep
    #[serde(rename = "keep-results")]
    pub keep_results: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results_log"),
            keep_results: DEFAULT_KEEP_RESULTS,
        }
    }
}
