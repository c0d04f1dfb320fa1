//! Configuration module for Link-Sleuth
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a missing file section is never an error.
//!
//! # Example
//!
//! ```no_run
//! use link_sleuth::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("link-sleuth.toml")).unwrap();
//! println!("Fetch timeout: {}s", config.crawler.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
