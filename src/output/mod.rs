//! Output module for presenting crawl results
//!
//! This module handles:
//! - Rendering reports as JSON or a plain-text listing
//! - Writing dated result files and pruning old ones

mod render;
mod results_log;

pub use render::{render_json, render_text};
pub use results_log::{format_results_log, prune_results, write_results_log, RESULT_FILE_SUFFIX};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
