//! URL handling module for Link-Sleuth
//!
//! This module provides href classification, relative-URL resolution, and
//! same-host comparison against the crawl's seed URL.

mod host;
mod resolve;

// Re-export main functions
pub use host::same_host;
pub(crate) use host::same_host_url;
pub use resolve::{is_skippable, navigable_target, resolve};
