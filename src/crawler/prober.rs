//! Dead-link prober
//!
//! Link targets are checked with a HEAD request first. Servers that reject
//! HEAD (405) or fail it outright get a second chance with a GET whose body is
//! never read. A target that cannot be reached either way is recorded as 503.

use crate::crawler::Transport;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Status recorded for targets that could not be reached at all
pub const UNREACHABLE_STATUS: u16 = 503;

/// Statuses at or above this mark a link as dead
pub const DEAD_STATUS_THRESHOLD: u16 = 400;

const METHOD_NOT_ALLOWED: u16 = 405;

/// Per-crawl map from absolute URL to its observed status
///
/// Write-once per key: the first recorded status wins and is never replaced.
#[derive(Debug, Default)]
pub struct StatusCache {
    statuses: Mutex<HashMap<String, u16>>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<u16> {
        self.lock().get(url).copied()
    }

    /// Records `status` unless `url` already has one; returns the stored value
    pub fn record(&self, url: &str, status: u16) -> u16 {
        *self.lock().entry(url.to_string()).or_insert(status)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, u16>> {
        // The map holds plain values, so a poisoned lock is still consistent.
        self.statuses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Resolves link statuses through a [`StatusCache`]
pub struct Prober<'a, T> {
    transport: &'a T,
    cache: StatusCache,
}

impl<'a, T: Transport> Prober<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            cache: StatusCache::new(),
        }
    }

    pub fn cache(&self) -> &StatusCache {
        &self.cache
    }

    /// Returns the status of `url`, probing the network only on a cache miss
    pub async fn probe_status(&self, url: &str) -> u16 {
        if let Some(status) = self.cache.get(url) {
            tracing::trace!("Status cache hit for {}: {}", url, status);
            return status;
        }

        let status = probe_uncached(self.transport, url).await;
        self.cache.record(url, status)
    }
}

/// Runs the HEAD-then-GET probe sequence without consulting any cache
pub async fn probe_uncached<T: Transport>(transport: &T, url: &str) -> u16 {
    match transport.fetch_head(url).await {
        Ok(status) if status != METHOD_NOT_ALLOWED => return status,
        Ok(_) => tracing::debug!("HEAD not allowed for {}, retrying with GET", url),
        Err(e) => tracing::debug!("HEAD failed for {} ({}), retrying with GET", url, e),
    }

    match transport.fetch_status(url).await {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!("Link target unreachable: {}", e);
            UNREACHABLE_STATUS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::testing::{Route, StaticSite};
    use std::sync::atomic::Ordering;

    const URL: &str = "http://site.test/target";

    #[test]
    fn test_cache_first_write_wins() {
        let cache = StatusCache::new();
        assert_eq!(cache.record(URL, 404), 404);
        assert_eq!(cache.record(URL, 200), 404);
        assert_eq!(cache.get(URL), Some(404));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_miss() {
        let cache = StatusCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get(URL), None);
        assert!(!cache.contains(URL));
    }

    #[tokio::test]
    async fn test_head_status_is_used() {
        let site = StaticSite::new().status(URL, 404);
        let prober = Prober::new(&site);

        assert_eq!(prober.probe_status(URL).await, 404);
        assert_eq!(site.head_calls.load(Ordering::SeqCst), 1);
        assert_eq!(site.get_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_method_not_allowed_falls_back_to_get() {
        let site = StaticSite::new().route(URL, Route::NoHead { status: 200 });
        let prober = Prober::new(&site);

        assert_eq!(prober.probe_status(URL).await, 200);
        assert_eq!(site.head_calls.load(Ordering::SeqCst), 1);
        assert_eq!(site.get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_head_falls_back_to_get() {
        let site = StaticSite::new().route(URL, Route::HeadFails { status: 200 });
        let prober = Prober::new(&site);

        assert_eq!(prober.probe_status(URL).await, 200);
        assert_eq!(site.head_calls.load(Ordering::SeqCst), 1);
        assert_eq!(site.get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unreachable_records_service_unavailable() {
        let site = StaticSite::new().route(URL, Route::Down);
        let prober = Prober::new(&site);

        assert_eq!(prober.probe_status(URL).await, UNREACHABLE_STATUS);
        assert_eq!(prober.cache().get(URL), Some(503));
        assert_eq!(site.get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_second_probe_is_a_cache_hit() {
        let site = StaticSite::new().route(URL, Route::NoHead { status: 500 });
        let prober = Prober::new(&site);

        let first = prober.probe_status(URL).await;
        let second = prober.probe_status(URL).await;

        assert_eq!(first, 500);
        assert_eq!(first, second);
        assert_eq!(site.head_calls.load(Ordering::SeqCst), 1);
        assert_eq!(site.get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ok_status_is_cached_too() {
        let site = StaticSite::new().status(URL, 200);
        let prober = Prober::new(&site);

        assert_eq!(prober.probe_status(URL).await, 200);
        assert!(prober.cache().contains(URL));
    }
}
