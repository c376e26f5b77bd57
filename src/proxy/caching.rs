//! Caching Proxy Module
//!
//! The access proxy sitting between callers and a RemoteService,
//! serving reads from the cache table and invalidating on writes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::ProxyConfig;
use crate::error::Result;
use crate::proxy::{CacheTable, ProxyStats};
use crate::remote::RemoteService;

// == Caching Proxy ==
/// Caching access proxy over a RemoteService.
///
/// Reads are served from the cache table while fresh; misses delegate to
/// the remote service and store the result. Successful writes invalidate
/// the corresponding entry so the next read refetches - the proxy never
/// reconstructs the read representation from a write payload, because
/// the service may attach server-assigned fields.
///
/// The proxy is the sole synchronization point: any number of tasks may
/// call any operation concurrently on clones of one instance. Remote
/// calls always happen with the table lock released, so a slow fetch for
/// one key never blocks readers of unrelated keys. Concurrent misses on
/// the same key are not collapsed: each may trigger its own fetch and
/// the last store wins, which subsequent reads then observe.
///
/// A `write(key)` completing while an earlier `read(key)` is still in
/// flight may be overtaken by that read's store; callers needing
/// stronger ordering must serialize at their level. This
/// eventual-consistency window is bounded by the TTL.
pub struct CachingProxy<S: RemoteService> {
    service: Arc<S>,
    table: Arc<RwLock<CacheTable<S::Value>>>,
    ttl: Duration,
}

// Manual impl: `S` itself need not be Clone, only the Arc handles are.
impl<S: RemoteService> Clone for CachingProxy<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            table: Arc::clone(&self.table),
            ttl: self.ttl,
        }
    }
}

impl<S: RemoteService> CachingProxy<S> {
    // == Constructor ==
    /// Creates a new proxy over `service` with the given TTL.
    ///
    /// The TTL is fixed for the lifetime of the proxy. A zero TTL is
    /// legal and degenerates to "always miss": every read delegates to
    /// the remote service.
    ///
    /// # Arguments
    /// * `service` - The remote service to delegate to
    /// * `ttl` - Freshness window for cached entries
    pub fn new(service: S, ttl: Duration) -> Self {
        Self {
            service: Arc::new(service),
            table: Arc::new(RwLock::new(CacheTable::new(ttl))),
            ttl,
        }
    }

    /// Creates a new proxy from configuration.
    pub fn from_config(service: S, config: &ProxyConfig) -> Self {
        Self::new(service, config.ttl)
    }

    /// Returns the TTL the proxy was constructed with.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a handle to the underlying cache table, for wiring up the
    /// background sweeper task.
    pub fn table(&self) -> Arc<RwLock<CacheTable<S::Value>>> {
        Arc::clone(&self.table)
    }

    // == Read ==
    /// Reads the resource at `key`, serving from cache when fresh.
    ///
    /// A fresh entry is returned without contacting the remote service
    /// and without touching its timestamp. Otherwise the entry (if any)
    /// is evicted, the remote service is fetched with the lock released,
    /// and a successful result is stored under `key`. A failed fetch
    /// leaves the key absent and propagates the error; a stale value is
    /// never substituted to mask the failure.
    pub async fn read(&self, key: &str) -> Result<S::Value> {
        {
            let mut table = self.table.write().await;
            if let Some(value) = table.lookup(key) {
                debug!("Cache hit for '{}'", key);
                return Ok(value);
            }
        }

        debug!("Cache miss for '{}', delegating to remote service", key);

        match self.service.fetch(key).await {
            Ok(value) => {
                let mut table = self.table.write().await;
                table.store(key.to_string(), value.clone());
                Ok(value)
            }
            Err(err) => {
                warn!("Remote fetch for '{}' failed: {}", key, err);
                Err(err.into())
            }
        }
    }

    // == Write ==
    /// Writes `payload` to the resource at `key` through the remote
    /// service.
    ///
    /// On success the cache entry for `key` is unconditionally removed,
    /// whether or not one existed; the next read refetches. On failure
    /// the table is left untouched, since no mutation is known to have
    /// occurred.
    pub async fn write(&self, key: &str, payload: S::Payload) -> Result<S::Receipt> {
        match self.service.post(key, payload).await {
            Ok(receipt) => {
                let mut table = self.table.write().await;
                table.remove(key);
                debug!("Write to '{}' succeeded, cache entry invalidated", key);
                Ok(receipt)
            }
            Err(err) => {
                warn!("Remote post to '{}' failed: {}", key, err);
                Err(err.into())
            }
        }
    }

    // == Invalidate ==
    /// Removes the cache entry for `key` if present.
    ///
    /// Idempotent; invalidating a missing key is a no-op.
    pub async fn invalidate(&self, key: &str) {
        let mut table = self.table.write().await;
        if table.remove(key) {
            debug!("Invalidated cache entry for '{}'", key);
        }
    }

    // == Clear ==
    /// Removes all cache entries. Idempotent.
    pub async fn clear(&self) {
        let mut table = self.table.write().await;
        table.clear();
        debug!("Cache cleared");
    }

    // == Stats ==
    /// Returns a snapshot of the proxy's cache statistics.
    pub async fn stats(&self) -> ProxyStats {
        self.table.read().await.stats()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{RemoteError, SimulatedRemoteService};
    use serde_json::json;

    const TEST_TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn test_read_miss_then_hit() {
        let service = SimulatedRemoteService::new();
        service.insert_response("users", json!({ "id": 1 }));
        let proxy = CachingProxy::new(service, TEST_TTL);

        let first = proxy.read("users").await.unwrap();
        let second = proxy.read("users").await.unwrap();

        assert_eq!(first, json!({ "id": 1 }));
        assert_eq!(second, first);

        let stats = proxy.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[tokio::test]
    async fn test_hit_does_not_contact_remote_service() {
        let proxy = CachingProxy::new(SimulatedRemoteService::new(), TEST_TTL);

        proxy.read("users").await.unwrap();
        proxy.read("users").await.unwrap();
        proxy.read("users").await.unwrap();

        assert_eq!(proxy.service.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_expired_read_refetches() {
        let service = SimulatedRemoteService::new();
        let proxy = CachingProxy::new(service, Duration::from_millis(50));

        proxy.read("users").await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;
        proxy.read("users").await.unwrap();

        assert_eq!(proxy.service.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_write_invalidates_entry() {
        let service = SimulatedRemoteService::new();
        service.insert_response("items", json!({ "v": 1 }));
        let proxy = CachingProxy::new(service, TEST_TTL);

        assert_eq!(proxy.read("items").await.unwrap(), json!({ "v": 1 }));

        // Backend state changes along with the write
        proxy.service.insert_response("items", json!({ "v": 2 }));
        proxy.write("items", json!({ "v": 2 })).await.unwrap();

        // Post-write read must refetch, never return the pre-write value
        assert_eq!(proxy.read("items").await.unwrap(), json!({ "v": 2 }));
        assert_eq!(proxy.service.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_untouched() {
        let service = SimulatedRemoteService::new();
        service.insert_response("items", json!({ "v": 1 }));
        let proxy = CachingProxy::new(service, TEST_TTL);

        proxy.read("items").await.unwrap();
        proxy
            .service
            .fail_posts_with(RemoteError::Network("down".to_string()));

        let result = proxy.write("items", json!({ "v": 2 })).await;
        assert!(result.is_err());

        // Entry still served from cache; no refetch happened
        assert_eq!(proxy.read("items").await.unwrap(), json!({ "v": 1 }));
        assert_eq!(proxy.service.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_refetch_evicts_stale_entry() {
        let service = SimulatedRemoteService::new();
        let proxy = CachingProxy::new(service, Duration::from_millis(50));

        proxy.read("users").await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;

        proxy
            .service
            .fail_fetches_with(RemoteError::Network("down".to_string()));
        let result = proxy.read("users").await;
        assert!(result.is_err());

        // The stale entry was evicted, not resurrected
        let stats = proxy.stats().await;
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_invalidate_is_idempotent() {
        let proxy = CachingProxy::new(SimulatedRemoteService::new(), TEST_TTL);

        proxy.read("users").await.unwrap();
        proxy.invalidate("users").await;
        proxy.invalidate("users").await;
        proxy.invalidate("never_cached").await;

        let stats = proxy.stats().await;
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.invalidations, 1);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let proxy = CachingProxy::new(SimulatedRemoteService::new(), TEST_TTL);

        proxy.read("a").await.unwrap();
        proxy.read("b").await.unwrap();
        proxy.clear().await;
        proxy.clear().await;

        proxy.read("a").await.unwrap();
        assert_eq!(proxy.service.fetch_calls(), 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_verbatim() {
        let service = SimulatedRemoteService::new();
        service.fail_fetches_with(RemoteError::Status {
            status: 503,
            message: "unavailable".to_string(),
        });
        let proxy = CachingProxy::new(service, TEST_TTL);

        let err = proxy.read("users").await.unwrap_err();
        match err {
            crate::error::ProxyError::Remote(RemoteError::Status { status, .. }) => {
                assert_eq!(status, 503)
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_ttl_always_delegates() {
        let proxy = CachingProxy::new(SimulatedRemoteService::new(), Duration::ZERO);

        proxy.read("users").await.unwrap();
        proxy.read("users").await.unwrap();

        assert_eq!(proxy.service.fetch_calls(), 2);
        assert_eq!(proxy.stats().await.hits, 0);
    }
}
