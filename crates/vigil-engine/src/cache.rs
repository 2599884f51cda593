//! TTL cache for check results.
//!
//! Keyed by service name, bounded by the number of registered services.
//! Entries are replaced wholesale on refresh; concurrent refreshes of the
//! same service may both probe, and the last writer wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use vigil_checkers::RegistryEntry;
use vigil_core::ServiceState;

struct CacheEntry {
    state: ServiceState,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_fresh(&self) -> bool {
        self.stored_at.elapsed() < self.ttl
    }
}

/// Most-recent check result per service, with a time-to-live.
#[derive(Clone)]
pub struct ResultCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    default_ttl: Duration,
}

impl ResultCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
        }
    }

    /// Return the cached state for this service, probing only when the
    /// cached entry is missing or older than its TTL.
    ///
    /// The TTL is the service's `polling_interval` when configured, the
    /// global default otherwise.
    pub async fn get_or_refresh(&self, entry: &RegistryEntry) -> ServiceState {
        let name = &entry.config.name;

        {
            let cached = self.entries.read().await;
            if let Some(slot) = cached.get(name) {
                if slot.is_fresh() {
                    debug!(service = %name, "serving cached result");
                    return slot.state.clone();
                }
            }
        }

        let state = entry.checker.check().await;
        let ttl = entry.config.effective_ttl(self.default_ttl);

        let mut cached = self.entries.write().await;
        cached.insert(
            name.clone(),
            CacheEntry {
                state: state.clone(),
                stored_at: Instant::now(),
                ttl,
            },
        );
        state
    }

    /// Number of cached services.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::Value;

    use vigil_checkers::Checker;
    use vigil_core::{ConfigSchema, ServiceConfig, ServiceStatus};

    /// Counts probe invocations so tests can assert cache behavior.
    #[derive(Debug)]
    struct CountingChecker {
        name: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Checker for CountingChecker {
        async fn check(&self) -> ServiceState {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            ServiceState::new(&self.name, ServiceStatus::Healthy).with_detail("call", call)
        }

        fn config_schema(&self) -> ConfigSchema {
            ConfigSchema::new()
        }
    }

    fn counted_entry(name: &str, polling_interval: Option<u64>) -> (RegistryEntry, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let checker = CountingChecker {
            name: name.to_string(),
            calls: calls.clone(),
        };
        let config = ServiceConfig {
            name: name.to_string(),
            kind: "counting".to_string(),
            config: Value::Null,
            polling_interval,
        };
        (RegistryEntry::new(config, Arc::new(checker)), calls)
    }

    #[tokio::test]
    async fn fresh_entry_is_served_without_a_probe() {
        let cache = ResultCache::new(Duration::from_secs(60));
        let (entry, calls) = counted_entry("api", None);

        let first = cache.get_or_refresh(&entry).await;
        let second = cache.get_or_refresh(&entry).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn expired_entry_triggers_one_fresh_probe() {
        let cache = ResultCache::new(Duration::from_millis(10));
        let (entry, calls) = counted_entry("api", None);

        cache.get_or_refresh(&entry).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        let refreshed = cache.get_or_refresh(&entry).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(refreshed.detail("call"), Some(&Value::from(2)));
    }

    #[tokio::test]
    async fn polling_interval_overrides_default_ttl() {
        // Default TTL would expire immediately; the per-service interval
        // keeps the entry fresh.
        let cache = ResultCache::new(Duration::from_millis(0));
        let (entry, calls) = counted_entry("api", Some(60));

        cache.get_or_refresh(&entry).await;
        cache.get_or_refresh(&entry).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cache_is_bounded_by_service_count() {
        let cache = ResultCache::new(Duration::from_secs(60));
        let (a, _) = counted_entry("a", None);
        let (b, _) = counted_entry("b", None);

        for _ in 0..5 {
            cache.get_or_refresh(&a).await;
            cache.get_or_refresh(&b).await;
        }

        assert_eq!(cache.len().await, 2);
    }
}
