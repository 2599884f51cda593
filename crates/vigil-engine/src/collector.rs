//! Concurrent status collection.
//!
//! One task per registered service, joined without any cross-task ordering
//! dependency. Results land in index-addressed slots so the snapshot always
//! follows registry insertion order, whatever the completion order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use vigil_checkers::Registry;
use vigil_core::ServiceState;

use crate::cache::ResultCache;

/// Collects the status snapshot across all registered services.
pub struct Collector {
    registry: Arc<Registry>,
    cache: ResultCache,
}

impl Collector {
    pub fn new(registry: Arc<Registry>, cache: ResultCache) -> Self {
        Self { registry, cache }
    }

    /// The registry this collector reads from.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Produce one snapshot: one entry per registered service, in registry
    /// order, serving cached results where they are still fresh.
    ///
    /// A task whose join fails (a checker violating its no-panic contract)
    /// is logged and omitted; collection of the other services proceeds.
    pub async fn collect(&self) -> Vec<ServiceState> {
        let entries = self.registry.entries();
        let mut tasks = JoinSet::new();

        for (index, entry) in entries.iter().enumerate() {
            let cache = self.cache.clone();
            let entry = Arc::clone(entry);
            tasks.spawn(async move { (index, cache.get_or_refresh(&entry).await) });
        }

        let mut slots: Vec<Option<ServiceState>> = vec![None; entries.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, state)) => slots[index] = Some(state),
                Err(e) => error!(error = %e, "status check task failed"),
            }
        }

        slots.into_iter().flatten().collect()
    }

    /// Periodic refresh loop, run until the shutdown signal.
    ///
    /// Keeps the cache warm so dashboard requests are served from recent
    /// results instead of waiting on probes.
    pub async fn run(&self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = interval.as_secs(), "status refresh loop started");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    let snapshot = self.collect().await;
                    debug!(services = snapshot.len(), "status snapshot refreshed");
                }
                _ = shutdown.changed() => {
                    info!("status refresh loop shutting down");
                    break;
                }
            }
        }
    }
}
