//! Domain types for the Vigil status model.
//!
//! A [`ServiceState`] is the immutable outcome of one probe: every code path
//! through a checker produces exactly one, so failures are carried as data
//! (`status` + `details.error`) rather than as errors.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Health of a monitored service as determined by its checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
    /// No check has completed yet.
    Unknown,
}

/// Outcome of a single check execution.
///
/// `details` is an open mapping of variant-specific keys (status code,
/// latency, feed title, error text). Consumers treat missing keys as
/// absent, not as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceState {
    pub name: String,
    pub status: ServiceStatus,
    /// UTC timestamp of when this result was produced.
    pub checked_at: DateTime<Utc>,
    #[serde(default)]
    pub details: Map<String, Value>,
}

impl ServiceState {
    /// New state for `name`, stamped with the current time.
    pub fn new(name: impl Into<String>, status: ServiceStatus) -> Self {
        Self {
            name: name.into(),
            status,
            checked_at: Utc::now(),
            details: Map::new(),
        }
    }

    /// Unhealthy state carrying `details.error`.
    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(name, ServiceStatus::Unhealthy).with_detail("error", error.into())
    }

    /// Attach a detail entry.
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    /// Look up a detail entry.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    /// The `details.error` text, when present.
    pub fn error_detail(&self) -> Option<&str> {
        self.details.get("error").and_then(Value::as_str)
    }
}

/// One `[[services]]` entry from the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Stable identifier, also the registry and cache key.
    pub name: String,
    /// Selects the checker variant ("http", "rss").
    #[serde(rename = "type")]
    pub kind: String,
    /// Variant-specific configuration, validated against the checker's schema.
    #[serde(default)]
    pub config: Value,
    /// Per-service result TTL in seconds; the global `cache_ttl` applies
    /// when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polling_interval: Option<u64>,
}

impl ServiceConfig {
    /// Result TTL for this service given the global default.
    pub fn effective_ttl(&self, global: Duration) -> Duration {
        self.polling_interval.map(Duration::from_secs).unwrap_or(global)
    }
}
