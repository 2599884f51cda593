//! Startup-time service registry.
//!
//! Maps each configured service to an instantiated checker. Construction is
//! partial-failure tolerant: an entry with an unknown kind or invalid config
//! is logged and skipped so one bad service never takes down the rest. Once
//! built, the registry is read-only for the process lifetime.

use std::sync::Arc;

use tracing::{error, info};

use vigil_core::ServiceConfig;

use crate::{Checker, CheckerError, CheckerResult, FeedChecker, HttpChecker};

/// Instantiate the checker variant selected by `config.kind`.
///
/// Dispatch happens once here; check-time calls go through the trait object.
pub fn build_checker(config: &ServiceConfig) -> CheckerResult<Arc<dyn Checker>> {
    match config.kind.as_str() {
        "http" => Ok(Arc::new(HttpChecker::from_config(&config.config)?)),
        "rss" => Ok(Arc::new(FeedChecker::from_config(&config.config)?)),
        other => Err(CheckerError::UnknownKind(other.to_string())),
    }
}

/// One registered service: its configuration plus the instantiated checker.
pub struct RegistryEntry {
    pub config: ServiceConfig,
    pub checker: Arc<dyn Checker>,
}

impl RegistryEntry {
    pub fn new(config: ServiceConfig, checker: Arc<dyn Checker>) -> Self {
        Self { config, checker }
    }
}

/// Insertion-ordered mapping from service name to checker.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Arc<RegistryEntry>>,
}

impl Registry {
    /// Build the registry from configured services.
    ///
    /// Entries that fail to construct are logged and excluded; the
    /// remaining services load normally.
    pub fn build(configs: &[ServiceConfig]) -> Self {
        let mut entries = Vec::new();
        for config in configs {
            match build_checker(config) {
                Ok(checker) => {
                    info!(service = %config.name, kind = %config.kind, "loaded service checker");
                    entries.push(Arc::new(RegistryEntry::new(config.clone(), checker)));
                }
                Err(e) => {
                    error!(service = %config.name, error = %e, "failed to load service, skipping");
                }
            }
        }
        Self { entries }
    }

    /// Assemble a registry from pre-built entries.
    pub fn from_entries(entries: Vec<Arc<RegistryEntry>>) -> Self {
        Self { entries }
    }

    /// Registered services in insertion order.
    pub fn entries(&self) -> &[Arc<RegistryEntry>] {
        &self.entries
    }

    /// Look up a service by name.
    pub fn get(&self, name: &str) -> Option<&Arc<RegistryEntry>> {
        self.entries.iter().find(|e| e.config.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
