//! vigil.toml configuration parser.
//!
//! A config file carries a `[settings]` block plus one `[[services]]` entry
//! per monitored service:
//!
//! ```toml
//! [settings]
//! port = 8099
//! cache_ttl = 30
//!
//! [[services]]
//! name = "Example Website"
//! type = "http"
//! polling_interval = 60
//!
//! [services.config]
//! name = "Example Website"
//! url = "https://example.com"
//! ```
//!
//! File-level problems (unreadable file, invalid TOML) fail startup; a bad
//! entry inside `[[services]]` is tolerated later, at registry build time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::ServiceConfig;

/// Global settings block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Host the dashboard binds to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port the dashboard binds to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Default result TTL in seconds, overridable per service.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,
    /// Background refresh period in seconds.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8099
}

fn default_cache_ttl() -> u64 {
    30
}

fn default_refresh_interval() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cache_ttl: default_cache_ttl(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VigilConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

impl VigilConfig {
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Read(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        toml::from_str(content).map_err(|e| CoreError::Parse(e.to_string()))
    }
}
