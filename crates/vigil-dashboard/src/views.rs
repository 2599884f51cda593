//! View types for dashboard template rendering.
//!
//! Purpose-built for the templates: pre-formatted strings and computed
//! fields so the templates stay simple.

use serde_json::Value;

use vigil_core::{ServiceState, ServiceStatus};

/// One status tile.
pub struct TileView {
    pub name: String,
    pub status_class: &'static str,
    pub status_label: &'static str,
    pub checked_at: String,
    /// One-line summary under the status: error text, latency, or feed info.
    pub headline: String,
}

impl TileView {
    pub fn from_state(state: &ServiceState) -> Self {
        let (status_class, status_label) = match state.status {
            ServiceStatus::Healthy => ("healthy", "Healthy"),
            ServiceStatus::Unhealthy => ("unhealthy", "Unhealthy"),
            ServiceStatus::Unknown => ("unknown", "Unknown"),
        };

        Self {
            name: state.name.clone(),
            status_class,
            status_label,
            checked_at: state.checked_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            headline: headline_for(state),
        }
    }
}

fn headline_for(state: &ServiceState) -> String {
    if let Some(error) = state.error_detail() {
        return error.to_string();
    }
    if let Some(ms) = state.detail("response_time_ms").and_then(Value::as_f64) {
        return format!("{ms} ms");
    }
    if let Some(title) = state.detail("title").and_then(Value::as_str) {
        let entries = state
            .detail("entries_count")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        return format!("{title} ({entries} entries)");
    }
    String::new()
}
