//! REST API handlers.
//!
//! Handlers only read from the collector; a snapshot request can return a
//! partial snapshot plus logs, never an error response that would block the
//! dashboard from rendering.

use axum::Json;
use axum::extract::State;

use vigil_core::{ConfigSchema, ServiceState};

use crate::ApiState;

/// Response wrapper for consistent API format.
#[derive(serde::Serialize)]
pub struct ApiResponse<T: serde::Serialize> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: serde::Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            error: None,
        })
    }
}

/// Registered-service descriptor for `/api/v1/services`.
#[derive(serde::Serialize)]
pub struct ServiceDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polling_interval: Option<u64>,
    pub schema: ConfigSchema,
}

/// GET /api/v1/status
pub async fn get_status(State(state): State<ApiState>) -> Json<ApiResponse<Vec<ServiceState>>> {
    ApiResponse::ok(state.collector.collect().await)
}

/// GET /api/v1/services
pub async fn list_services(
    State(state): State<ApiState>,
) -> Json<ApiResponse<Vec<ServiceDescriptor>>> {
    let services = state
        .collector
        .registry()
        .entries()
        .iter()
        .map(|entry| ServiceDescriptor {
            name: entry.config.name.clone(),
            kind: entry.config.kind.clone(),
            polling_interval: entry.config.polling_interval,
            schema: entry.checker.config_schema(),
        })
        .collect();
    ApiResponse::ok(services)
}
