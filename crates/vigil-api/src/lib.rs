//! vigil-api — HTTP surface for Vigil.
//!
//! Mounts the JSON API under `/api/v1` and the dashboard at the root.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/v1/status` | Current status snapshot |
//! | GET | `/api/v1/services` | Registered services and their config schemas |

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use vigil_dashboard::DashboardState;
use vigil_engine::Collector;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub collector: Arc<Collector>,
}

/// Build the complete router (REST + dashboard).
pub fn build_router(collector: Arc<Collector>, poll_seconds: u64) -> Router {
    let api_state = ApiState {
        collector: collector.clone(),
    };

    let dashboard_state = DashboardState {
        collector,
        poll_seconds,
    };

    let api_routes = Router::new()
        .route("/status", get(handlers::get_status))
        .route("/services", get(handlers::list_services))
        .with_state(api_state);

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(vigil_dashboard::dashboard_router(dashboard_state))
}
