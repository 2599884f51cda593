//! vigil-dashboard — server-rendered web UI for Vigil.
//!
//! A single overview page with one tile per monitored service. The tile
//! grid is an HTMX fragment the page re-polls on the configured interval,
//! so the browser never needs a full reload to track status changes.
//!
//! | Route | Handler |
//! |---|---|
//! | `/` | Overview page |
//! | `/partials/tiles` | Tile grid fragment (polled) |

pub mod pages;
pub mod views;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use vigil_engine::Collector;

/// Shared state for dashboard handlers.
#[derive(Clone)]
pub struct DashboardState {
    pub collector: Arc<Collector>,
    /// Browser poll interval in seconds.
    pub poll_seconds: u64,
}

/// Build the dashboard router.
pub fn dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(pages::overview))
        .route("/partials/tiles", get(pages::tiles))
        .with_state(state)
}
