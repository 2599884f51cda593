//! Dashboard page and partial handlers.
//!
//! Each handler collects the current snapshot, builds view types, and
//! renders an Askama template.

use askama::Template;
use axum::extract::State;
use axum::response::Html;

use crate::DashboardState;
use crate::views::TileView;

fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(
        tmpl.render()
            .unwrap_or_else(|e| format!("<pre>Template error: {e}</pre>")),
    )
}

// ── Pages ───────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "overview.html")]
struct OverviewTemplate {
    poll_seconds: u64,
    tiles: Vec<TileView>,
}

/// GET / renders the status overview page.
pub async fn overview(State(state): State<DashboardState>) -> Html<String> {
    let snapshot = state.collector.collect().await;
    let tiles = snapshot.iter().map(TileView::from_state).collect();
    render(OverviewTemplate {
        poll_seconds: state.poll_seconds,
        tiles,
    })
}

// ── Partials ────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "_tiles.html")]
struct TilesTemplate {
    tiles: Vec<TileView>,
}

/// GET /partials/tiles renders the tile grid fragment the page polls.
pub async fn tiles(State(state): State<DashboardState>) -> Html<String> {
    let snapshot = state.collector.collect().await;
    let tiles = snapshot.iter().map(TileView::from_state).collect();
    render(TilesTemplate { tiles })
}
