//! End-to-end regression tests.
//!
//! Drives the full stack the way the daemon assembles it: parse a config,
//! build the registry, and serve the router against real local sockets.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vigil_checkers::Registry;
use vigil_core::VigilConfig;
use vigil_engine::{Collector, ResultCache};

async fn spawn_target() -> String {
    let app = Router::new().route("/health", get(|| async { "ok" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn unreachable_target() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn router_for(config: &VigilConfig) -> Router {
    let registry = Arc::new(Registry::build(&config.services));
    let cache = ResultCache::new(Duration::from_secs(config.settings.cache_ttl));
    let collector = Arc::new(Collector::new(registry, cache));
    vigil_api::build_router(collector, config.settings.refresh_interval)
}

async fn get_body(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let resp = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn mixed_registry_serves_partial_snapshot() {
    let up = spawn_target().await;
    let down = unreachable_target().await;

    let config = VigilConfig::from_toml_str(&format!(
        r#"
[[services]]
name = "up"
type = "http"

[services.config]
name = "up"
url = "{up}/health"
timeout = 5

[[services]]
name = "down"
type = "http"

[services.config]
name = "down"
url = "{down}/health"
timeout = 1

[[services]]
name = "mystery"
type = "telepathy"

[services.config]
name = "mystery"
"#
    ))
    .unwrap();

    let router = router_for(&config);
    let (status, body) = get_body(router, "/api/v1/status").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    let data = json["data"].as_array().unwrap();

    // The unknown kind never made it into the registry; the unreachable
    // service is still present, reported unhealthy.
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["name"], "up");
    assert_eq!(data[0]["status"], "healthy");
    assert_eq!(data[0]["details"]["status_code"], 200);
    assert_eq!(data[1]["name"], "down");
    assert_eq!(data[1]["status"], "unhealthy");
    assert!(!data[1]["details"]["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn empty_config_serves_empty_snapshot() {
    let config = VigilConfig::from_toml_str("").unwrap();
    let router = router_for(&config);

    let (status, body) = get_body(router, "/api/v1/status").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn dashboard_page_shows_services() {
    let up = spawn_target().await;
    let config = VigilConfig::from_toml_str(&format!(
        r#"
[[services]]
name = "Example Website"
type = "http"

[services.config]
name = "Example Website"
url = "{up}/health"
"#
    ))
    .unwrap();

    let router = router_for(&config);
    let (status, body) = get_body(router, "/").await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Example Website"));
    assert!(html.contains("tile healthy"));
}

#[tokio::test]
async fn services_endpoint_documents_config_schema() {
    let config = VigilConfig::from_toml_str(
        r#"
[[services]]
name = "feed"
type = "rss"
polling_interval = 120

[services.config]
name = "feed"
feed_url = "https://example.com/feed.xml"
"#,
    )
    .unwrap();

    let router = router_for(&config);
    let (status, body) = get_body(router, "/api/v1/services").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    let entry = &json["data"][0];
    assert_eq!(entry["name"], "feed");
    assert_eq!(entry["type"], "rss");
    assert_eq!(entry["polling_interval"], 120);
    let required = entry["schema"]["required"].as_array().unwrap();
    assert!(required.iter().any(|k| k == "feed_url"));
}
