//! RSS/Atom feed checker.
//!
//! Fetches a feed URL and verifies the body parses as a syndication feed.
//! A healthy result surfaces the feed title, feed-level update time, and
//! entry count for the dashboard.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Value, json};
use tracing::debug;

use vigil_core::{ConfigSchema, PropertyType, ServiceState, ServiceStatus};

use crate::{Checker, CheckerError, CheckerResult};

/// Probes an RSS or Atom feed.
#[derive(Debug)]
pub struct FeedChecker {
    name: String,
    feed_url: Url,
    timeout: Duration,
}

impl FeedChecker {
    pub fn schema() -> ConfigSchema {
        ConfigSchema::new()
            .required("name", PropertyType::String)
            .required("feed_url", PropertyType::String)
            .optional("timeout", PropertyType::Number, json!(30))
    }

    /// Build a checker from a validated service config table.
    pub fn from_config(config: &Value) -> CheckerResult<Self> {
        Self::schema().validate(config)?;

        let name = config["name"].as_str().unwrap_or_default().to_string();

        let feed_url = config["feed_url"].as_str().unwrap_or_default();
        let feed_url = Url::parse(feed_url).map_err(|e| CheckerError::InvalidValue {
            key: "feed_url",
            reason: e.to_string(),
        })?;

        let secs = config
            .get("timeout")
            .and_then(Value::as_f64)
            .unwrap_or(30.0);
        if !secs.is_finite() || secs <= 0.0 {
            return Err(CheckerError::InvalidValue {
                key: "timeout",
                reason: format!("`{secs}` is not a positive number of seconds"),
            });
        }

        Ok(Self {
            name,
            feed_url,
            timeout: Duration::from_secs_f64(secs),
        })
    }

    async fn fetch(&self) -> Result<reqwest::Response, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        client.get(self.feed_url.clone()).send().await
    }
}

#[async_trait]
impl Checker for FeedChecker {
    async fn check(&self) -> ServiceState {
        let response = match self.fetch().await {
            Ok(response) => response,
            Err(e) => return ServiceState::failure(&self.name, e.to_string()),
        };

        let status = response.status().as_u16();
        if status != 200 {
            return ServiceState::failure(&self.name, format!("HTTP {status}"));
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return ServiceState::failure(&self.name, e.to_string()),
        };

        match feed_rs::parser::parse(body.as_ref()) {
            Ok(feed) => {
                let title = feed
                    .title
                    .map(|t| t.content)
                    .unwrap_or_else(|| "Unknown".to_string());
                let last_updated = feed
                    .updated
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "Unknown".to_string());
                debug!(service = %self.name, entries = feed.entries.len(), "feed parsed");
                ServiceState::new(&self.name, ServiceStatus::Healthy)
                    .with_detail("title", title)
                    .with_detail("last_updated", last_updated)
                    .with_detail("entries_count", feed.entries.len())
            }
            Err(e) => ServiceState::failure(&self.name, e.to_string()),
        }
    }

    fn config_schema(&self) -> ConfigSchema {
        Self::schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;

    const VALID_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">
    <channel>
        <title>Test Feed</title>
        <link>http://example.com</link>
        <description>Test Description</description>
        <item>
            <title>Test Item</title>
            <link>http://example.com/item</link>
            <description>Test Item Description</description>
        </item>
    </channel>
</rss>"#;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn checker_for(feed_url: &str) -> FeedChecker {
        FeedChecker::from_config(&json!({
            "name": "Test Feed",
            "feed_url": feed_url,
            "timeout": 10
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn healthy_feed_reports_metadata() {
        let base =
            spawn_server(Router::new().route("/feed.xml", get(|| async { VALID_RSS }))).await;
        let checker = checker_for(&format!("{base}/feed.xml"));

        let state = checker.check().await;
        assert_eq!(state.status, ServiceStatus::Healthy);
        assert_eq!(state.detail("title"), Some(&json!("Test Feed")));
        assert_eq!(state.detail("entries_count"), Some(&json!(1)));
        // This feed carries no feed-level update time.
        assert_eq!(state.detail("last_updated"), Some(&json!("Unknown")));
    }

    #[tokio::test]
    async fn non_200_reports_http_status() {
        let base = spawn_server(
            Router::new().route("/feed.xml", get(|| async { StatusCode::NOT_FOUND })),
        )
        .await;
        let checker = checker_for(&format!("{base}/feed.xml"));

        let state = checker.check().await;
        assert_eq!(state.status, ServiceStatus::Unhealthy);
        assert_eq!(state.error_detail(), Some("HTTP 404"));
    }

    #[tokio::test]
    async fn malformed_feed_is_unhealthy() {
        let base = spawn_server(
            Router::new().route("/feed.xml", get(|| async { "this is not xml at all" })),
        )
        .await;
        let checker = checker_for(&format!("{base}/feed.xml"));

        let state = checker.check().await;
        assert_eq!(state.status, ServiceStatus::Unhealthy);
        assert!(!state.error_detail().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_is_unhealthy() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let checker = checker_for(&format!("http://{addr}/feed.xml"));

        let state = checker.check().await;
        assert_eq!(state.status, ServiceStatus::Unhealthy);
        assert!(!state.error_detail().unwrap().is_empty());
    }

    #[test]
    fn from_config_requires_feed_url() {
        let err = FeedChecker::from_config(&json!({"name": "feed"})).unwrap_err();
        assert!(err.to_string().contains("feed_url"));
    }

    #[test]
    fn schema_lists_required_keys() {
        let schema = FeedChecker::schema();
        assert_eq!(schema.required, vec!["name", "feed_url"]);
        assert_eq!(schema, FeedChecker::schema());
    }
}
