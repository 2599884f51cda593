//! HTTP endpoint checker.
//!
//! Issues one request per check and compares the response status against the
//! configured expectation. The connection is scoped to the call: the client
//! is built on entry and dropped on every exit path.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::{Value, json};
use tracing::debug;

use vigil_core::{ConfigSchema, PropertyType, ServiceState, ServiceStatus};

use crate::{Checker, CheckerError, CheckerResult};

/// Exact error text for a probe that exceeded its timeout.
const TIMEOUT_ERROR: &str = "Request timed out";

/// Probes an HTTP endpoint for an expected response status.
#[derive(Debug)]
pub struct HttpChecker {
    name: String,
    url: Url,
    method: Method,
    timeout: Duration,
    expected_status: u16,
    headers: HashMap<String, String>,
    body: Option<Value>,
    verify_ssl: bool,
}

impl HttpChecker {
    pub fn schema() -> ConfigSchema {
        ConfigSchema::new()
            .required("name", PropertyType::String)
            .required("url", PropertyType::String)
            .optional("method", PropertyType::String, json!("GET"))
            .optional("timeout", PropertyType::Number, json!(30))
            .optional("expected_status", PropertyType::Integer, json!(200))
            .optional("headers", PropertyType::Object, json!({}))
            .optional("body", PropertyType::Object, Value::Null)
            .optional("verify_ssl", PropertyType::Boolean, json!(true))
    }

    /// Build a checker from a validated service config table.
    pub fn from_config(config: &Value) -> CheckerResult<Self> {
        Self::schema().validate(config)?;

        let name = config["name"].as_str().unwrap_or_default().to_string();

        let url = config["url"].as_str().unwrap_or_default();
        let url = Url::parse(url).map_err(|e| CheckerError::InvalidValue {
            key: "url",
            reason: e.to_string(),
        })?;

        let method = match config.get("method").and_then(Value::as_str) {
            Some(m) => Method::from_bytes(m.to_ascii_uppercase().as_bytes()).map_err(|_| {
                CheckerError::InvalidValue {
                    key: "method",
                    reason: format!("`{m}` is not an HTTP method"),
                }
            })?,
            None => Method::GET,
        };

        let timeout = parse_timeout(config, 30.0)?;

        let expected_status = match config.get("expected_status").and_then(Value::as_u64) {
            Some(code) => u16::try_from(code).map_err(|_| CheckerError::InvalidValue {
                key: "expected_status",
                reason: format!("`{code}` is not a valid status code"),
            })?,
            None => 200,
        };

        let mut headers = HashMap::new();
        if let Some(table) = config.get("headers").and_then(Value::as_object) {
            for (key, value) in table {
                let value = value.as_str().ok_or(CheckerError::InvalidValue {
                    key: "headers",
                    reason: format!("header `{key}` must be a string"),
                })?;
                headers.insert(key.clone(), value.to_string());
            }
        }

        let body = config.get("body").filter(|b| !b.is_null()).cloned();

        let verify_ssl = config
            .get("verify_ssl")
            .and_then(Value::as_bool)
            .unwrap_or(true);

        Ok(Self {
            name,
            url,
            method,
            timeout,
            expected_status,
            headers,
            body,
            verify_ssl,
        })
    }

    async fn probe(&self) -> Result<(u16, f64), reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.verify_ssl)
            .build()?;

        let mut request = client.request(self.method.clone(), self.url.clone());
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }
        if let Some(body) = &self.body {
            request = request.json(body);
        }

        let start = Instant::now();
        let response = request.send().await?;
        let elapsed = start.elapsed();

        // Round latency to two decimal places.
        let response_time_ms = (elapsed.as_secs_f64() * 1000.0 * 100.0).round() / 100.0;
        Ok((response.status().as_u16(), response_time_ms))
    }
}

#[async_trait]
impl Checker for HttpChecker {
    async fn check(&self) -> ServiceState {
        match self.probe().await {
            Ok((status_code, response_time_ms)) => {
                debug!(service = %self.name, status_code, response_time_ms, "endpoint responded");
                let state = if status_code == self.expected_status {
                    ServiceState::new(&self.name, ServiceStatus::Healthy)
                } else {
                    ServiceState::new(&self.name, ServiceStatus::Unhealthy).with_detail(
                        "error",
                        format!(
                            "Expected status {}, got {status_code}",
                            self.expected_status
                        ),
                    )
                };
                state
                    .with_detail("status_code", status_code)
                    .with_detail("response_time_ms", response_time_ms)
            }
            Err(e) if e.is_timeout() => ServiceState::failure(&self.name, TIMEOUT_ERROR),
            Err(e) => ServiceState::failure(&self.name, e.to_string()),
        }
    }

    fn config_schema(&self) -> ConfigSchema {
        Self::schema()
    }
}

fn parse_timeout(config: &Value, default_secs: f64) -> CheckerResult<Duration> {
    let secs = config
        .get("timeout")
        .and_then(Value::as_f64)
        .unwrap_or(default_secs);
    if !secs.is_finite() || secs <= 0.0 {
        return Err(CheckerError::InvalidValue {
            key: "timeout",
            reason: format!("`{secs}` is not a positive number of seconds"),
        });
    }
    Ok(Duration::from_secs_f64(secs))
}
