//! HTTP request execution.
//!
//! One request, no retries. The body is decoded as JSON when the server says it
//! is JSON and kept as a string otherwise.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde_json::Value;
use specdrift_core::model::{HttpMethod, RecordedResponse, RequestConfig};
use tracing::{debug, info};
use url::Url;

use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    pub timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

pub async fn execute(
    config: &RequestConfig,
    exec: &ExecutorConfig,
) -> Result<RecordedResponse, CliError> {
    let raw_url = config.resolved_url();
    let url = Url::parse(&raw_url).map_err(|source| CliError::InvalidUrl {
        url: raw_url.clone(),
        source,
    })?;

    let client = reqwest::Client::builder().timeout(exec.timeout).build()?;
    let mut req = client.request(method_of(config.method), url.clone());
    if !config.query_params.is_empty() {
        req = req.query(&config.query_params);
    }
    for (name, value) in &config.headers {
        req = req.header(name.as_str(), value.as_str());
    }
    if let Some(token) = &config.auth_token {
        req = req.bearer_auth(token);
    }
    if let Some(body) = &config.body {
        req = req.json(body);
    }

    info!(method = %config.method, url = %url, "sending request");
    let started = Instant::now();
    let resp = req.send().await?;

    let status = resp.status().as_u16();
    let headers: BTreeMap<String, String> = resp
        .headers()
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
        .collect();
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let text = resp.text().await?;
    let response_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    let body = decode_body(text, is_json);
    info!(status, elapsed_ms = response_time_ms.round(), "received response");
    debug!(headers = headers.len(), "response headers");

    Ok(RecordedResponse {
        status_code: status,
        headers,
        body,
        response_time_ms,
        recorded_at: crate::cmd::timestamp()?,
        request: config.clone(),
    })
}

fn decode_body(text: String, is_json: bool) -> Value {
    if is_json {
        match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(_) => Value::String(text),
        }
    } else {
        Value::String(text)
    }
}

fn method_of(m: HttpMethod) -> Method {
    match m {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
    }
}

/// Parse a `Name: value` header argument.
pub fn parse_header(raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(CliError::InvalidHeader(raw.to_string())),
    }
}
