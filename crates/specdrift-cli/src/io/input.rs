use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use url::Url;

/// Read spec text from an http(s) URL or a local file.
pub async fn read_spec_text(input: &str) -> Result<String> {
    if looks_like_url(input) {
        return fetch_url_text(input).await;
    }
    fs::read_to_string(input).with_context(|| format!("failed to read spec {input}"))
}

pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let v: Value = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid json in {}: {e}", path.display()))?;
    Ok(v)
}

async fn fetch_url_text(url: &str) -> Result<String> {
    let resp = reqwest::get(url).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("http error fetching {url}: {status}"));
    }
    Ok(resp.text().await?)
}

fn looks_like_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}
