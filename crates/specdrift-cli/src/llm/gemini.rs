//! Gemini `generateContent` client used for semantic reconciliation.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use specdrift_core::model::LlmDecision;
use specdrift_core::pipeline::ReconcileRequest;
use specdrift_core::reconcile::{output_schema, parse_decision, SYSTEM_PROMPT};
use tracing::{debug, info};

use crate::error::CliError;

/// Connection and sampling settings for the reconciliation model.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: crate::args::DEFAULT_MODEL.to_string(),
            base_url: crate::args::DEFAULT_LLM_BASE_URL.to_string(),
            temperature: 0.1,
        }
    }
}

pub struct GeminiReconciler {
    client: reqwest::Client,
    api_key: String,
    config: LlmConfig,
}

impl GeminiReconciler {
    /// Fails with `MissingApiKey` before any network activity.
    pub fn new(config: LlmConfig, timeout: Duration) -> Result<Self, CliError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(CliError::MissingApiKey)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    pub async fn reconcile(&self, request: &ReconcileRequest) -> Result<LlmDecision, CliError> {
        let prompt = request.prompt();
        info!(
            model = %self.config.model,
            anomalies = request.summary.total_count,
            "invoking reconciliation model"
        );
        debug!(prompt_chars = prompt.len(), "prompt built");

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(&prompt, self.config.temperature))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CliError::LlmStatus {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        let text = parsed.first_text().ok_or(CliError::EmptyCompletion)?;
        debug!(response_chars = text.len(), "model responded");

        let decision = parse_decision(&text)?;
        info!(
            decision = %decision.decision,
            confidence = %format!("{:.0}%", decision.confidence * 100.0),
            "reconciliation decision"
        );
        Ok(decision)
    }
}

fn request_body(prompt: &str, temperature: f32) -> Value {
    json!({
        "systemInstruction": {"parts": [{"text": SYSTEM_PROMPT}]},
        "contents": [{"role": "user", "parts": [{"text": prompt}]}],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": gemini_schema(output_schema()),
            "temperature": temperature
        }
    })
}

/// Gemini spells schema types in upper case (`OBJECT`, `STRING`).
fn gemini_schema(v: Value) -> Value {
    match v {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| {
                    let v = match (k.as_str(), v) {
                        ("type", Value::String(t)) => Value::String(t.to_uppercase()),
                        // enum members are data, not schema
                        ("enum", v) => v,
                        (_, v) => gemini_schema(v),
                    };
                    (k, v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(gemini_schema).collect()),
        other => other,
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}
