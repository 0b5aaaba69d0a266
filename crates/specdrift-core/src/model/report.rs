//! Final output of one drift analysis.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::anomaly::AnomalySummary;
use super::decision::LlmDecision;

/// Drift report for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    /// `"METHOD /concrete/path"`.
    pub endpoint: String,
    pub spec_path: String,
    /// RFC 3339 timestamp supplied by the caller; core never reads the clock.
    pub generated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly_summary: Option<AnomalySummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_decision: Option<LlmDecision>,
    pub has_drift: bool,
    pub auto_update_recommended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_spec_fragment: Option<Value>,
}
