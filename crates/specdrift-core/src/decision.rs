//! Decision classification.
//!
//! Turns a reconciliation decision into a final report and applies the
//! auto-update gate. Everything here is pure; timestamps are supplied by the
//! caller.

use tracing::debug;

use crate::config::DecisionConfig;
use crate::model::{AnomalySummary, DecisionType, DriftReport, LlmDecision};

/// Reconciliation is only worth asking for when something diverged.
pub fn should_invoke_llm(anomaly_count: usize) -> bool {
    anomaly_count > 0
}

/// Build the report for a run that produced anomalies.
///
/// Auto-update is recommended only for an UPDATE_SPEC decision whose
/// confidence reaches the configured threshold and whose proposed changes are
/// all backward compatible.
pub fn classify_decision(
    decision: LlmDecision,
    endpoint: &str,
    spec_path: &str,
    summary: AnomalySummary,
    generated_at: &str,
    cfg: &DecisionConfig,
) -> DriftReport {
    let auto_update = decision.decision == DecisionType::UpdateSpec
        && decision.confidence >= cfg.auto_update_threshold
        && decision.all_changes_compatible();

    debug!(
        decision = %decision.decision,
        confidence = decision.confidence,
        threshold = cfg.auto_update_threshold,
        auto_update,
        "classified decision"
    );

    DriftReport {
        endpoint: endpoint.to_string(),
        spec_path: spec_path.to_string(),
        generated_at: generated_at.to_string(),
        anomaly_summary: Some(summary),
        updated_spec_fragment: decision.updated_openapi_fragment.clone(),
        llm_decision: Some(decision),
        has_drift: true,
        auto_update_recommended: auto_update,
    }
}

pub fn no_drift_report(endpoint: &str, spec_path: &str, generated_at: &str) -> DriftReport {
    DriftReport {
        endpoint: endpoint.to_string(),
        spec_path: spec_path.to_string(),
        generated_at: generated_at.to_string(),
        anomaly_summary: None,
        llm_decision: None,
        has_drift: false,
        auto_update_recommended: false,
        updated_spec_fragment: None,
    }
}
