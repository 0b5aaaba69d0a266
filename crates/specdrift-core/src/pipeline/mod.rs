//! Analysis pipeline.
//!
//! Splits one endpoint analysis into two pure halves around the only
//! non-deterministic step, reconciliation:
//! - `assess` looks up the documented schema, runs the diff engine and either
//!   finishes with a no-drift report or hands back a `ReconcileRequest`
//! - `conclude` turns the reconciliation decision into the final report
//!
//! Callers own I/O: fetching the response, calling a model, reading the clock.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::DecisionConfig;
use crate::decision::{classify_decision, no_drift_report, should_invoke_llm};
use crate::diff::{compare, summarize};
use crate::errors::DriftResult;
use crate::model::{AnomalySummary, DriftReport, HttpMethod, LlmDecision, RecordedResponse};
use crate::openapi::schema::Schema;
use crate::openapi::ParsedSpec;
use crate::reconcile::build_reconciliation_prompt;

/// Everything a reconciler needs to decide about one drifting endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// `"METHOD /concrete/path"`.
    pub endpoint_context: String,
    /// `{"paths": {pattern: {method: operation}}}` for the matched operation.
    pub fragment: Value,
    pub summary: AnomalySummary,
}

impl ReconcileRequest {
    /// User prompt for this request.
    pub fn prompt(&self) -> String {
        build_reconciliation_prompt(&self.fragment, &self.summary, &self.endpoint_context)
    }
}

/// Outcome of the deterministic half of an analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    NoDrift(DriftReport),
    Reconcile(ReconcileRequest),
}

/// Run the deterministic analysis of `response` against the documented
/// `expected_status` schema of `method concrete_path`.
pub fn assess(
    spec: &ParsedSpec,
    spec_path: &str,
    concrete_path: &str,
    method: HttpMethod,
    expected_status: u16,
    response: &RecordedResponse,
    generated_at: &str,
) -> DriftResult<Assessment> {
    let endpoint = format!("{method} {concrete_path}");

    let raw_schema = spec.require_response_schema(concrete_path, method, expected_status)?;
    let schema = Schema::from_value(raw_schema);
    debug!(endpoint = %endpoint, status = expected_status, "found response schema");

    let documented = spec
        .find_operation(concrete_path, method)
        .map(|op| op.documented_status_codes())
        .unwrap_or_default();

    let anomalies = compare(
        Some(&response.body),
        response.status_code,
        Some(&schema),
        Some(documented.as_slice()),
    );
    info!(endpoint = %endpoint, anomalies = anomalies.len(), "diff complete");
    for (i, a) in anomalies.iter().enumerate() {
        info!(index = i + 1, kind = %a.anomaly_type, path = %a.json_path, "anomaly");
        debug!(expected = %a.expected, actual = %a.actual, "anomaly detail");
    }

    if !should_invoke_llm(anomalies.len()) {
        return Ok(Assessment::NoDrift(no_drift_report(
            &endpoint,
            spec_path,
            generated_at,
        )));
    }

    let summary = summarize(anomalies, response.body.clone());
    let fragment = spec.endpoint_fragment(concrete_path, method);
    Ok(Assessment::Reconcile(ReconcileRequest {
        endpoint_context: endpoint,
        fragment,
        summary,
    }))
}

/// Finish an analysis once a reconciliation decision is available.
pub fn conclude(
    request: ReconcileRequest,
    decision: LlmDecision,
    spec_path: &str,
    generated_at: &str,
    cfg: &DecisionConfig,
) -> DriftReport {
    let report = classify_decision(
        decision,
        &request.endpoint_context,
        spec_path,
        request.summary,
        generated_at,
        cfg,
    );
    info!(
        endpoint = %report.endpoint,
        auto_update = report.auto_update_recommended,
        "report generated"
    );
    report
}
