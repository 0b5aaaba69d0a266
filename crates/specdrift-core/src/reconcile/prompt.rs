//! Prompt construction.

use std::fmt::Write as _;

use serde_json::Value;

use crate::model::AnomalySummary;

/// Instructions sent as the system prompt of every reconciliation request.
pub const SYSTEM_PROMPT: &str = "You are an API specification reconciliation expert. \
Your task is to analyze discrepancies between an OpenAPI specification and observed API \
behavior, then decide whether:

1. UPDATE_SPEC - The specification should be updated to match observed behavior
2. API_BUG - The API has a bug that should be fixed
3. NEEDS_REVIEW - Human review is required due to ambiguity

RULES:
- Be CONSERVATIVE. Prefer NEEDS_REVIEW when unsure.
- Consider BACKWARD COMPATIBILITY. Breaking changes require high confidence.
- Never invent undocumented business logic.
- Only propose MINIMAL spec changes - never refactor or beautify.
- Confidence must be > 0.85 for UPDATE_SPEC recommendations.

You must respond with valid JSON matching the required schema. No prose outside JSON.";

/// Render the user prompt for one drifting endpoint.
pub fn build_reconciliation_prompt(
    fragment: &Value,
    summary: &AnomalySummary,
    endpoint_context: &str,
) -> String {
    format!(
        "## Endpoint Context
{endpoint_context}

## Current OpenAPI Specification Fragment
```json
{fragment}
```

## Observed Response Sample
```json
{sample}
```

## Detected Anomalies ({total} total)
{anomalies}
## Task
Analyze the anomalies above and decide:
1. Should the OpenAPI spec be updated? (UPDATE_SPEC)
2. Is this an API bug? (API_BUG)
3. Does this need human review? (NEEDS_REVIEW)

For UPDATE_SPEC decisions, provide the minimal updated OpenAPI fragment.
Consider backward compatibility and real-world API evolution patterns.",
        fragment = pretty(fragment),
        sample = pretty(&summary.response_sample),
        total = summary.total_count,
        anomalies = format_anomalies(summary),
    )
}

/// Numbered, human-readable anomaly list. Each entry ends with a blank line.
pub fn format_anomalies(summary: &AnomalySummary) -> String {
    let mut out = String::new();
    for (i, a) in summary.anomalies.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}. [{}] at {}", i + 1, a.anomaly_type, a.json_path);
        let _ = writeln!(out, "   Expected: {}", inline(&a.expected));
        let _ = writeln!(out, "   Actual: {}", inline(&a.actual));
        let _ = writeln!(out, "   {}", a.message);
        out.push('\n');
    }
    out
}

fn pretty(v: &Value) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

fn inline(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
