//! Structured reconciliation output.
//!
//! The model is asked to follow [`output_schema`]. The updated fragment travels
//! as a JSON string (`updated_openapi_fragment_json`) because some providers
//! reject schemas with free-form object properties.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::{DriftError, DriftResult};
use crate::model::{ChangeInstruction, ChangeType, DecisionType, LlmDecision};

#[derive(Debug, Deserialize)]
struct RawDecision {
    decision: DecisionType,
    confidence: f64,
    #[serde(default)]
    proposed_changes: Vec<ChangeInstruction>,
    #[serde(default)]
    updated_openapi_fragment_json: Option<String>,
    #[serde(default)]
    notes_for_humans: Vec<String>,
}

/// JSON schema the reconciliation model must answer with.
pub fn output_schema() -> Value {
    let change_types: Vec<&str> = ChangeType::ALL.iter().map(ChangeType::as_str).collect();
    json!({
        "type": "object",
        "required": ["decision", "confidence", "proposed_changes", "notes_for_humans"],
        "properties": {
            "decision": {
                "type": "string",
                "enum": ["UPDATE_SPEC", "API_BUG", "NEEDS_REVIEW"]
            },
            "confidence": {"type": "number"},
            "proposed_changes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["change_type", "json_path", "reason", "backward_compatible"],
                    "properties": {
                        "change_type": {"type": "string", "enum": change_types},
                        "json_path": {"type": "string"},
                        "reason": {"type": "string"},
                        "backward_compatible": {"type": "boolean"}
                    }
                }
            },
            "updated_openapi_fragment_json": {
                "type": "string",
                "description": "JSON string of updated OpenAPI fragment, or empty string if not applicable"
            },
            "notes_for_humans": {
                "type": "array",
                "items": {"type": "string"}
            }
        }
    })
}

/// Parse and validate raw model output.
///
/// A fenced ```` ```json ```` block is accepted. A fragment string that is not
/// valid JSON is dropped with a warning rather than failing the decision.
pub fn parse_decision(text: &str) -> DriftResult<LlmDecision> {
    let body = strip_fence(text.trim());
    if body.is_empty() {
        return Err(DriftError::invalid_decision("empty response"));
    }

    let raw: RawDecision = serde_json::from_str(body)
        .map_err(|e| DriftError::invalid_decision(format!("malformed JSON: {e}")))?;

    if !(0.0..=1.0).contains(&raw.confidence) {
        return Err(DriftError::invalid_decision(format!(
            "confidence {} is outside [0, 1]",
            raw.confidence
        )));
    }

    let updated_openapi_fragment = match raw.updated_openapi_fragment_json.as_deref().map(str::trim)
    {
        None | Some("") => None,
        Some(s) => match serde_json::from_str::<Value>(s) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(error = %e, "could not parse updated_openapi_fragment_json");
                None
            }
        },
    };

    Ok(LlmDecision {
        decision: raw.decision,
        confidence: raw.confidence,
        proposed_changes: raw.proposed_changes,
        updated_openapi_fragment,
        notes_for_humans: raw.notes_for_humans,
    })
}

fn strip_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const UPDATE: &str = r#"{
        "decision": "UPDATE_SPEC",
        "confidence": 0.92,
        "proposed_changes": [{
            "change_type": "ADD_ENUM_VALUE",
            "json_path": "$.components.schemas.User.properties.status.enum",
            "reason": "archived is returned in production",
            "backward_compatible": true
        }],
        "updated_openapi_fragment_json": "{\"enum\": [\"active\", \"archived\"]}",
        "notes_for_humans": ["verify with the team"]
    }"#;

    #[test]
    fn parses_update() {
        let d = parse_decision(UPDATE).unwrap();
        assert_eq!(d.decision, DecisionType::UpdateSpec);
        assert_eq!(d.proposed_changes[0].change_type, ChangeType::AddEnumValue);
        assert_eq!(
            d.updated_openapi_fragment,
            Some(json!({"enum": ["active", "archived"]}))
        );
        assert_eq!(d.notes_for_humans.len(), 1);
    }

    #[test]
    fn fenced_output_accepted() {
        let fenced = format!("```json\n{UPDATE}\n```");
        assert!(parse_decision(&fenced).is_ok());
    }

    #[test]
    fn bad_fragment_is_dropped() {
        let d = parse_decision(
            r#"{"decision":"NEEDS_REVIEW","confidence":0.4,"updated_openapi_fragment_json":"{nope"}"#,
        )
        .unwrap();
        assert!(d.updated_openapi_fragment.is_none());
        assert!(d.proposed_changes.is_empty());
    }

    #[test]
    fn rejects_invalid_output() {
        assert_matches!(parse_decision("  "), Err(DriftError::InvalidDecision(_)));
        assert_matches!(parse_decision("not json"), Err(DriftError::InvalidDecision(_)));
        assert_matches!(
            parse_decision(r#"{"decision":"SHIP_IT","confidence":0.9}"#),
            Err(DriftError::InvalidDecision(_))
        );
        assert_matches!(
            parse_decision(r#"{"decision":"API_BUG","confidence":1.5}"#),
            Err(DriftError::InvalidDecision(_))
        );
    }

    #[test]
    fn schema_lists_change_types() {
        let s = output_schema();
        let listed = s["properties"]["proposed_changes"]["items"]["properties"]["change_type"]
            ["enum"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(listed, ChangeType::ALL.len());
    }
}
