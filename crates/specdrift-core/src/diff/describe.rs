//! Value-summary helpers used in anomaly `actual` fields and messages.

use itertools::Itertools;
use serde_json::Value;

use crate::config::SummaryConfig;

/// JSON type name of a runtime value.
///
/// Integral numbers report `integer`; everything else numeric reports `number`.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Short preview of a value, using default limits.
pub fn summarize_value(value: &Value) -> String {
    summarize_value_with(value, &SummaryConfig::default())
}

/// Short preview of a value.
///
/// - `null`, `true`/`false` and numbers render literally
/// - strings are quoted and truncated to `max_string_preview` characters plus `...`
/// - arrays render as `array[len]`
/// - objects render as `object{k1, k2, k3}` with at most `max_object_keys` keys
pub fn summarize_value_with(value: &Value, cfg: &SummaryConfig) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > cfg.max_string_preview {
                let head: String = s.chars().take(cfg.max_string_preview).collect();
                format!("\"{head}...\"")
            } else {
                format!("\"{s}\"")
            }
        }
        Value::Array(items) => format!("array[{}]", items.len()),
        Value::Object(map) => format!(
            "object{{{}}}",
            map.keys().take(cfg.max_object_keys).join(", ")
        ),
    }
}

/// Child path for an object member.
pub fn member_path(parent: &str, key: &str) -> String {
    format!("{parent}.{key}")
}

/// Child path for an array element.
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_names() {
        assert_eq!(type_name(&json!(1)), "integer");
        assert_eq!(type_name(&json!(1.5)), "number");
        assert_eq!(type_name(&json!(true)), "boolean");
        assert_eq!(type_name(&json!({})), "object");
    }

    #[test]
    fn previews() {
        assert_eq!(summarize_value(&json!(null)), "null");
        assert_eq!(summarize_value(&json!(false)), "false");
        assert_eq!(summarize_value(&json!(42)), "42");
        assert_eq!(summarize_value(&json!("hi")), "\"hi\"");
        assert_eq!(summarize_value(&json!([1, 2, 3])), "array[3]");
        assert_eq!(
            summarize_value(&json!({"a": 1, "b": 2, "c": 3, "d": 4})),
            "object{a, b, c}"
        );
        assert_eq!(summarize_value(&json!({})), "object{}");
    }

    #[test]
    fn long_strings_are_truncated() {
        let long = "x".repeat(60);
        let out = summarize_value(&json!(long));
        assert_eq!(out, format!("\"{}...\"", "x".repeat(50)));
    }

    #[test]
    fn paths() {
        assert_eq!(member_path("$", "a"), "$.a");
        assert_eq!(index_path("$.a", 2), "$.a[2]");
    }
}
