//! Enum violation detection.

use itertools::Itertools;
use serde_json::Value;

use crate::diff::describe::{index_path, member_path};
use crate::model::{Anomaly, AnomalyType};
use crate::openapi::schema::Schema;

/// Check `enum` membership at every documented node.
///
/// Equality is exact JSON equality. An empty `enum` list admits nothing.
pub fn detect_enum_violations(value: &Value, schema: &Schema, path: &str) -> Vec<Anomaly> {
    let mut out = Vec::new();

    if let Some(allowed) = schema.enumeration.as_deref() {
        if !allowed.contains(value) {
            let listed = format!("[{}]", allowed.iter().map(Value::to_string).join(", "));
            out.push(Anomaly::new(
                AnomalyType::EnumViolation,
                path,
                format!("One of: {listed}"),
                value.clone(),
                format!(
                    "Value '{}' is not in allowed enum values {listed} at {path}",
                    bare(value)
                ),
            ));
        }
    }

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if let Some(child_schema) = schema.property(key) {
                    out.extend(detect_enum_violations(
                        child,
                        child_schema,
                        &member_path(path, key),
                    ));
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_schema) = schema.items.as_deref() {
                for (i, item) in items.iter().enumerate() {
                    out.extend(detect_enum_violations(item, item_schema, &index_path(path, i)));
                }
            }
        }
        _ => {}
    }

    out
}

// Strings render without quotes inside the message's own quotes.
fn bare(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
