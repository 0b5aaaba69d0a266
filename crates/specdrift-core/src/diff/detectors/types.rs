//! Type mismatch detection.

use serde_json::Value;

use crate::diff::describe::{index_path, member_path, type_name};
use crate::model::{Anomaly, AnomalyType};
use crate::openapi::schema::Schema;

/// Compare the runtime kind of `value` with the declared `type` of `schema`.
///
/// A node without `type` is unconstrained and is not descended into. A
/// mismatching node is reported once and its children are skipped.
pub fn detect_type_mismatches(value: &Value, schema: &Schema, path: &str) -> Vec<Anomaly> {
    let Some(declared) = schema.ty.as_ref() else {
        return Vec::new();
    };

    if value.is_null() {
        if schema.allows_null() {
            return Vec::new();
        }
        return vec![Anomaly::new(
            AnomalyType::TypeMismatch,
            path,
            declared.to_value(),
            "null",
            format!("Expected {declared} but got null at {path}"),
        )];
    }

    if !declared.matches(value) {
        let actual = type_name(value);
        return vec![Anomaly::new(
            AnomalyType::TypeMismatch,
            path,
            declared.to_value(),
            actual,
            format!("Expected {declared} but got {actual} at {path}"),
        )];
    }

    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, child)| {
                schema
                    .property(key)
                    .map(|s| detect_type_mismatches(child, s, &member_path(path, key)))
            })
            .flatten()
            .collect(),
        Value::Array(items) => match schema.items.as_deref() {
            Some(item_schema) => items
                .iter()
                .enumerate()
                .flat_map(|(i, item)| detect_type_mismatches(item, item_schema, &index_path(path, i)))
                .collect(),
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}
