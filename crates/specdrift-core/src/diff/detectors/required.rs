//! Missing required field detection.

use serde_json::Value;

use crate::diff::describe::{index_path, member_path};
use crate::model::{Anomaly, AnomalyType};
use crate::openapi::schema::Schema;

/// Report required names that are absent, or present as `null` when the
/// property schema does not admit null.
pub fn detect_missing_required(value: &Value, schema: &Schema, path: &str) -> Vec<Anomaly> {
    match value {
        Value::Object(map) => {
            let mut out = Vec::new();

            for name in &schema.required {
                match map.get(name) {
                    None => out.push(Anomaly::new(
                        AnomalyType::MissingRequiredField,
                        member_path(path, name),
                        format!("Required field '{name}'"),
                        "Field missing",
                        format!("Required field '{name}' is missing at {path}"),
                    )),
                    Some(Value::Null)
                        if !schema.property(name).is_some_and(Schema::allows_null) =>
                    {
                        out.push(Anomaly::new(
                            AnomalyType::MissingRequiredField,
                            member_path(path, name),
                            format!("Non-null value for required field '{name}'"),
                            "null",
                            format!("Required field '{name}' is null at {path}"),
                        ))
                    }
                    Some(_) => {}
                }
            }

            for (key, child) in map {
                if !(child.is_object() || child.is_array()) {
                    continue;
                }
                if let Some(child_schema) = schema.property(key) {
                    out.extend(detect_missing_required(
                        child,
                        child_schema,
                        &member_path(path, key),
                    ));
                }
            }

            out
        }
        Value::Array(items) => match schema.items.as_deref() {
            Some(item_schema) => items
                .iter()
                .enumerate()
                .flat_map(|(i, item)| {
                    detect_missing_required(item, item_schema, &index_path(path, i))
                })
                .collect(),
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}
