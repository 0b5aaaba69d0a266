//! Undocumented field detection.
//!
//! Every key outside `properties` is reported, including when
//! `additionalProperties` allows it. An allowed extra field is still drift
//! between the documented contract and what the server sends.

use serde_json::Value;

use crate::diff::describe::{index_path, member_path, summarize_value};
use crate::model::{Anomaly, AnomalyType};
use crate::openapi::schema::Schema;

pub fn detect_additional_fields(value: &Value, schema: &Schema, path: &str) -> Vec<Anomaly> {
    match value {
        Value::Object(map) => {
            let mut out = Vec::new();
            for (key, child) in map {
                match schema.property(key) {
                    None => out.push(Anomaly::new(
                        AnomalyType::AdditionalField,
                        member_path(path, key),
                        "Field not documented in schema",
                        summarize_value(child),
                        format!("Undocumented field '{key}' found at {path}"),
                    )),
                    Some(child_schema) if child.is_object() || child.is_array() => {
                        out.extend(detect_additional_fields(
                            child,
                            child_schema,
                            &member_path(path, key),
                        ));
                    }
                    Some(_) => {}
                }
            }
            out
        }
        Value::Array(items) => match schema.items.as_deref() {
            Some(item_schema) => items
                .iter()
                .enumerate()
                .flat_map(|(i, item)| {
                    detect_additional_fields(item, item_schema, &index_path(path, i))
                })
                .collect(),
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}
