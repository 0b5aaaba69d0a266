//! Decoding of OpenAPI document text.
//!
//! Documents arrive as YAML or JSON. JSON text (anything starting with `{`) is
//! decoded directly; everything else goes through `serde_yaml` and is converted
//! into a `serde_json::Value` so that the rest of the crate works on one tree
//! type. Mapping order is preserved, and scalar keys (YAML `200:`) become strings.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;

use crate::errors::{DriftError, DriftResult};

/// Decode YAML or JSON document text into a JSON tree.
pub fn parse_document_text(text: &str) -> DriftResult<Value> {
    if text.trim_start().starts_with('{') {
        return serde_json::from_str(text)
            .map_err(|e| DriftError::invalid_document(format!("failed to parse JSON: {e}")));
    }

    let yaml: Yaml = serde_yaml::from_str(text)
        .map_err(|e| DriftError::invalid_document(format!("failed to parse YAML: {e}")))?;
    yaml_to_json(yaml)
}

/// Convert a YAML tree into a JSON tree.
///
/// Tags are dropped. Non-finite floats (`.nan`, `.inf`) have no JSON form and
/// become `null`. Sequence or mapping keys are rejected.
pub fn yaml_to_json(yaml: Yaml) -> DriftResult<Value> {
    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<DriftResult<Vec<_>>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut out = Map::with_capacity(mapping.len());
            for (k, v) in mapping {
                out.insert(key_to_string(k)?, yaml_to_json(v)?);
            }
            Value::Object(out)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn key_to_string(key: Yaml) -> DriftResult<String> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => key_to_string(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(DriftError::invalid_document(
            "mapping keys must be scalars",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_numeric_keys_become_strings() {
        let v = parse_document_text("responses:\n  200:\n    description: ok\n").unwrap();
        assert_eq!(v, json!({"responses": {"200": {"description": "ok"}}}));
    }

    #[test]
    fn yaml_preserves_key_order() {
        let v = parse_document_text("b: 1\na: 2\nc: 3\n").unwrap();
        let keys: Vec<&String> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn json_text_is_accepted() {
        let v = parse_document_text(r#"  {"openapi": "3.0.0", "n": 1.5}"#).unwrap();
        assert_eq!(v["n"], 1.5);
    }

    #[test]
    fn malformed_text_is_invalid_document() {
        assert!(matches!(
            parse_document_text("{not json"),
            Err(DriftError::InvalidDocument(_))
        ));
        assert!(matches!(
            parse_document_text("a: [1, 2"),
            Err(DriftError::InvalidDocument(_))
        ));
    }

    #[test]
    fn complex_keys_rejected() {
        assert!(parse_document_text("? [a, b]\n: 1\n").is_err());
    }
}
