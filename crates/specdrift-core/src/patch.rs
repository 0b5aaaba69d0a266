//! Spec patching.
//!
//! Applies an updated fragment to a parsed OpenAPI document and renders the
//! result as YAML with a line-level change listing. Inputs are never mutated.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::errors::DriftResult;

/// Returned by [`diff_lines`] when both renderings are identical.
pub const NO_CHANGES: &str = "No changes detected";

/// Apply `fragment` to a copy of `original`.
///
/// With `json_path` (`$.paths./users.get`), the fragment replaces whatever sits
/// at that dotted path; missing or non-object intermediates become objects. An
/// empty path replaces the whole document. Without a path the fragment is
/// deep-merged: objects merge key by key, anything else is replaced.
pub fn apply_updates(original: &Value, fragment: &Value, json_path: Option<&str>) -> Value {
    let mut updated = original.clone();
    match json_path {
        Some(path) => set_path(&mut updated, path, fragment.clone()),
        None => deep_merge(&mut updated, fragment),
    }
    updated
}

fn set_path(doc: &mut Value, path: &str, value: Value) {
    let trimmed = path.trim_start_matches(['$', '.']).trim_end_matches('.');
    if trimmed.is_empty() {
        *doc = value;
        return;
    }

    let parts: Vec<&str> = trimmed.split('.').collect();
    let (last, parents) = match parts.split_last() {
        Some(split) => split,
        None => return,
    };

    let mut current = doc;
    for part in parents {
        coerce_object(current);
        let Value::Object(map) = current else {
            return;
        };
        current = map
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    coerce_object(current);
    if let Value::Object(map) = current {
        map.insert(last.to_string(), value);
    }
}

fn coerce_object(v: &mut Value) {
    if !v.is_object() {
        *v = Value::Object(Map::new());
    }
}

fn deep_merge(base: &mut Value, updates: &Value) {
    match (base, updates) {
        (Value::Object(base_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                match base_map.get_mut(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value);
                    }
                    Some(existing) => *existing = value.clone(),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, updates) => *base = updates.clone(),
    }
}

/// Render a document as YAML, keeping key order.
pub fn to_yaml(doc: &Value) -> DriftResult<String> {
    Ok(serde_yaml::to_string(doc)?)
}

/// Line-set difference between the YAML renderings of two documents.
///
/// Removed lines come first with a `- ` prefix, then added lines with `+ `.
pub fn diff_lines(original: &Value, updated: &Value) -> DriftResult<String> {
    let before = to_yaml(original)?;
    let after = to_yaml(updated)?;

    let before_set: HashSet<&str> = before.lines().collect();
    let after_set: HashSet<&str> = after.lines().collect();

    let removed = before
        .lines()
        .filter(|l| !after_set.contains(l))
        .map(|l| format!("- {l}"));
    let added = after
        .lines()
        .filter(|l| !before_set.contains(l))
        .map(|l| format!("+ {l}"));
    let out: Vec<String> = removed.chain(added).collect();

    if out.is_empty() {
        Ok(NO_CHANGES.to_string())
    } else {
        Ok(out.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> Value {
        json!({
            "openapi": "3.0.3",
            "components": {"schemas": {"User": {
                "type": "object",
                "properties": {"status": {"type": "string", "enum": ["active"]}}
            }}}
        })
    }

    #[test]
    fn deep_merge_keeps_siblings() {
        let original = spec();
        let fragment = json!({"components": {"schemas": {"User": {"properties": {
            "status": {"enum": ["active", "archived"]}
        }}}}});
        let updated = apply_updates(&original, &fragment, None);
        let status = &updated["components"]["schemas"]["User"]["properties"]["status"];
        assert_eq!(status["type"], "string");
        assert_eq!(status["enum"], json!(["active", "archived"]));
        assert_eq!(original, spec());
    }

    #[test]
    fn set_at_path_creates_intermediates() {
        let updated = apply_updates(
            &spec(),
            &json!({"type": "string"}),
            Some("$.components.schemas.Tag"),
        );
        assert_eq!(updated["components"]["schemas"]["Tag"], json!({"type": "string"}));

        let updated = apply_updates(&spec(), &json!(1), Some("$.x-meta.build"));
        assert_eq!(updated["x-meta"], json!({"build": 1}));
    }

    #[test]
    fn set_at_path_through_scalar() {
        let updated = apply_updates(&spec(), &json!(true), Some("openapi.flag"));
        assert_eq!(updated["openapi"], json!({"flag": true}));
    }

    #[test]
    fn empty_path_replaces_document() {
        let updated = apply_updates(&spec(), &json!({"openapi": "3.1.0"}), Some("$"));
        assert_eq!(updated, json!({"openapi": "3.1.0"}));
    }

    #[test]
    fn yaml_keeps_key_order() {
        let yaml = to_yaml(&json!({"zeta": 1, "alpha": 2})).unwrap();
        assert!(yaml.find("zeta").unwrap() < yaml.find("alpha").unwrap());
    }

    #[test]
    fn line_diff() {
        let original = json!({"a": 1, "b": 2});
        let updated = json!({"a": 1, "b": 3, "c": 4});
        assert_eq!(diff_lines(&original, &updated).unwrap(), "- b: 2\n+ b: 3\n+ c: 4");
        assert_eq!(diff_lines(&original, &original).unwrap(), NO_CHANGES);
    }
}
