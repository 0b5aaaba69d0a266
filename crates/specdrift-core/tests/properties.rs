use std::collections::BTreeSet;

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use specdrift_core::diff::describe::summarize_value;
use specdrift_core::diff::detectors::{
    detect_additional_fields, detect_enum_violations, detect_type_mismatches,
};
use specdrift_core::openapi::match_path;
use specdrift_core::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,12}"
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z ]{0,80}".prop_map(Value::String),
    ]
}

fn body() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::vec((segment(), inner), 0..6)
                .prop_map(|kv| Value::Object(kv.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn user_schema() -> Schema {
    Schema::from_value(&json!({
        "type": "object",
        "required": ["id", "status"],
        "properties": {
            "id": {"type": "integer"},
            "status": {"type": "string", "enum": ["active", "inactive"]},
            "items": {"type": "array", "items": {"type": "object", "properties": {"n": {"type": "number"}}}}
        }
    }))
}

proptest! {
    #[test]
    fn compare_is_deterministic(b in body(), status in 100u16..600) {
        let schema = user_schema();
        let first = compare(Some(&b), status, Some(&schema), Some(&[200, 404][..]));
        let second = compare(Some(&b), status, Some(&schema), Some(&[200, 404][..]));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn summary_counts_add_up(b in body()) {
        let anomalies = compare(Some(&b), 200, Some(&user_schema()), None);
        let summary = summarize(anomalies, b);
        prop_assert_eq!(summary.counts_by_type.values().sum::<usize>(), summary.total_count);
        prop_assert!(summary.counts_by_type.values().all(|&c| c > 0));
    }

    #[test]
    fn every_path_is_rooted(b in body()) {
        for a in compare(Some(&b), 500, Some(&user_schema()), Some(&[200][..])) {
            prop_assert!(a.json_path.starts_with('$'));
        }
    }

    #[test]
    fn empty_schema_only_checks_status(b in body(), status in 100u16..600) {
        let empty = Schema::from_value(&json!({}));
        let out = compare(Some(&b), status, Some(&empty), Some(&[200][..]));
        prop_assert!(out.iter().all(|a| a.anomaly_type == AnomalyType::StatusCodeMismatch));
        prop_assert_eq!(out.len(), usize::from(status != 200));
    }

    #[test]
    fn concrete_paths_match_their_own_pattern(segs in proptest::collection::vec(segment(), 1..5)) {
        let concrete = format!("/{}", segs.join("/"));
        prop_assert!(match_path(&concrete, &concrete));

        let mut pattern_segs = segs.clone();
        pattern_segs[0] = "{id}".to_string();
        let pattern = format!("/{}/", pattern_segs.join("/"));
        prop_assert!(match_path(&concrete, &pattern));

        let longer = format!("{concrete}/extra");
        prop_assert!(!match_path(&longer, &concrete));
    }

    #[test]
    fn string_previews_are_bounded(s in "[a-z]{0,200}") {
        let preview = summarize_value(&Value::String(s.clone()));
        prop_assert!(preview.chars().count() <= 50 + 5);
        prop_assert_eq!(preview.ends_with("...\""), s.len() > 50);
    }

    #[test]
    fn additional_fields_are_key_set_difference(
        keys in proptest::collection::btree_set(segment(), 0..8),
        documented in proptest::collection::btree_set(segment(), 0..8),
        allow in proptest::option::of(any::<bool>()),
    ) {
        let mut schema = json!({
            "type": "object",
            "properties": documented.iter().map(|k| (k.clone(), json!({}))).collect::<Map<_, _>>()
        });
        if let Some(allow) = allow {
            schema["additionalProperties"] = json!(allow);
        }
        let value = Value::Object(keys.iter().map(|k| (k.clone(), json!(1))).collect());

        let reported: BTreeSet<String> = detect_additional_fields(&value, &Schema::from_value(&schema), "$")
            .into_iter()
            .map(|a| a.json_path)
            .collect();
        let expected: BTreeSet<String> = keys.difference(&documented).map(|k| format!("$.{k}")).collect();
        prop_assert_eq!(reported, expected);
    }

    #[test]
    fn enum_membership(members in proptest::collection::vec(leaf(), 1..6), probe in leaf()) {
        let schema = Schema::from_value(&json!({"enum": members.clone()}));
        let out = detect_enum_violations(&probe, &schema, "$");
        let expected = usize::from(!members.contains(&probe));
        prop_assert_eq!(out.len(), expected);
        for m in &members {
            prop_assert!(detect_enum_violations(m, &schema, "$").is_empty());
        }
    }

    #[test]
    fn booleans_never_satisfy_integer(b in any::<bool>()) {
        let schema = Schema::from_value(&json!({"type": "integer"}));
        let out = detect_type_mismatches(&json!(b), &schema, "$");
        prop_assert_eq!(out.len(), 1);
        prop_assert_eq!(out[0].anomaly_type, AnomalyType::TypeMismatch);
        prop_assert_eq!(&out[0].actual, &json!("boolean"));
    }
}

#[test]
fn archived_status_with_metadata() {
    let spec = ParsedSpec::parse_str(
        r#"
openapi: 3.0.3
info: {title: Items, version: "1"}
paths:
  /items/{id}:
    get:
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: object
                required: [id, name, status]
                properties:
                  id: {type: integer}
                  name: {type: string}
                  status: {type: string, enum: [active, inactive]}
"#,
    )
    .unwrap();
    let raw = spec.get_response_schema("/items/1", HttpMethod::Get, 200).unwrap();
    let body = json!({"id": 1, "name": "Test", "status": "archived", "metadata": {}});
    let documented = spec
        .find_operation("/items/1", HttpMethod::Get)
        .unwrap()
        .documented_status_codes();
    assert_eq!(documented, vec![200]);
    let out = compare(
        Some(&body),
        200,
        Some(&Schema::from_value(raw)),
        Some(documented.as_slice()),
    );
    let got: Vec<(AnomalyType, &str)> = out
        .iter()
        .map(|a| (a.anomaly_type, a.json_path.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (AnomalyType::AdditionalField, "$.metadata"),
            (AnomalyType::EnumViolation, "$.status"),
        ]
    );
}
