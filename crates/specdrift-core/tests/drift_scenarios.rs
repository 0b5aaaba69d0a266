//! drift_scenarios.rs
//!
//! End-to-end analyses of recorded responses against the shared users fixture
//! (`tests/fixtures/users_api.yaml` at the workspace root).

use std::fs;
use std::path::PathBuf;

use assert_matches::assert_matches;
use serde_json::{json, Value};
use specdrift_core::prelude::*;

const AT: &str = "2024-05-01T12:00:00Z";

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .unwrap()
        .to_path_buf()
}

fn users_spec() -> ParsedSpec {
    let path = repo_root().join("tests").join("fixtures").join("users_api.yaml");
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    ParsedSpec::parse_str(&text).unwrap()
}

fn recorded(method: HttpMethod, path: &str, status: u16, body: Value) -> RecordedResponse {
    RecordedResponse {
        status_code: status,
        headers: Default::default(),
        body,
        response_time_ms: 12.0,
        recorded_at: AT.to_string(),
        request: RequestConfig::new(method, format!("http://localhost:8080{path}")),
    }
}

fn analyze(method: HttpMethod, path: &str, status: u16, body: Value) -> Assessment {
    let spec = users_spec();
    assess(
        &spec,
        "users_api.yaml",
        path,
        method,
        200,
        &recorded(method, path, status, body),
        AT,
    )
    .unwrap()
}

fn valid_user() -> Value {
    json!({
        "id": 7,
        "email": "ada@example.com",
        "status": "active",
        "nickname": null,
        "updated_at": "2024-04-30T10:00:00Z",
        "address": {"city": "Lyon", "zip": "69001"},
        "tags": ["admin"]
    })
}

fn paths_of(req: &ReconcileRequest, ty: AnomalyType) -> Vec<String> {
    req.summary
        .anomalies
        .iter()
        .filter(|a| a.anomaly_type == ty)
        .map(|a| a.json_path.clone())
        .collect()
}

#[test]
fn fixture_indexes_operations_in_order() {
    let spec = users_spec();
    assert_eq!(spec.title, "Users API");
    assert_eq!(spec.version, "1.4.0");
    let ops: Vec<(String, HttpMethod)> = spec
        .operations
        .iter()
        .map(|op| (op.path.clone(), op.method))
        .collect();
    assert_eq!(
        ops,
        vec![
            ("/users".to_string(), HttpMethod::Get),
            ("/users".to_string(), HttpMethod::Post),
            ("/users/me".to_string(), HttpMethod::Get),
            ("/users/{user_id}".to_string(), HttpMethod::Get),
            ("/users/{user_id}".to_string(), HttpMethod::Delete),
        ]
    );
}

#[test]
fn refs_are_resolved_through_chains() {
    let spec = users_spec();
    let schema = spec
        .get_response_schema("/users/7", HttpMethod::Get, 200)
        .unwrap();
    assert_eq!(
        schema["properties"]["status"]["enum"],
        json!(["active", "inactive"])
    );
    assert_eq!(schema["properties"]["address"]["required"], json!(["city"]));
    assert!(!schema.to_string().contains("$ref"));
}

#[test]
fn literal_route_declared_first_wins() {
    let spec = users_spec();
    let op = spec.find_operation("/users/me", HttpMethod::Get).unwrap();
    assert_eq!(op.operation_id.as_deref(), Some("currentUser"));
    let op = spec.find_operation("/users/42", HttpMethod::Get).unwrap();
    assert_eq!(op.operation_id.as_deref(), Some("getUser"));
}

#[test]
fn documented_statuses_ignore_default() {
    let spec = users_spec();
    let op = spec.find_operation("/users/1", HttpMethod::Get).unwrap();
    assert_eq!(op.documented_status_codes(), vec![200, 404]);
}

#[test]
fn conforming_user_has_no_drift() {
    let out = analyze(HttpMethod::Get, "/users/7", 200, valid_user());
    assert_matches!(out, Assessment::NoDrift(report) => {
        assert_eq!(report.endpoint, "GET /users/7");
        assert_eq!(report.generated_at, AT);
        assert!(!report.has_drift);
    });
}

#[test]
fn list_with_null_timestamp_and_new_status() {
    let mut second = valid_user();
    second["id"] = json!(8);
    second["updated_at"] = Value::Null;
    second["status"] = json!("archived");

    let out = analyze(HttpMethod::Get, "/users", 200, json!([valid_user(), second]));
    let Assessment::Reconcile(req) = out else {
        panic!("expected drift");
    };

    assert_eq!(
        paths_of(&req, AnomalyType::MissingRequiredField),
        vec!["$[1].updated_at"]
    );
    assert_eq!(paths_of(&req, AnomalyType::TypeMismatch), vec!["$[1].updated_at"]);
    assert_eq!(paths_of(&req, AnomalyType::EnumViolation), vec!["$[1].status"]);
    assert_eq!(req.summary.total_count, 3);
    assert_eq!(req.endpoint_context, "GET /users");
}

#[test]
fn undocumented_fields_anywhere() {
    let mut user = valid_user();
    user["legacy_id"] = json!("u-7");
    user["address"]["country"] = json!("FR");

    let Assessment::Reconcile(req) = analyze(HttpMethod::Get, "/users/7", 200, user) else {
        panic!("expected drift");
    };
    assert_eq!(
        paths_of(&req, AnomalyType::AdditionalField),
        vec!["$.address.country", "$.legacy_id"]
    );
}

#[test]
fn missing_and_mistyped_fields() {
    let mut user = valid_user();
    user.as_object_mut().unwrap().remove("email");
    user["id"] = json!("7");
    user["tags"] = json!(["admin", 3]);

    let Assessment::Reconcile(req) = analyze(HttpMethod::Get, "/users/7", 200, user) else {
        panic!("expected drift");
    };
    assert_eq!(paths_of(&req, AnomalyType::MissingRequiredField), vec!["$.email"]);
    assert_eq!(paths_of(&req, AnomalyType::TypeMismatch), vec!["$.id", "$.tags[1]"]);

    let first = &req.summary.anomalies[0];
    assert_eq!(first.anomaly_type, AnomalyType::TypeMismatch);
    assert_eq!(first.message, "Expected integer but got string at $.id");
}

#[test]
fn undocumented_status_is_flagged_before_body_anomalies() {
    let Assessment::Reconcile(req) =
        analyze(HttpMethod::Get, "/users/7", 503, json!({"id": "x"}))
    else {
        panic!("expected drift");
    };
    let first = &req.summary.anomalies[0];
    assert_eq!(first.anomaly_type, AnomalyType::StatusCodeMismatch);
    assert_eq!(first.json_path, "$.status_code");
    assert_eq!(first.actual, json!(503));
    assert_eq!(first.expected, json!("One of: [200, 404]"));
}

#[test]
fn fragment_contains_only_the_matched_operation() {
    let Assessment::Reconcile(req) =
        analyze(HttpMethod::Get, "/users/7", 200, json!({"id": 7}))
    else {
        panic!("expected drift");
    };
    let item = req.fragment["paths"]["/users/{user_id}"].as_object().unwrap();
    assert_eq!(item.keys().collect::<Vec<_>>(), vec!["get"]);
    assert_eq!(item["get"]["operationId"], "getUser");
}

#[test]
fn missing_schema_is_an_error() {
    let spec = users_spec();
    let err = assess(
        &spec,
        "users_api.yaml",
        "/users/7",
        HttpMethod::Delete,
        204,
        &recorded(HttpMethod::Delete, "/users/7", 204, Value::Null),
        AT,
    )
    .unwrap_err();
    assert_matches!(err, DriftError::SchemaNotFound { status: 204, .. });
}

#[test]
fn reconcile_and_patch_round() {
    let mut user = valid_user();
    user["status"] = json!("archived");
    let Assessment::Reconcile(req) = analyze(HttpMethod::Get, "/users/7", 200, user) else {
        panic!("expected drift");
    };

    let decision = specdrift_core::reconcile::parse_decision(
        r#"{
            "decision": "UPDATE_SPEC",
            "confidence": 0.91,
            "proposed_changes": [{
                "change_type": "ADD_ENUM_VALUE",
                "json_path": "$.components.schemas.Status.enum",
                "reason": "archived users are returned",
                "backward_compatible": true
            }],
            "updated_openapi_fragment_json": "{\"components\":{\"schemas\":{\"Status\":{\"enum\":[\"active\",\"inactive\",\"archived\"]}}}}",
            "notes_for_humans": []
        }"#,
    )
    .unwrap();

    let report = conclude(req, decision, "users_api.yaml", AT, &DecisionConfig::default());
    assert!(report.has_drift);
    assert!(report.auto_update_recommended);

    let spec = users_spec();
    let fragment = report.updated_spec_fragment.as_ref().unwrap();
    let updated = specdrift_core::patch::apply_updates(spec.document(), fragment, None);
    assert_eq!(
        updated["components"]["schemas"]["Status"]["enum"],
        json!(["active", "inactive", "archived"])
    );
    assert_eq!(updated["components"]["schemas"]["Status"]["type"], "string");

    let diff = specdrift_core::patch::diff_lines(spec.document(), &updated).unwrap();
    assert!(diff.contains("+ "));
    assert!(diff.contains("archived"));
}
