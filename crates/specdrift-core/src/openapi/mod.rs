//! OpenAPI 3.x document model.
//!
//! `ParsedSpec` is built once from a document and then treated as read-only:
//! - the version is validated (`3.x` only)
//! - every operation is indexed by (path pattern, method), in document order
//! - request and response schemas are fully `$ref`-resolved at parse time
//! - the raw document is kept for fragment extraction and patching
//!
//! Lookups take a concrete request path (`/users/42`) and match it against the
//! indexed patterns (`/users/{user_id}`). When several patterns match, the first
//! one in declaration order wins; overlapping patterns are a spec-quality issue.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::defaults;
use crate::errors::{DriftError, DriftResult};
use crate::model::HttpMethod;
use crate::version::OpenApiVersion;

pub mod document;
pub mod paths;
pub mod refs;
pub mod schema;

pub use paths::match_path;
pub use refs::resolve_refs;

const JSON_MEDIA_TYPE: &str = "application/json";

/// One documented response of an operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resolved `application/json` schema, when the response declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// One (path pattern, method) entry of the operation index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub path: String,
    pub method: HttpMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_schema: Option<Value>,
    /// Every numeric status under `responses`.
    pub responses: BTreeMap<u16, ResponseEntry>,
    pub parameters: Vec<Value>,
}

impl Operation {
    /// Documented status codes, ascending.
    pub fn documented_status_codes(&self) -> Vec<u16> {
        self.responses.keys().copied().collect()
    }

    /// Resolved JSON schema for `status`, if the response declares JSON content.
    pub fn response_schema(&self, status: u16) -> Option<&Value> {
        self.responses.get(&status)?.schema.as_ref()
    }

    pub fn matches(&self, concrete_path: &str, method: HttpMethod) -> bool {
        self.method == method && match_path(concrete_path, &self.path)
    }
}

/// A parsed, fully indexed OpenAPI document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSpec {
    pub openapi_version: String,
    pub title: String,
    pub version: String,
    pub operations: Vec<Operation>,
    pub components: Value,
    raw: Value,
}

impl ParsedSpec {
    /// Parse YAML or JSON document text.
    pub fn parse_str(text: &str) -> DriftResult<Self> {
        Self::parse_value(document::parse_document_text(text)?)
    }

    /// Parse an already-decoded document.
    pub fn parse_value(raw: Value) -> DriftResult<Self> {
        if !raw.is_object() {
            return Err(DriftError::invalid_document("top-level value must be a mapping"));
        }

        let version = OpenApiVersion::from_document(&raw)?;

        let info = raw.get("info");
        let title = info
            .and_then(|i| i.get("title"))
            .and_then(Value::as_str)
            .unwrap_or(defaults::UNTITLED_API)
            .to_string();
        let api_version = info
            .and_then(|i| i.get("version"))
            .and_then(Value::as_str)
            .unwrap_or(defaults::UNVERSIONED_API)
            .to_string();

        let components = raw.get("components").cloned().unwrap_or_else(|| json!({}));

        let mut operations = Vec::new();
        if let Some(paths) = raw.get("paths").and_then(Value::as_object) {
            for (pattern, item) in paths {
                let Some(item) = item.as_object() else {
                    continue;
                };
                for (key, op) in item {
                    // `parameters`, `summary`, `servers` and extensions share the map.
                    let Some(method) = HttpMethod::ALL
                        .into_iter()
                        .find(|m| m.path_item_key() == key)
                    else {
                        continue;
                    };
                    operations.push(parse_operation(pattern, method, op, &raw)?);
                }
            }
        }

        debug!(
            title = %title,
            version = %api_version,
            operations = operations.len(),
            "indexed OpenAPI document"
        );

        Ok(Self {
            openapi_version: version.as_str().to_string(),
            title,
            version: api_version,
            operations,
            components,
            raw,
        })
    }

    /// The document exactly as it was parsed.
    pub fn document(&self) -> &Value {
        &self.raw
    }

    /// First indexed operation whose pattern matches `concrete_path` for `method`.
    pub fn find_operation(&self, concrete_path: &str, method: HttpMethod) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.matches(concrete_path, method))
    }

    /// Resolved response schema for (path, method, status).
    pub fn get_response_schema(
        &self,
        concrete_path: &str,
        method: HttpMethod,
        status: u16,
    ) -> Option<&Value> {
        self.find_operation(concrete_path, method)?
            .response_schema(status)
    }

    /// Like `get_response_schema`, but a miss is a `SchemaNotFound` error.
    pub fn require_response_schema(
        &self,
        concrete_path: &str,
        method: HttpMethod,
        status: u16,
    ) -> DriftResult<&Value> {
        self.get_response_schema(concrete_path, method, status)
            .ok_or_else(|| DriftError::SchemaNotFound {
                method: method.to_string(),
                path: concrete_path.to_string(),
                status,
            })
    }

    /// The raw operation for (path, method), wrapped as `{"paths": {pattern: {method: op}}}`.
    ///
    /// Returns `{}` when no operation matches.
    pub fn endpoint_fragment(&self, concrete_path: &str, method: HttpMethod) -> Value {
        let Some(op) = self.find_operation(concrete_path, method) else {
            return json!({});
        };
        let key = method.path_item_key();
        match self
            .raw
            .get("paths")
            .and_then(|p| p.get(&op.path))
            .and_then(|item| item.get(key))
        {
            Some(raw_op) => json!({ "paths": { op.path.clone(): { key: raw_op.clone() } } }),
            None => json!({}),
        }
    }
}

fn parse_operation(
    pattern: &str,
    method: HttpMethod,
    op: &Value,
    document: &Value,
) -> DriftResult<Operation> {
    let operation_id = op
        .get("operationId")
        .and_then(Value::as_str)
        .map(str::to_string);

    let parameters = op
        .get("parameters")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let request_schema = match op.get("requestBody") {
        Some(body) => resolve_json_schema(body, document)?,
        None => None,
    };

    let mut responses = BTreeMap::new();
    if let Some(defs) = op.get("responses").and_then(Value::as_object) {
        for (code, def) in defs {
            // `default` and range keys like `2XX` are not concrete statuses.
            let Ok(status) = code.parse::<u16>() else {
                continue;
            };
            let schema = resolve_json_schema(def, document)?;
            responses.insert(
                status,
                ResponseEntry {
                    description: def
                        .get("description")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    schema,
                },
            );
        }
    }

    Ok(Operation {
        path: pattern.to_string(),
        method,
        operation_id,
        request_schema,
        responses,
        parameters,
    })
}

/// The resolved `content["application/json"].schema` of a request body or response.
///
/// A JSON media type without a `schema` yields `{}` (documented, unconstrained);
/// no JSON media type at all yields `None`.
fn resolve_json_schema(def: &Value, document: &Value) -> DriftResult<Option<Value>> {
    let media = def
        .get("content")
        .and_then(|c| c.get(JSON_MEDIA_TYPE))
        .and_then(Value::as_object)
        .filter(|m| !m.is_empty());
    match media {
        Some(m) => match m.get("schema") {
            Some(s) => resolve_refs(s, document).map(Some),
            None => Ok(Some(json!({}))),
        },
        None => Ok(None),
    }
}
