//! Internal `$ref` resolution.
//!
//! References are JSON pointers into the single owned document (`#/components/...`).
//! Resolution is depth-first: a `$ref` node is replaced by its fully resolved
//! target, then the node's sibling keys are laid over the result. External
//! references are rejected, and so are cycles.

use serde_json::{Map, Value};
use tracing::trace;

use crate::errors::{DriftError, DriftResult};

const REF_KEY: &str = "$ref";

/// Resolve every `$ref` in `node` against `document`.
///
/// The result contains no references. Resolving an already-resolved node returns
/// an equal value. Any failure aborts the whole resolve; no partial schema is
/// returned.
pub fn resolve_refs(node: &Value, document: &Value) -> DriftResult<Value> {
    RefResolver::new(document).resolve(node)
}

/// Look up an internal JSON pointer (`#/a/b`) in `document`.
///
/// The target must be an object: references always name schema-like nodes.
pub fn lookup_pointer<'a>(document: &'a Value, reference: &str) -> DriftResult<&'a Value> {
    let pointer = reference.strip_prefix("#/").ok_or_else(|| {
        DriftError::unresolvable(reference, "only internal references (#/...) are supported")
    })?;

    let mut current = document;
    for raw in pointer.split('/') {
        let segment = unescape_segment(raw);
        let next = match current {
            Value::Object(map) => map.get(segment.as_str()),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        current = next.ok_or_else(|| {
            DriftError::unresolvable(reference, format!("segment '{segment}' not found"))
        })?;
    }

    if !current.is_object() {
        return Err(DriftError::unresolvable(
            reference,
            "reference does not resolve to a schema object",
        ));
    }
    Ok(current)
}

fn unescape_segment(raw: &str) -> String {
    raw.replace("~1", "/").replace("~0", "~")
}

struct RefResolver<'a> {
    document: &'a Value,
    /// References currently being expanded, outermost first.
    in_progress: Vec<String>,
}

impl<'a> RefResolver<'a> {
    fn new(document: &'a Value) -> Self {
        Self {
            document,
            in_progress: Vec::new(),
        }
    }

    fn resolve(&mut self, node: &Value) -> DriftResult<Value> {
        match node {
            Value::Object(map) => match map.get(REF_KEY) {
                Some(reference) => self.resolve_ref_node(reference, map),
                None => {
                    let mut out = Map::with_capacity(map.len());
                    for (k, v) in map {
                        out.insert(k.clone(), self.resolve(v)?);
                    }
                    Ok(Value::Object(out))
                }
            },
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve(item))
                .collect::<DriftResult<Vec<_>>>()
                .map(Value::Array),
            scalar => Ok(scalar.clone()),
        }
    }

    fn resolve_ref_node(&mut self, reference: &Value, node: &Map<String, Value>) -> DriftResult<Value> {
        let reference = reference.as_str().ok_or_else(|| {
            DriftError::unresolvable(reference.to_string(), "$ref must be a string")
        })?;

        if self.in_progress.iter().any(|r| r == reference) {
            return Err(DriftError::CircularReference {
                reference: reference.to_string(),
            });
        }

        let target = lookup_pointer(self.document, reference)?;
        trace!(reference, depth = self.in_progress.len(), "resolving $ref");

        self.in_progress.push(reference.to_string());
        let resolved = self.resolve(target);
        self.in_progress.pop();
        let mut resolved = resolved?;

        // Sibling keys override the shared component locally.
        if let Value::Object(out) = &mut resolved {
            for (k, v) in node {
                if k != REF_KEY {
                    out.insert(k.clone(), self.resolve(v)?);
                }
            }
        }
        Ok(resolved)
    }
}
