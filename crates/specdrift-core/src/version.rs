//! Version helpers.
//!
//! Only OpenAPI 3.x documents are accepted. The check is a prefix match on the
//! declared `openapi` string, so `3.0.3` and `3.1.0` both pass.

use serde_json::Value;

use crate::errors::{DriftError, DriftResult};

/// Supported OpenAPI major versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenApiVersion {
    V3(String),
}

impl OpenApiVersion {
    /// Parse the declared `openapi` version string.
    pub fn parse(s: &str) -> DriftResult<Self> {
        if s.starts_with("3.") {
            Ok(Self::V3(s.to_string()))
        } else {
            Err(DriftError::UnsupportedSpecVersion {
                version: s.to_string(),
            })
        }
    }

    /// Read and validate the `openapi` field of a document.
    ///
    /// A missing field is reported as an empty version. A non-string value (YAML
    /// `openapi: 3.0` parses as a number) is reported with its JSON rendering.
    pub fn from_document(doc: &Value) -> DriftResult<Self> {
        match doc.get("openapi") {
            Some(Value::String(s)) => Self::parse(s),
            Some(other) => Err(DriftError::UnsupportedSpecVersion {
                version: other.to_string(),
            }),
            None => Err(DriftError::UnsupportedSpecVersion {
                version: String::new(),
            }),
        }
    }

    /// Return the declared version string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::V3(s) => s.as_str(),
        }
    }
}
