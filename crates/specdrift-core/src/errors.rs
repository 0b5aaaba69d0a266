//! Error types for specdrift-core.
//!
//! Resolution and lookup failures are fatal for the analysis that raised them and
//! propagate to the caller. Detection never fails: a value whose shape does not
//! fit its schema simply yields no anomalies from that subtree.

use thiserror::Error;

/// Result alias used across the core crate.
pub type DriftResult<T> = Result<T, DriftError>;

/// Errors surfaced by the core crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DriftError {
    #[error("unsupported OpenAPI version: {version:?} (only 3.x is supported)")]
    UnsupportedSpecVersion { version: String },

    #[error("cannot resolve reference {reference}: {reason}")]
    UnresolvableReference { reference: String, reason: String },

    #[error("circular reference detected at {reference}")]
    CircularReference { reference: String },

    #[error("no schema found for {method} {path} with status {status}")]
    SchemaNotFound {
        method: String,
        path: String,
        status: u16,
    },

    #[error("invalid OpenAPI document: {0}")]
    InvalidDocument(String),

    #[error("unsupported HTTP method: {0}")]
    InvalidMethod(String),

    #[error("invalid reconciliation decision: {0}")]
    InvalidDecision(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DriftError {
    pub fn unresolvable(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnresolvableReference {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    pub fn invalid_decision(msg: impl Into<String>) -> Self {
        Self::InvalidDecision(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Stable machine-readable code, suitable for JSON error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedSpecVersion { .. } => "spec.version.unsupported",
            Self::UnresolvableReference { .. } => "spec.ref.unresolvable",
            Self::CircularReference { .. } => "spec.ref.circular",
            Self::SchemaNotFound { .. } => "spec.schema.not_found",
            Self::InvalidDocument(_) => "spec.document.invalid",
            Self::InvalidMethod(_) => "http.method.invalid",
            Self::InvalidDecision(_) => "decision.invalid",
            Self::Serialization(_) => "serialization",
            Self::InvalidArgument(_) => "argument.invalid",
        }
    }
}

impl From<serde_json::Error> for DriftError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for DriftError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
