//! specdrift-core
//!
//! Core primitives for SpecDrift:
//! - OpenAPI 3.x document parsing with `$ref` resolution and operation lookup
//! - Deterministic schema diffing (type, required, additional, enum, status detectors)
//! - Anomaly summaries for downstream reconciliation
//! - Drift decision classification and reconciliation prompt helpers
//! - Spec patching and YAML rendering
//!
//! This crate performs no network or filesystem I/O. Callers fetch responses and
//! spec text, then hand in-memory values to the functions here.

pub mod config;
pub mod decision;
pub mod diff;
pub mod errors;
pub mod model;
pub mod openapi;
pub mod patch;
pub mod pipeline;
pub mod reconcile;
pub mod version;

pub use crate::errors::{DriftError, DriftResult};

/// Root of every anomaly JSON path.
pub const JSON_PATH_ROOT: &str = "$";

/// Default values shared by the CLI and library callers.
pub mod defaults {
    /// Confidence required before an UPDATE_SPEC decision is auto-applied.
    pub const AUTO_UPDATE_CONFIDENCE_THRESHOLD: f64 = 0.85;
    /// Status assumed when the caller does not name one.
    pub const EXPECTED_STATUS: u16 = 200;
    /// Title used when `info.title` is absent.
    pub const UNTITLED_API: &str = "Untitled API";
    /// Version used when `info.version` is absent.
    pub const UNVERSIONED_API: &str = "0.0.0";
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{DecisionConfig, DriftConfig, SummaryConfig};
    pub use crate::decision::{classify_decision, no_drift_report, should_invoke_llm};
    pub use crate::diff::{compare, summarize};
    pub use crate::model::{
        Anomaly, AnomalySummary, AnomalyType, ChangeInstruction, ChangeType, DecisionType,
        DriftReport, HttpMethod, LlmDecision, RecordedResponse, RequestConfig,
    };
    pub use crate::openapi::schema::Schema;
    pub use crate::openapi::{match_path, Operation, ParsedSpec};
    pub use crate::pipeline::{assess, conclude, Assessment, ReconcileRequest};
    pub use crate::{DriftError, DriftResult};
}
