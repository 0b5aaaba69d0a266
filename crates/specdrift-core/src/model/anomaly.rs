//! Anomaly records produced by the diff engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kinds of divergence the detectors can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyType {
    TypeMismatch,
    MissingRequiredField,
    AdditionalField,
    EnumViolation,
    StatusCodeMismatch,
}

impl AnomalyType {
    pub const ALL: [AnomalyType; 5] = [
        Self::TypeMismatch,
        Self::MissingRequiredField,
        Self::AdditionalField,
        Self::EnumViolation,
        Self::StatusCodeMismatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::AdditionalField => "ADDITIONAL_FIELD",
            Self::EnumViolation => "ENUM_VIOLATION",
            Self::StatusCodeMismatch => "STATUS_CODE_MISMATCH",
        }
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected divergence between an observed value and its declared schema.
///
/// Created once by a detector and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub anomaly_type: AnomalyType,
    /// JSONPath-like address rooted at `$` (`$.items[0].id`).
    pub json_path: String,
    /// What the schema declares.
    pub expected: Value,
    /// What was observed.
    pub actual: Value,
    pub message: String,
}

impl Anomaly {
    pub fn new(
        anomaly_type: AnomalyType,
        json_path: impl Into<String>,
        expected: impl Into<Value>,
        actual: impl Into<Value>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            anomaly_type,
            json_path: json_path.into(),
            expected: expected.into(),
            actual: actual.into(),
            message: message.into(),
        }
    }
}

/// Aggregated view of one analysis run, built once and read downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalySummary {
    pub total_count: usize,
    /// Occurrences per type. Types that never occurred have no entry.
    pub counts_by_type: BTreeMap<AnomalyType, usize>,
    pub anomalies: Vec<Anomaly>,
    /// The response body that produced the anomalies.
    pub response_sample: Value,
}

impl AnomalySummary {
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    pub fn count(&self, ty: AnomalyType) -> usize {
        self.counts_by_type.get(&ty).copied().unwrap_or(0)
    }
}
