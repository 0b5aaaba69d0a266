//! Deterministic diff engine.
//!
//! `compare` runs the status detector and then the four body detectors in a
//! fixed order (type, required, additional, enum). The same inputs always
//! yield the same anomalies in the same order.

pub mod describe;
pub mod detectors;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::{Anomaly, AnomalySummary};
use crate::openapi::schema::Schema;
use crate::JSON_PATH_ROOT;

use self::detectors::{
    detect_additional_fields, detect_enum_violations, detect_missing_required,
    detect_status_mismatch, detect_type_mismatches,
};

/// Compare one observed response against its documented contract.
///
/// - the status detector runs only when `documented_status_codes` is present
///   and non-empty
/// - the body detectors run only when the schema is non-empty and the body is
///   present and not null
pub fn compare(
    response_body: Option<&Value>,
    response_status: u16,
    response_schema: Option<&Schema>,
    documented_status_codes: Option<&[u16]>,
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    if let Some(codes) = documented_status_codes.filter(|c| !c.is_empty()) {
        anomalies.extend(detect_status_mismatch(response_status, codes));
    }

    let body = response_body.filter(|b| !b.is_null());
    let schema = response_schema.filter(|s| !s.is_empty());
    if let (Some(body), Some(schema)) = (body, schema) {
        anomalies.extend(detect_type_mismatches(body, schema, JSON_PATH_ROOT));
        anomalies.extend(detect_missing_required(body, schema, JSON_PATH_ROOT));
        anomalies.extend(detect_additional_fields(body, schema, JSON_PATH_ROOT));
        anomalies.extend(detect_enum_violations(body, schema, JSON_PATH_ROOT));
    }

    anomalies
}

/// Aggregate anomalies into a summary. Types with zero occurrences are omitted.
pub fn summarize(anomalies: Vec<Anomaly>, sample_body: Value) -> AnomalySummary {
    let mut counts_by_type = BTreeMap::new();
    for a in &anomalies {
        *counts_by_type.entry(a.anomaly_type).or_insert(0) += 1;
    }
    AnomalySummary {
        total_count: anomalies.len(),
        counts_by_type,
        anomalies,
        response_sample: sample_body,
    }
}
