//! Status code detection.

use itertools::Itertools;

use crate::model::{Anomaly, AnomalyType};

/// JSON path reported for status anomalies.
pub const STATUS_CODE_PATH: &str = "$.status_code";

/// Report `status` when it is not among the `documented` codes.
pub fn detect_status_mismatch(status: u16, documented: &[u16]) -> Vec<Anomaly> {
    if documented.contains(&status) {
        return Vec::new();
    }
    let listed = format!("[{}]", documented.iter().join(", "));
    vec![Anomaly::new(
        AnomalyType::StatusCodeMismatch,
        STATUS_CODE_PATH,
        format!("One of: {listed}"),
        status,
        format!("Status code {status} is not documented. Expected one of: {listed}"),
    )]
}
