//! Configuration structures for specdrift-core.
//!
//! This module defines explicit, serializable configuration objects used by
//! higher-level components (CLI, services) to control decision gates and the
//! size of rendered summaries.
//!
//! The core crate itself does not read environment variables. All configuration
//! must be provided explicitly by the caller.

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::errors::{DriftError, DriftResult};

/// Global configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    #[serde(default)]
    pub decision: DecisionConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
}

/// Gates applied when turning a reconciliation decision into a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// Minimum confidence for an UPDATE_SPEC decision to be auto-applied.
    pub auto_update_threshold: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            auto_update_threshold: defaults::AUTO_UPDATE_CONFIDENCE_THRESHOLD,
        }
    }
}

/// Limits for value previews and rendered anomaly tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Strings longer than this are truncated in value previews.
    pub max_string_preview: usize,
    /// Number of keys listed when previewing an object.
    pub max_object_keys: usize,
    /// Rows shown in human-readable anomaly tables.
    pub max_rendered_anomalies: usize,
    /// Messages longer than this are truncated in human-readable tables.
    pub max_message_len: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_string_preview: 50,
            max_object_keys: 3,
            max_rendered_anomalies: 10,
            max_message_len: 60,
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &DriftConfig) -> DriftResult<()> {
    let t = cfg.decision.auto_update_threshold;
    if !(0.0..=1.0).contains(&t) {
        return Err(DriftError::invalid_argument(format!(
            "auto_update_threshold must be within [0, 1], got {t}"
        )));
    }

    if cfg.summary.max_string_preview == 0 {
        return Err(DriftError::invalid_argument(
            "max_string_preview must be greater than zero",
        ));
    }

    if cfg.summary.max_rendered_anomalies == 0 {
        return Err(DriftError::invalid_argument(
            "max_rendered_anomalies must be greater than zero",
        ));
    }

    if cfg.summary.max_message_len == 0 {
        return Err(DriftError::invalid_argument(
            "max_message_len must be greater than zero",
        ));
    }

    Ok(())
}
