//! SpecDrift data models.
//!
//! This module defines the strongly-typed Rust representations exchanged between
//! the diff engine, the reconciliation step and report renderers. Every type here
//! is serde-friendly so that it can be handed to an LLM prompt, written as JSON,
//! or read back from a recorded run.
//!
//! Models are mostly "dumb" data. Policy (gates, thresholds, limits) lives in
//! `crate::decision` and `crate::config`.

pub mod anomaly;
pub mod decision;
pub mod http;
pub mod report;

pub use anomaly::{Anomaly, AnomalySummary, AnomalyType};
pub use decision::{ChangeInstruction, ChangeType, DecisionType, LlmDecision};
pub use http::{HttpMethod, RecordedResponse, RequestConfig};
pub use report::DriftReport;
