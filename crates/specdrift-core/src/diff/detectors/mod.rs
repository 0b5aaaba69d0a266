//! Anomaly detectors.
//!
//! Each detector takes a runtime value, the schema node it was declared
//! against, and the JSON path of that value. Detectors are independent and
//! never fail; a value whose shape does not fit the schema contributes only the
//! anomalies the detector is responsible for.

pub mod additional;
pub mod enums;
pub mod required;
pub mod status;
pub mod types;

pub use additional::detect_additional_fields;
pub use enums::detect_enum_violations;
pub use required::detect_missing_required;
pub use status::detect_status_mismatch;
pub use types::detect_type_mismatches;
