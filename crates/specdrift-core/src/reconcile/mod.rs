//! Reconciliation helpers.
//!
//! Builds the prompt handed to a reconciliation model and validates what comes
//! back. No client lives here; transports are the caller's concern.

pub mod payload;
pub mod prompt;

pub use payload::{output_schema, parse_decision};
pub use prompt::{build_reconciliation_prompt, format_anomalies, SYSTEM_PROMPT};
