//! Reconciliation decision types.
//!
//! These mirror the structured output requested from the LLM. Parsing and
//! validation of raw model text lives in `crate::reconcile::payload`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a drift should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionType {
    UpdateSpec,
    ApiBug,
    NeedsReview,
}

impl DecisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpdateSpec => "UPDATE_SPEC",
            Self::ApiBug => "API_BUG",
            Self::NeedsReview => "NEEDS_REVIEW",
        }
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of spec edits a decision may propose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    AddEnumValue,
    MakeOptional,
    TypeWidening,
    AddExample,
    DocumentError,
    AddField,
    RemoveRequired,
}

impl ChangeType {
    pub const ALL: [ChangeType; 7] = [
        Self::AddEnumValue,
        Self::MakeOptional,
        Self::TypeWidening,
        Self::AddExample,
        Self::DocumentError,
        Self::AddField,
        Self::RemoveRequired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddEnumValue => "ADD_ENUM_VALUE",
            Self::MakeOptional => "MAKE_OPTIONAL",
            Self::TypeWidening => "TYPE_WIDENING",
            Self::AddExample => "ADD_EXAMPLE",
            Self::DocumentError => "DOCUMENT_ERROR",
            Self::AddField => "ADD_FIELD",
            Self::RemoveRequired => "REMOVE_REQUIRED",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single proposed change to the OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeInstruction {
    pub change_type: ChangeType,
    /// Location in the OpenAPI document to modify.
    pub json_path: String,
    pub reason: String,
    pub backward_compatible: bool,
}

/// Structured reconciliation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmDecision {
    pub decision: DecisionType,
    /// Always within `[0, 1]` once validated.
    pub confidence: f64,
    #[serde(default)]
    pub proposed_changes: Vec<ChangeInstruction>,
    /// Present only for UPDATE_SPEC decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_openapi_fragment: Option<Value>,
    #[serde(default)]
    pub notes_for_humans: Vec<String>,
}

impl LlmDecision {
    /// True when every proposed change is backward compatible.
    ///
    /// Vacuously true for a decision without proposed changes.
    pub fn all_changes_compatible(&self) -> bool {
        self.proposed_changes.iter().all(|c| c.backward_compatible)
    }
}
