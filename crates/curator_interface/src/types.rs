//! Wire types of the capture contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A batch of section updates from the conversational collaborator.
///
/// Section values may arrive as structures or as pre-encoded JSON strings;
/// the orchestrator normalizes both. Keys stay raw strings at the wire so a
/// tool call carrying an unrecognized argument never fails deserialization;
/// the orchestrator skips anything outside the section set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRequest {
    /// The conversation session this capture belongs to
    pub session_id: String,
    /// Zero or more named section payloads
    #[serde(flatten)]
    pub sections: BTreeMap<String, Value>,
}

/// Synchronous reply to a capture request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    /// `"saved"` on success
    pub status: String,
    /// The session the capture applied to
    pub session_id: String,
    /// Section names written in this call, in request order
    pub fields_saved: Vec<String>,
    /// Human-readable summary
    pub message: String,
}

impl CaptureOutcome {
    /// Build the standard success reply.
    pub fn saved(session_id: impl Into<String>, fields_saved: Vec<String>) -> Self {
        let message = format!(
            "Successfully saved {} metadata field(s)",
            fields_saved.len()
        );
        Self {
            status: "saved".to_string(),
            session_id: session_id.into(),
            fields_saved,
            message,
        }
    }
}
