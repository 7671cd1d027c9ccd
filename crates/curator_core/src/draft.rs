//! The decoded draft metadata record.

use crate::{DraftStatus, Section, ValidationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// The full set of decoded section values for a session at a point in time,
/// as fed into the validation engine. Never contains the validation slot.
pub type Snapshot = BTreeMap<Section, Value>;

/// Decoded view of one stored draft row.
///
/// A session may accumulate several historical rows; the "current draft" is
/// the one with the greatest `created_at`. Sections absent from `sections`
/// were never written. A section whose stored text failed to decode is kept
/// as `Value::String(raw)` rather than failing the whole read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    /// Opaque unique identifier, immutable once assigned
    pub id: Uuid,
    /// Groups historical rows; one session has one current draft
    pub session_id: String,
    /// Lifecycle state
    pub status: DraftStatus,
    /// Decoded section values, keyed by section identifier
    pub sections: BTreeMap<Section, Value>,
    /// Decoded result of the last validation run, if any.
    ///
    /// Derived from the sections as they existed when validation last ran;
    /// not guaranteed current if sections changed since.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_results: Option<Value>,
    /// Set once at row creation, never changes
    pub created_at: DateTime<Utc>,
    /// Bumped on every field write
    pub updated_at: DateTime<Utc>,
}

impl DraftRecord {
    /// The decoded value of one section, if it was ever written.
    pub fn section(&self, section: Section) -> Option<&Value> {
        self.sections.get(&section)
    }

    /// The section values as a validation-engine snapshot.
    ///
    /// The validation slot is deliberately not part of the snapshot, so a
    /// validation run never sees its own prior output.
    pub fn snapshot(&self) -> Snapshot {
        self.sections.clone()
    }

    /// The last validation verdict, decoded to its typed form.
    ///
    /// Returns `None` when validation has never run or the stored value does
    /// not parse as a verdict.
    pub fn validation(&self) -> Option<ValidationResult> {
        self.validation_results
            .as_ref()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}
