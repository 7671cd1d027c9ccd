//! The capture orchestrator.

use crate::merge::merge_section;
use curator_core::{Field, Section, Snapshot};
use curator_error::{CaptureError, CaptureErrorKind, CuratorResult, DatabaseError};
use curator_interface::{CaptureOutcome, CaptureRequest, DraftStore};
use curator_validation::validate;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Sequences the store, merge policy, and validation engine for one capture
/// request.
///
/// Writes within a capture are not transactional: a failure mid-batch leaves
/// the sections written so far committed. Each section write is
/// independently idempotent, so the caller may simply retry. Concurrent
/// captures for the same session are not serialized (last write wins).
pub struct CaptureService {
    store: Arc<dyn DraftStore>,
}

impl CaptureService {
    /// Create a capture service over the given draft store.
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self { store }
    }

    /// Merge a batch of section updates into the session's draft, then
    /// re-validate the full draft and persist the verdict.
    ///
    /// Input-shape problems (`MissingSessionId`, `NoFieldsProvided`) are
    /// recoverable outcomes for the caller; they never mutate anything.
    #[instrument(skip_all, fields(session_id = %request.session_id))]
    pub async fn capture(&self, request: CaptureRequest) -> CuratorResult<CaptureOutcome> {
        if request.session_id.is_empty() {
            return Err(CaptureError::new(CaptureErrorKind::MissingSessionId).into());
        }

        // Collaborator payloads may arrive as JSON strings instead of parsed
        // structures, and tool calls sometimes carry stray arguments. Keep
        // only the known sections, normalized so the merge always sees
        // structures.
        let mut updates = Snapshot::new();
        for (name, value) in request.sections {
            let Some(section) = Section::parse(&name) else {
                debug!(field = %name, "skipping unrecognized field");
                continue;
            };
            if value.is_null() {
                continue;
            }
            updates.insert(section, normalize_payload(value));
        }
        if updates.is_empty() {
            return Err(CaptureError::new(CaptureErrorKind::NoFieldsProvided).into());
        }

        let session_id = &request.session_id;
        let fields_saved: Vec<String> = updates.keys().map(|s| s.as_str().to_string()).collect();

        match self.store.get_current(session_id).await? {
            None => {
                self.store.create(session_id, &updates).await?;
                info!(fields = ?fields_saved, "created new draft");
            }
            Some(draft) => {
                for (section, value) in &updates {
                    let merged = merge_section(draft.section(*section), value);
                    self.store
                        .update_field(session_id, Field::Section(*section), &merged)
                        .await?;
                }
                info!(fields = ?fields_saved, "merged into existing draft");
            }
        }

        // Re-read and validate the whole draft, never the validation slot
        // itself, then persist the verdict alongside the sections.
        if let Some(updated) = self.store.get_current(session_id).await? {
            let verdict = validate(&updated.snapshot());
            debug!(status = %verdict.status, score = verdict.completeness_score, "validated draft");
            let encoded = serde_json::to_value(&verdict).map_err(DatabaseError::from)?;
            self.store
                .update_field(session_id, Field::ValidationResults, &encoded)
                .await?;
        }

        Ok(CaptureOutcome::saved(session_id.clone(), fields_saved))
    }
}

/// Decode a pre-encoded string payload to its structure; leave everything
/// else untouched.
fn normalize_payload(value: Value) -> Value {
    match value {
        Value::String(text) => match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) => Value::String(text),
        },
        other => other,
    }
}
