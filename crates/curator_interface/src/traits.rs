//! Trait definitions for draft and conversation persistence.

use async_trait::async_trait;
use curator_core::{ConversationTurn, DraftRecord, DraftStatus, Field, Role, SessionSummary, Snapshot};
use curator_error::CuratorResult;
use serde_json::Value;

/// Persistence contract for draft metadata records.
///
/// "Not found" is a distinct outcome from an error: operations targeting a
/// session with no current draft return `Ok(None)` (or `Ok(false)` for
/// deletion) so callers can distinguish "nothing yet" from a failure. No
/// method blocks the caller for other sessions' work.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Create a new draft for the session, populated with the given
    /// sections, status `draft`, a fresh id and timestamps.
    async fn create(&self, session_id: &str, sections: &Snapshot) -> CuratorResult<DraftRecord>;

    /// The current draft for the session (most recently created row), with
    /// every stored section decoded best-effort, or `None`.
    async fn get_current(&self, session_id: &str) -> CuratorResult<Option<DraftRecord>>;

    /// Overwrite exactly one field of the current draft and bump its
    /// `updated_at`. `Ok(None)` when the session has no draft.
    async fn update_field(
        &self,
        session_id: &str,
        field: Field,
        value: &Value,
    ) -> CuratorResult<Option<DraftRecord>>;

    /// All current-draft rows across sessions, newest-created first,
    /// optionally restricted to one status.
    async fn list(&self, status: Option<DraftStatus>) -> CuratorResult<Vec<DraftRecord>>;

    /// Mark the current draft confirmed. `Ok(None)` when the session has no
    /// draft.
    async fn confirm(&self, session_id: &str) -> CuratorResult<Option<DraftRecord>>;

    /// Remove all drafts and conversation turns for the session. `Ok(false)`
    /// when there was nothing to remove.
    async fn delete_session(&self, session_id: &str) -> CuratorResult<bool>;
}

/// Persistence contract for append-only conversation turns.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Persist a single turn.
    async fn append_turn(&self, session_id: &str, role: Role, content: &str) -> CuratorResult<()>;

    /// Full history for a session, oldest first. A session with no turns
    /// yields an empty history, not an error.
    async fn history(&self, session_id: &str) -> CuratorResult<Vec<ConversationTurn>>;

    /// One summary per session that has at least one turn, most recently
    /// active first.
    async fn sessions(&self) -> CuratorResult<Vec<SessionSummary>>;
}
