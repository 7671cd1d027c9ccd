//! PostgreSQL implementation of ConversationStore.

use crate::connection::PgPool;
use crate::models::{ConversationRow, NewConversationRow};
use crate::schema::conversations;

use async_trait::async_trait;
use chrono::Utc;
use curator_core::{ConversationTurn, Role, SessionSummary};
use curator_error::{CuratorResult, DatabaseError, DatabaseErrorKind};
use diesel::prelude::*;
use tracing::instrument;

/// PostgreSQL implementation of ConversationStore.
///
/// Turns are append-only context for the orchestrator; they are removed only
/// when the whole session is deleted through the draft store.
#[derive(Clone)]
pub struct PgConversationStore {
    pool: PgPool,
}

impl PgConversationStore {
    /// Create a new conversation store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl curator_interface::ConversationStore for PgConversationStore {
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    async fn append_turn(&self, session_id: &str, role: Role, content: &str) -> CuratorResult<()> {
        let new_row = NewConversationRow {
            session_id: session_id.to_string(),
            role: role.as_str().to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(DatabaseError::from)?;
            diesel::insert_into(conversations::table)
                .values(&new_row)
                .execute(&mut conn)
                .map_err(DatabaseError::from)?;
            Ok::<_, DatabaseError>(())
        })
        .await
        .map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Query(format!(
                "blocking task failed: {e}"
            )))
        })??;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn history(&self, session_id: &str) -> CuratorResult<Vec<ConversationTurn>> {
        let session = session_id.to_string();
        let pool = self.pool.clone();
        let turns = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(DatabaseError::from)?;
            let rows = conversations::table
                .filter(conversations::session_id.eq(&session))
                .order(conversations::created_at.asc())
                .load::<ConversationRow>(&mut conn)
                .map_err(DatabaseError::from)?;
            rows.into_iter()
                .map(ConversationRow::into_turn)
                .collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Query(format!(
                "blocking task failed: {e}"
            )))
        })??;
        Ok(turns)
    }

    #[instrument(skip(self))]
    async fn sessions(&self) -> CuratorResult<Vec<SessionSummary>> {
        let pool = self.pool.clone();
        let turns = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(DatabaseError::from)?;
            let rows = conversations::table
                .order(conversations::created_at.asc())
                .load::<ConversationRow>(&mut conn)
                .map_err(DatabaseError::from)?;
            rows.into_iter()
                .map(ConversationRow::into_turn)
                .collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Query(format!(
                "blocking task failed: {e}"
            )))
        })??;
        Ok(SessionSummary::collect(&turns))
    }
}
