//! PostgreSQL implementation of DraftStore.

use crate::codec::encode_value;
use crate::connection::PgPool;
use crate::models::{DraftRow, NewDraftRow};
use crate::schema::{conversations, draft_metadata};

use async_trait::async_trait;
use chrono::Utc;
use curator_core::{DraftRecord, DraftStatus, Field, Section, Snapshot};
use curator_error::{CuratorResult, DatabaseError, DatabaseErrorKind};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// PostgreSQL implementation of DraftStore using Diesel.
///
/// Diesel is synchronous, so every operation checks a connection out of the
/// r2d2 pool and runs on `tokio::task::spawn_blocking`. Operations for
/// different sessions never contend on a shared connection. Two concurrent
/// writes to the same session are not serialized: the last committed write
/// wins, which is the accepted tradeoff for the single-conversation-per-
/// session workload.
///
/// # Example
/// ```no_run
/// use curator_database::{establish_pool, PgDraftStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = establish_pool()?;
/// let store = PgDraftStore::new(pool);
/// // Use store.create(), get_current(), etc.
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PgDraftStore {
    pool: PgPool,
}

impl PgDraftStore {
    /// Create a new draft store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run a closure on a pooled connection inside `spawn_blocking`.
    async fn blocking<T, F>(&self, op: F) -> CuratorResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, DatabaseError> + Send + 'static,
    {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(DatabaseError::from)?;
            op(&mut conn)
        })
        .await
        .map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Query(format!(
                "blocking task failed: {e}"
            )))
        })?;
        Ok(result?)
    }
}

/// The most recently created row for a session, still encoded.
fn current_row(conn: &mut PgConnection, session: &str) -> Result<Option<DraftRow>, DatabaseError> {
    let row = draft_metadata::table
        .filter(draft_metadata::session_id.eq(session))
        .order(draft_metadata::created_at.desc())
        .first::<DraftRow>(conn)
        .optional()?;
    Ok(row)
}

/// Id of the current row for a session, if any.
fn current_row_id(conn: &mut PgConnection, session: &str) -> Result<Option<Uuid>, DatabaseError> {
    let id = draft_metadata::table
        .filter(draft_metadata::session_id.eq(session))
        .order(draft_metadata::created_at.desc())
        .select(draft_metadata::id)
        .first::<Uuid>(conn)
        .optional()?;
    Ok(id)
}

/// Overwrite one column of a row and bump `updated_at`. Returns the number
/// of rows touched; zero means the row vanished between lookup and write.
fn write_field(
    conn: &mut PgConnection,
    row_id: Uuid,
    field: Field,
    encoded: String,
) -> Result<usize, DatabaseError> {
    use crate::schema::draft_metadata::dsl;

    let now = Utc::now();
    let target = dsl::draft_metadata.filter(dsl::id.eq(row_id));
    let updated = match field {
        Field::Section(Section::Subject) => diesel::update(target)
            .set((dsl::subject.eq(encoded), dsl::updated_at.eq(now)))
            .execute(conn)?,
        Field::Section(Section::Procedures) => diesel::update(target)
            .set((dsl::procedures.eq(encoded), dsl::updated_at.eq(now)))
            .execute(conn)?,
        Field::Section(Section::DataDescription) => diesel::update(target)
            .set((dsl::data_description.eq(encoded), dsl::updated_at.eq(now)))
            .execute(conn)?,
        Field::Section(Section::Instrument) => diesel::update(target)
            .set((dsl::instrument.eq(encoded), dsl::updated_at.eq(now)))
            .execute(conn)?,
        Field::Section(Section::Acquisition) => diesel::update(target)
            .set((dsl::acquisition.eq(encoded), dsl::updated_at.eq(now)))
            .execute(conn)?,
        Field::Section(Section::Session) => diesel::update(target)
            .set((dsl::session.eq(encoded), dsl::updated_at.eq(now)))
            .execute(conn)?,
        Field::Section(Section::Processing) => diesel::update(target)
            .set((dsl::processing.eq(encoded), dsl::updated_at.eq(now)))
            .execute(conn)?,
        Field::Section(Section::QualityControl) => diesel::update(target)
            .set((dsl::quality_control.eq(encoded), dsl::updated_at.eq(now)))
            .execute(conn)?,
        Field::Section(Section::Rig) => diesel::update(target)
            .set((dsl::rig.eq(encoded), dsl::updated_at.eq(now)))
            .execute(conn)?,
        Field::ValidationResults => diesel::update(target)
            .set((dsl::validation_results.eq(encoded), dsl::updated_at.eq(now)))
            .execute(conn)?,
    };
    Ok(updated)
}

#[async_trait]
impl curator_interface::DraftStore for PgDraftStore {
    #[instrument(skip(self, sections), fields(sections = sections.len()))]
    async fn create(&self, session_id: &str, sections: &Snapshot) -> CuratorResult<DraftRecord> {
        let new_row = NewDraftRow::from_sections(session_id, sections)?;
        let record = self
            .blocking(move |conn| {
                let row: DraftRow = diesel::insert_into(draft_metadata::table)
                    .values(&new_row)
                    .get_result(conn)?;
                row.into_record()
            })
            .await?;
        info!(session_id, draft_id = %record.id, "created draft");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn get_current(&self, session_id: &str) -> CuratorResult<Option<DraftRecord>> {
        let session = session_id.to_string();
        self.blocking(move |conn| {
            current_row(conn, &session)?
                .map(DraftRow::into_record)
                .transpose()
        })
        .await
    }

    #[instrument(skip(self, value))]
    async fn update_field(
        &self,
        session_id: &str,
        field: Field,
        value: &Value,
    ) -> CuratorResult<Option<DraftRecord>> {
        let encoded = encode_value(value)?;
        let session = session_id.to_string();
        self.blocking(move |conn| {
            let Some(row_id) = current_row_id(conn, &session)? else {
                debug!(session_id = %session, "no draft to update");
                return Ok(None);
            };
            // The session may be deleted concurrently between the lookup and
            // the write; a zero-row update is then a not-found outcome.
            if write_field(conn, row_id, field, encoded)? == 0 {
                debug!(session_id = %session, "draft removed before write");
                return Ok(None);
            }
            current_row(conn, &session)?
                .map(DraftRow::into_record)
                .transpose()
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list(&self, status: Option<DraftStatus>) -> CuratorResult<Vec<DraftRecord>> {
        self.blocking(move |conn| {
            let rows = draft_metadata::table
                .order(draft_metadata::created_at.desc())
                .load::<DraftRow>(conn)?;

            // Newest-first ordering makes the first row per session the
            // current draft; older rows for the same session are history.
            let mut seen = HashSet::new();
            let mut records = Vec::new();
            for row in rows {
                if !seen.insert(row.session_id.clone()) {
                    continue;
                }
                let record = row.into_record()?;
                if status.is_none_or(|s| record.status == s) {
                    records.push(record);
                }
            }
            Ok(records)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn confirm(&self, session_id: &str) -> CuratorResult<Option<DraftRecord>> {
        let session = session_id.to_string();
        let record = self
            .blocking(move |conn| {
                let Some(row_id) = current_row_id(conn, &session)? else {
                    return Ok(None);
                };
                diesel::update(draft_metadata::table.filter(draft_metadata::id.eq(row_id)))
                    .set((
                        draft_metadata::status.eq(DraftStatus::Confirmed.as_str()),
                        draft_metadata::updated_at.eq(Utc::now()),
                    ))
                    .execute(conn)?;
                current_row(conn, &session)?
                    .map(DraftRow::into_record)
                    .transpose()
            })
            .await?;
        if let Some(record) = &record {
            info!(draft_id = %record.id, "confirmed draft");
        }
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, session_id: &str) -> CuratorResult<bool> {
        let session = session_id.to_string();
        let deleted = self
            .blocking(move |conn| {
                let turns = diesel::delete(
                    conversations::table.filter(conversations::session_id.eq(&session)),
                )
                .execute(conn)?;
                let drafts = diesel::delete(
                    draft_metadata::table.filter(draft_metadata::session_id.eq(&session)),
                )
                .execute(conn)?;
                Ok(turns + drafts > 0)
            })
            .await?;
        info!(deleted, "deleted session data");
        Ok(deleted)
    }
}
