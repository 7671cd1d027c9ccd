//! Row types for the capture tables.

use crate::codec::{decode_text, encode_value};
use crate::schema::{conversations, draft_metadata};
use crate::DatabaseResult;
use chrono::{DateTime, Utc};
use curator_core::{ConversationTurn, DraftRecord, DraftStatus, Role, Section, Snapshot};
use curator_error::{DatabaseError, DatabaseErrorKind};
use diesel::prelude::*;
use uuid::Uuid;

/// One stored draft row, sections still encoded as text.
#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = draft_metadata)]
pub struct DraftRow {
    pub id: Uuid,
    pub session_id: String,
    pub status: String,
    pub subject: Option<String>,
    pub procedures: Option<String>,
    pub data_description: Option<String>,
    pub instrument: Option<String>,
    pub acquisition: Option<String>,
    pub session: Option<String>,
    pub processing: Option<String>,
    pub quality_control: Option<String>,
    pub rig: Option<String>,
    pub validation_results: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DraftRow {
    /// The encoded text of one section column.
    fn section_text(&self, section: Section) -> Option<&String> {
        match section {
            Section::Subject => self.subject.as_ref(),
            Section::Procedures => self.procedures.as_ref(),
            Section::DataDescription => self.data_description.as_ref(),
            Section::Instrument => self.instrument.as_ref(),
            Section::Acquisition => self.acquisition.as_ref(),
            Section::Session => self.session.as_ref(),
            Section::Processing => self.processing.as_ref(),
            Section::QualityControl => self.quality_control.as_ref(),
            Section::Rig => self.rig.as_ref(),
        }
    }

    /// Decode into the public record view.
    ///
    /// Section and validation columns decode best-effort; an unknown status
    /// is a storage-level fault and does fail the read.
    pub fn into_record(self) -> DatabaseResult<DraftRecord> {
        use strum::IntoEnumIterator;

        let status = DraftStatus::parse(&self.status).ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::Serialization(format!(
                "unknown draft status '{}'",
                self.status
            )))
        })?;

        let mut sections = Snapshot::new();
        for section in Section::iter() {
            if let Some(text) = self.section_text(section) {
                sections.insert(section, decode_text(text));
            }
        }

        Ok(DraftRecord {
            id: self.id,
            session_id: self.session_id,
            status,
            sections,
            validation_results: self.validation_results.as_deref().map(decode_text),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable draft row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = draft_metadata)]
pub struct NewDraftRow {
    pub id: Uuid,
    pub session_id: String,
    pub status: String,
    pub subject: Option<String>,
    pub procedures: Option<String>,
    pub data_description: Option<String>,
    pub instrument: Option<String>,
    pub acquisition: Option<String>,
    pub session: Option<String>,
    pub processing: Option<String>,
    pub quality_control: Option<String>,
    pub rig: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewDraftRow {
    /// Build a fresh draft row from decoded sections, encoding each through
    /// the serialization guard.
    pub fn from_sections(session_id: &str, sections: &Snapshot) -> DatabaseResult<Self> {
        let now = Utc::now();
        let mut row = Self {
            id: Uuid::new_v4(),
            session_id: session_id.to_string(),
            status: DraftStatus::Draft.as_str().to_string(),
            subject: None,
            procedures: None,
            data_description: None,
            instrument: None,
            acquisition: None,
            session: None,
            processing: None,
            quality_control: None,
            rig: None,
            created_at: now,
            updated_at: now,
        };
        for (section, value) in sections {
            let encoded = Some(encode_value(value)?);
            match section {
                Section::Subject => row.subject = encoded,
                Section::Procedures => row.procedures = encoded,
                Section::DataDescription => row.data_description = encoded,
                Section::Instrument => row.instrument = encoded,
                Section::Acquisition => row.acquisition = encoded,
                Section::Session => row.session = encoded,
                Section::Processing => row.processing = encoded,
                Section::QualityControl => row.quality_control = encoded,
                Section::Rig => row.rig = encoded,
            }
        }
        Ok(row)
    }
}

/// One stored conversation turn.
#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = conversations)]
pub struct ConversationRow {
    pub id: i32,
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationRow {
    /// Decode into the public turn view.
    pub fn into_turn(self) -> DatabaseResult<ConversationTurn> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::Serialization(format!(
                "unknown conversation role '{}'",
                self.role
            )))
        })?;
        Ok(ConversationTurn {
            session_id: self.session_id,
            role,
            content: self.content,
            created_at: self.created_at,
        })
    }
}

/// Insertable conversation turn.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = conversations)]
pub struct NewConversationRow {
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
