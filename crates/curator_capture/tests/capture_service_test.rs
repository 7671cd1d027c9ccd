//! Orchestrator tests over an in-memory draft store.

use async_trait::async_trait;
use chrono::Utc;
use curator_capture::CaptureService;
use curator_core::{
    DraftRecord, DraftStatus, Field, Section, Snapshot, ValidationStatus,
};
use curator_error::{CaptureErrorKind, CuratorErrorKind, CuratorResult};
use curator_interface::{CaptureRequest, DraftStore};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory draft store with the same append-then-select-latest contract
/// as the Postgres implementation.
#[derive(Default)]
struct MemoryStore {
    rows: Mutex<Vec<DraftRecord>>,
}

impl MemoryStore {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl DraftStore for MemoryStore {
    async fn create(&self, session_id: &str, sections: &Snapshot) -> CuratorResult<DraftRecord> {
        let now = Utc::now();
        let record = DraftRecord {
            id: Uuid::new_v4(),
            session_id: session_id.to_string(),
            status: DraftStatus::Draft,
            sections: sections.clone(),
            validation_results: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn get_current(&self, session_id: &str) -> CuratorResult<Option<DraftRecord>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .find(|r| r.session_id == session_id)
            .cloned())
    }

    async fn update_field(
        &self,
        session_id: &str,
        field: Field,
        value: &Value,
    ) -> CuratorResult<Option<DraftRecord>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(record) = rows.iter_mut().rev().find(|r| r.session_id == session_id) else {
            return Ok(None);
        };
        match field {
            Field::Section(section) => {
                record.sections.insert(section, value.clone());
            }
            Field::ValidationResults => record.validation_results = Some(value.clone()),
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn list(&self, status: Option<DraftStatus>) -> CuratorResult<Vec<DraftRecord>> {
        let rows = self.rows.lock().unwrap();
        let mut seen = std::collections::HashSet::new();
        let mut records = Vec::new();
        for record in rows.iter().rev() {
            if seen.insert(record.session_id.clone())
                && status.is_none_or(|s| record.status == s)
            {
                records.push(record.clone());
            }
        }
        Ok(records)
    }

    async fn confirm(&self, session_id: &str) -> CuratorResult<Option<DraftRecord>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(record) = rows.iter_mut().rev().find(|r| r.session_id == session_id) else {
            return Ok(None);
        };
        record.status = DraftStatus::Confirmed;
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete_session(&self, session_id: &str) -> CuratorResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.session_id != session_id);
        Ok(rows.len() < before)
    }
}

fn request(session_id: &str, sections: &[(&str, Value)]) -> CaptureRequest {
    CaptureRequest {
        session_id: session_id.to_string(),
        sections: sections
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn capture_kind(err: &curator_error::CuratorError) -> Option<&CaptureErrorKind> {
    match err.kind() {
        CuratorErrorKind::Capture(capture) => Some(&capture.kind),
        _ => None,
    }
}

#[tokio::test]
async fn test_empty_session_id_is_rejected() {
    let service = CaptureService::new(MemoryStore::new());
    let err = service
        .capture(request("", &[("subject", json!({"subject_id": "1"}))]))
        .await
        .unwrap_err();
    assert_eq!(capture_kind(&err), Some(&CaptureErrorKind::MissingSessionId));
}

#[tokio::test]
async fn test_all_null_sections_are_rejected() {
    let store = MemoryStore::new();
    let service = CaptureService::new(store.clone());
    let err = service
        .capture(request("sess-1", &[("subject", Value::Null)]))
        .await
        .unwrap_err();
    assert_eq!(capture_kind(&err), Some(&CaptureErrorKind::NoFieldsProvided));
    // Nothing was created.
    assert!(store.get_current("sess-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_first_capture_creates_draft_and_validates() {
    let store = MemoryStore::new();
    let service = CaptureService::new(store.clone());

    let outcome = service
        .capture(request(
            "sess-1",
            &[
                ("subject", json!({"subject_id": "553429"})),
                (
                    "data_description",
                    json!({
                        "modality": [{"abbreviation": "pophys"}],
                        "project_name": "BrainMap",
                    }),
                ),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(outcome.status, "saved");
    assert_eq!(
        outcome.fields_saved,
        vec!["subject".to_string(), "data_description".to_string()]
    );
    assert!(outcome.message.contains("2 metadata field(s)"));

    let draft = store.get_current("sess-1").await.unwrap().unwrap();
    let verdict = draft.validation().expect("verdict persisted with draft");
    assert_eq!(verdict.status, ValidationStatus::Valid);
    assert_eq!(verdict.completeness_score, 1.0);
    assert!(verdict.missing_required.is_empty());
}

#[tokio::test]
async fn test_merge_keeps_earlier_keys_and_replaces_nested_values() {
    let store = MemoryStore::new();
    let service = CaptureService::new(store.clone());

    service
        .capture(request(
            "sess-1",
            &[(
                "subject",
                json!({
                    "subject_id": "553429",
                    "species": {"name": "Mus musculus", "strain": "C57BL/6J"},
                }),
            )],
        ))
        .await
        .unwrap();
    service
        .capture(request(
            "sess-1",
            &[(
                "subject",
                json!({"sex": "Female", "species": {"name": "Mus musculus"}}),
            )],
        ))
        .await
        .unwrap();

    let draft = store.get_current("sess-1").await.unwrap().unwrap();
    let subject = draft.section(Section::Subject).unwrap();
    // Top-level keys from both calls survive.
    assert_eq!(subject["subject_id"], "553429");
    assert_eq!(subject["sex"], "Female");
    // The nested structure was replaced wholesale: no strain.
    assert_eq!(subject["species"], json!({"name": "Mus musculus"}));
}

#[tokio::test]
async fn test_sections_from_different_captures_accumulate() {
    let store = MemoryStore::new();
    let service = CaptureService::new(store.clone());

    service
        .capture(request(
            "sess-1",
            &[("subject", json!({"subject_id": "553429"}))],
        ))
        .await
        .unwrap();
    service
        .capture(request("sess-1", &[("rig", json!({"rig_id": "rig-7"}))]))
        .await
        .unwrap();

    let draft = store.get_current("sess-1").await.unwrap().unwrap();
    assert!(draft.section(Section::Subject).is_some());
    assert!(draft.section(Section::Rig).is_some());
}

#[tokio::test]
async fn test_pre_encoded_payload_matches_structured_payload() {
    let store = MemoryStore::new();
    let service = CaptureService::new(store.clone());

    service
        .capture(request(
            "structured",
            &[("subject", json!({"subject_id": "553429"}))],
        ))
        .await
        .unwrap();
    service
        .capture(request(
            "encoded",
            &[(
                "subject",
                Value::String("{\"subject_id\":\"553429\"}".to_string()),
            )],
        ))
        .await
        .unwrap();

    let structured = store.get_current("structured").await.unwrap().unwrap();
    let encoded = store.get_current("encoded").await.unwrap().unwrap();
    assert_eq!(
        structured.section(Section::Subject),
        encoded.section(Section::Subject)
    );
}

#[tokio::test]
async fn test_validation_runs_on_sections_only() {
    let store = MemoryStore::new();
    let service = CaptureService::new(store.clone());

    // First capture persists a verdict into the validation slot; a second
    // capture must validate the sections alone, not the stored verdict.
    service
        .capture(request(
            "sess-1",
            &[(
                "data_description",
                json!({"modality": [{"abbreviation": "ecephys"}]}),
            )],
        ))
        .await
        .unwrap();
    let first = store
        .get_current("sess-1")
        .await
        .unwrap()
        .unwrap()
        .validation()
        .unwrap();
    assert!(first.issues.iter().any(|i| i.field == "session"));

    service
        .capture(request(
            "sess-1",
            &[("session", json!({"session_start_time": "2026-08-01T09:00:00Z"}))],
        ))
        .await
        .unwrap();
    let second = store
        .get_current("sess-1")
        .await
        .unwrap()
        .unwrap()
        .validation()
        .unwrap();
    // Supplying the session section clears the cross-field warning.
    assert!(second.issues.iter().all(|i| i.field != "session"));
}

#[tokio::test]
async fn test_unrecognized_fields_are_skipped() {
    let store = MemoryStore::new();
    let service = CaptureService::new(store.clone());

    // Tool calls sometimes carry stray arguments alongside real sections;
    // the known section is saved and the stray key is dropped.
    let outcome = service
        .capture(request(
            "sess-1",
            &[
                ("subject", json!({"subject_id": "553429"})),
                ("lab_tracks_id", json!("LT-99")),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(outcome.fields_saved, vec!["subject".to_string()]);
    let draft = store.get_current("sess-1").await.unwrap().unwrap();
    assert_eq!(draft.sections.len(), 1);
    assert!(draft.section(Section::Subject).is_some());
}

#[tokio::test]
async fn test_only_unrecognized_fields_is_rejected() {
    let store = MemoryStore::new();
    let service = CaptureService::new(store.clone());

    let err = service
        .capture(request("sess-1", &[("lab_tracks_id", json!("LT-99"))]))
        .await
        .unwrap_err();
    assert_eq!(capture_kind(&err), Some(&CaptureErrorKind::NoFieldsProvided));
    assert!(store.get_current("sess-1").await.unwrap().is_none());
}
