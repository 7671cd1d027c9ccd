//! Postgres wiring tests for the draft and conversation stores.
//!
//! These tests require a running PostgreSQL database with the migrations
//! applied and `DATABASE_URL` set, so they are ignored by default:
//!
//! ```text
//! cargo test -p curator_database -- --ignored
//! ```

use curator_core::{DraftStatus, Field, Role, Section, Snapshot};
use curator_database::{establish_pool, PgConversationStore, PgDraftStore, PgPool};
use curator_interface::{ConversationStore, DraftStore};
use serde_json::json;

fn test_pool() -> PgPool {
    establish_pool().expect("DATABASE_URL must point at a migrated test database")
}

fn subject_sections() -> Snapshot {
    let mut sections = Snapshot::new();
    sections.insert(Section::Subject, json!({"subject_id": "553429"}));
    sections
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_then_get_current() {
    let store = PgDraftStore::new(test_pool());
    let session = format!("it-create-{}", uuid::Uuid::new_v4());

    assert!(store.get_current(&session).await.unwrap().is_none());

    let created = store.create(&session, &subject_sections()).await.unwrap();
    assert_eq!(created.status, DraftStatus::Draft);

    let current = store.get_current(&session).await.unwrap().unwrap();
    assert_eq!(current.id, created.id);
    assert_eq!(
        current.section(Section::Subject),
        Some(&json!({"subject_id": "553429"}))
    );

    assert!(store.delete_session(&session).await.unwrap());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_field_bumps_updated_at_only() {
    let store = PgDraftStore::new(test_pool());
    let session = format!("it-update-{}", uuid::Uuid::new_v4());

    let created = store.create(&session, &subject_sections()).await.unwrap();
    let updated = store
        .update_field(&session, Field::Section(Section::Rig), &json!({"rig_id": "rig-7"}))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.section(Section::Rig), Some(&json!({"rig_id": "rig-7"})));
    // The section written at creation survives.
    assert!(updated.section(Section::Subject).is_some());

    store.delete_session(&session).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_field_without_draft_is_not_found() {
    let store = PgDraftStore::new(test_pool());
    let session = format!("it-missing-{}", uuid::Uuid::new_v4());

    let outcome = store
        .update_field(&session, Field::Section(Section::Subject), &json!({"a": 1}))
        .await
        .unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_field_after_delete_is_not_found() {
    let store = PgDraftStore::new(test_pool());
    let session = format!("it-gone-{}", uuid::Uuid::new_v4());

    store.create(&session, &subject_sections()).await.unwrap();
    assert!(store.delete_session(&session).await.unwrap());

    // A write racing a delete must land on the not-found path, never panic.
    let outcome = store
        .update_field(&session, Field::Section(Section::Rig), &json!({"rig_id": "rig-7"}))
        .await
        .unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_confirm_does_not_reorder_listing() {
    let store = PgDraftStore::new(test_pool());
    let older = format!("it-older-{}", uuid::Uuid::new_v4());
    let newer = format!("it-newer-{}", uuid::Uuid::new_v4());

    store.create(&older, &subject_sections()).await.unwrap();
    store.create(&newer, &subject_sections()).await.unwrap();

    // Confirming the older draft bumps its updated_at but must not move it
    // ahead of the newer draft in a created_at-descending listing.
    let confirmed = store.confirm(&older).await.unwrap().unwrap();
    assert_eq!(confirmed.status, DraftStatus::Confirmed);

    let listed = store.list(None).await.unwrap();
    let newer_rank = listed.iter().position(|r| r.session_id == newer).unwrap();
    let older_rank = listed.iter().position(|r| r.session_id == older).unwrap();
    assert!(newer_rank < older_rank);

    let confirmed_only = store.list(Some(DraftStatus::Confirmed)).await.unwrap();
    assert!(confirmed_only.iter().any(|r| r.session_id == older));
    assert!(!confirmed_only.iter().any(|r| r.session_id == newer));

    store.delete_session(&older).await.unwrap();
    store.delete_session(&newer).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_session_removes_drafts_and_turns() {
    let pool = test_pool();
    let store = PgDraftStore::new(pool.clone());
    let conversations = PgConversationStore::new(pool);
    let session = format!("it-delete-{}", uuid::Uuid::new_v4());

    store.create(&session, &subject_sections()).await.unwrap();
    conversations
        .append_turn(&session, Role::User, "the subject is mouse 553429")
        .await
        .unwrap();

    assert!(store.delete_session(&session).await.unwrap());
    assert!(store.get_current(&session).await.unwrap().is_none());
    assert!(conversations.history(&session).await.unwrap().is_empty());

    // Deleting again finds nothing, which is an outcome, not an error.
    assert!(!store.delete_session(&session).await.unwrap());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_conversation_history_is_oldest_first() {
    let pool = test_pool();
    let store = PgDraftStore::new(pool.clone());
    let conversations = PgConversationStore::new(pool);
    let session = format!("it-history-{}", uuid::Uuid::new_v4());

    conversations
        .append_turn(&session, Role::User, "first")
        .await
        .unwrap();
    conversations
        .append_turn(&session, Role::Assistant, "second")
        .await
        .unwrap();

    let history = conversations.history(&session).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "first");
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].content, "second");

    store.delete_session(&session).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_history_of_unknown_session_is_empty() {
    let conversations = PgConversationStore::new(test_pool());
    let session = format!("it-nobody-{}", uuid::Uuid::new_v4());

    let history = conversations.history(&session).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_sessions_summarize_turns() {
    let pool = test_pool();
    let store = PgDraftStore::new(pool.clone());
    let conversations = PgConversationStore::new(pool);
    let session = format!("it-sessions-{}", uuid::Uuid::new_v4());

    conversations
        .append_turn(&session, Role::User, "I want to log a mouse experiment")
        .await
        .unwrap();
    conversations
        .append_turn(&session, Role::Assistant, "What is the subject id?")
        .await
        .unwrap();

    let summaries = conversations.sessions().await.unwrap();
    let summary = summaries
        .iter()
        .find(|s| s.session_id == session)
        .expect("session appears in the summary list");
    assert_eq!(summary.message_count, 2);
    assert_eq!(
        summary.first_message.as_deref(),
        Some("I want to log a mouse experiment")
    );

    store.delete_session(&session).await.unwrap();
}
