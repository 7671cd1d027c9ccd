//! HTTP API exposing the capture contract points.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use curator_capture::CaptureService;
use curator_core::{DraftStatus, Field};
use curator_error::{
    CaptureError, CaptureErrorKind, CuratorError, CuratorErrorKind, DatabaseErrorKind,
};
use curator_interface::{CaptureRequest, ConversationStore, DraftStore};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

/// Shared state: the store handles and the capture service over them.
#[derive(Clone)]
pub struct ApiState {
    store: Arc<dyn DraftStore>,
    conversations: Arc<dyn ConversationStore>,
    capture: Arc<CaptureService>,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(
        store: Arc<dyn DraftStore>,
        conversations: Arc<dyn ConversationStore>,
        capture: Arc<CaptureService>,
    ) -> Self {
        Self {
            store,
            conversations,
            capture,
        }
    }
}

/// Creates the capture API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/capture", post(capture))
        .route("/drafts", get(list_drafts))
        .route("/sessions", get(list_sessions))
        .route("/sessions/:session_id/messages", get(session_messages))
        .route("/sessions/:session_id/draft", get(get_draft))
        .route("/sessions/:session_id/draft/:field", put(update_field))
        .route("/sessions/:session_id/confirm", post(confirm))
        .route("/sessions/:session_id", delete(delete_session))
        .route("/sessions/:session_id/validation", get(get_validation))
        .with_state(state)
}

/// Map a core error to a response payload; input errors are the caller's to
/// fix, everything else is a generic failure.
fn error_response(err: CuratorError) -> (StatusCode, Json<Value>) {
    let status = match err.kind() {
        CuratorErrorKind::Capture(_) => StatusCode::BAD_REQUEST,
        CuratorErrorKind::Database(db) => {
            error!(%db, "persistence failure");
            match db.kind {
                DatabaseErrorKind::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    };
    (
        status,
        Json(json!({"status": "error", "error": err.to_string()})),
    )
}

fn not_found(what: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"status": "error", "error": format!("{what} not found")})),
    )
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Capture a batch of section updates.
async fn capture(
    State(state): State<ApiState>,
    Json(request): Json<CaptureRequest>,
) -> impl IntoResponse {
    match state.capture.capture(request).await {
        Ok(outcome) => (StatusCode::OK, Json(serde_json::to_value(outcome).unwrap_or_default())),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    status: Option<String>,
}

/// List current drafts across sessions, optionally by status.
async fn list_drafts(
    State(state): State<ApiState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let status = match params.status.as_deref() {
        None => None,
        Some(name) => match DraftStatus::parse(name) {
            Some(status) => Some(status),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"status": "error", "error": format!("unknown status '{name}'")})),
                );
            }
        },
    };
    match state.store.list(status).await {
        Ok(records) => (
            StatusCode::OK,
            Json(serde_json::to_value(records).unwrap_or_default()),
        ),
        Err(err) => error_response(err),
    }
}

/// One summary per session with conversation activity, most recent first.
async fn list_sessions(State(state): State<ApiState>) -> impl IntoResponse {
    match state.conversations.sessions().await {
        Ok(summaries) => (
            StatusCode::OK,
            Json(serde_json::to_value(summaries).unwrap_or_default()),
        ),
        Err(err) => error_response(err),
    }
}

/// Conversation history for a session, oldest first. A session with no
/// recorded turns yields an empty list, not a 404.
async fn session_messages(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.conversations.history(&session_id).await {
        Ok(turns) => (
            StatusCode::OK,
            Json(serde_json::to_value(turns).unwrap_or_default()),
        ),
        Err(err) => error_response(err),
    }
}

/// The current draft for a session.
async fn get_draft(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_current(&session_id).await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(serde_json::to_value(record).unwrap_or_default()),
        ),
        Ok(None) => not_found("draft"),
        Err(err) => error_response(err),
    }
}

/// Overwrite one field of a session's draft.
async fn update_field(
    State(state): State<ApiState>,
    Path((session_id, field_name)): Path<(String, String)>,
    Json(value): Json<Value>,
) -> impl IntoResponse {
    let Some(field) = Field::parse(&field_name) else {
        return error_response(CaptureError::new(CaptureErrorKind::UnknownField(field_name)).into());
    };
    match state.store.update_field(&session_id, field, &value).await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(serde_json::to_value(record).unwrap_or_default()),
        ),
        Ok(None) => not_found("draft"),
        Err(err) => error_response(err),
    }
}

/// Confirm a session's draft.
async fn confirm(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.store.confirm(&session_id).await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(serde_json::to_value(record).unwrap_or_default()),
        ),
        Ok(None) => not_found("draft"),
        Err(err) => error_response(err),
    }
}

/// Delete all data for a session.
async fn delete_session(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.store.delete_session(&session_id).await {
        Ok(deleted) => (StatusCode::OK, Json(json!({"deleted": deleted}))),
        Err(err) => error_response(err),
    }
}

/// The last validation verdict for a session.
async fn get_validation(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_current(&session_id).await {
        Ok(Some(record)) => match record.validation_results {
            Some(verdict) => (StatusCode::OK, Json(verdict)),
            None => not_found("validation result"),
        },
        Ok(None) => not_found("draft"),
        Err(err) => error_response(err),
    }
}
