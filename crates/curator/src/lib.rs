//! Curator - incremental scientific-metadata capture.
//!
//! Curator keeps a single mutable draft of a structured scientific metadata
//! record consistent as information arrives in arbitrary order, arbitrary
//! completeness, and occasionally malformed shape (double-encoded or
//! partially overlapping payloads).
//!
//! # Architecture
//!
//! Curator is organized as a workspace with focused crates:
//!
//! - `curator_core` - core data types (sections, drafts, verdicts)
//! - `curator_error` - error types
//! - `curator_interface` - store trait definitions and wire types
//! - `curator_validation` - the pure validation engine
//! - `curator_database` - PostgreSQL persistence
//! - `curator_capture` - the capture orchestrator and merge policy
//! - `curator_server` - the axum HTTP surface
//!
//! This crate (`curator`) re-exports the core API for convenience.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use curator::{establish_pool, CaptureService, PgDraftStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = establish_pool()?;
//!     let store = Arc::new(PgDraftStore::new(pool));
//!     let service = CaptureService::new(store);
//!     // service.capture(...) as updates arrive from the conversation.
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub use curator_capture::{merge_section, CaptureService};
pub use curator_core::{
    ConversationTurn, DraftRecord, DraftStatus, Field, Role, Section, SessionSummary, Severity,
    Snapshot, ValidationIssue, ValidationResult, ValidationStatus,
};
pub use curator_database::{
    establish_pool, establish_pool_with, run_migrations, PgConversationStore, PgDraftStore, PgPool,
};
pub use curator_error::{
    CaptureError, CaptureErrorKind, CuratorError, CuratorErrorKind, CuratorResult, DatabaseError,
    DatabaseErrorKind,
};
pub use curator_interface::{CaptureOutcome, CaptureRequest, ConversationStore, DraftStore};
pub use curator_validation::validate;
