//! Core data types for the Curator metadata capture service.
//!
//! This crate provides the foundation data types used across all Curator
//! interfaces: the closed set of metadata sections, the draft record and its
//! lifecycle states, conversation turns, and the validation verdict types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod conversation;
mod draft;
mod section;
mod status;
mod validation;

pub use conversation::{ConversationTurn, Role, SessionSummary};
pub use draft::{DraftRecord, Snapshot};
pub use section::{Field, Section};
pub use status::DraftStatus;
pub use validation::{Severity, ValidationIssue, ValidationResult, ValidationStatus};
