//! Trait definitions for the Curator metadata capture service.
//!
//! This crate defines the seams between the capture orchestrator and its
//! persistence backends, plus the wire types of the capture contract.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ConversationStore, DraftStore};
pub use types::{CaptureOutcome, CaptureRequest};
