//! Capture orchestrator and merge policy for Curator drafts.
//!
//! The orchestrator accepts a batch of section updates for a session, merges
//! them into the draft store, re-reads the full snapshot, runs the
//! validation engine, and persists the verdict alongside the draft.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod merge;
mod service;

pub use merge::merge_section;
pub use service::CaptureService;
