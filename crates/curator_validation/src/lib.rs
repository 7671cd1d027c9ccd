//! Validation engine for Curator metadata snapshots.
//!
//! A pure rule evaluation over a decoded [`Snapshot`]: presence of required
//! paths, controlled vocabularies, format checks, one cross-field
//! consistency rule, and a completeness score. No I/O, no state.
//!
//! [`Snapshot`]: curator_core::Snapshot

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod rules;

pub use engine::validate;
pub use rules::{
    KNOWN_MODALITIES, KNOWN_SPECIES, MIN_SUBJECT_ID_LENGTH, PHYSIOLOGY_MODALITIES, VALID_SEX,
};
