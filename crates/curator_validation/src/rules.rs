//! Rule tables for the validation engine.

use curator_core::Section;

/// Accepted values for `subject.sex`.
pub const VALID_SEX: [&str; 2] = ["Male", "Female"];

/// Recognized species names; anything else draws a warning, not an error.
pub const KNOWN_SPECIES: [&str; 2] = ["Mus musculus", "Homo sapiens"];

/// The fixed set of known modality abbreviations.
pub const KNOWN_MODALITIES: [&str; 14] = [
    "behavior",
    "behavior-videos",
    "confocal",
    "EMG",
    "ecephys",
    "fib",
    "fMOST",
    "icephys",
    "ISI",
    "MRI",
    "merfish",
    "pophys",
    "slap",
    "SPIM",
];

/// Physiology-style modalities whose acquisitions are expected to carry
/// session timing. Imaging and behavior modalities are not in this set.
pub const PHYSIOLOGY_MODALITIES: [&str; 6] = ["ecephys", "icephys", "pophys", "fib", "slap", "EMG"];

/// Shortest `subject.subject_id` that passes the format check.
pub const MIN_SUBJECT_ID_LENGTH: usize = 3;

/// Required paths: present means counted toward the completeness score.
pub(crate) const REQUIRED_PATHS: [(Section, &str); 3] = [
    (Section::Subject, "subject_id"),
    (Section::DataDescription, "modality"),
    (Section::DataDescription, "project_name"),
];
