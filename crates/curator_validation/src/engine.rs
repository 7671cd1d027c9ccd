//! Rule evaluation over a metadata snapshot.

use crate::rules::{
    KNOWN_MODALITIES, KNOWN_SPECIES, MIN_SUBJECT_ID_LENGTH, PHYSIOLOGY_MODALITIES, REQUIRED_PATHS,
    VALID_SEX,
};
use curator_core::{Section, Snapshot, ValidationIssue, ValidationResult};
use serde_json::Value;
use tracing::{debug, instrument};

/// Validate a decoded metadata snapshot.
///
/// Pure function: evaluates presence of the three required paths, the
/// controlled vocabularies, format checks, and the physiology/session
/// cross-field rule, then derives the completeness score and overall status.
/// Warnings never flip the status to `errors`; a missing required field
/// lowers the score but is not itself an issue.
///
/// # Examples
///
/// ```
/// use curator_validation::validate;
///
/// let result = validate(&Default::default());
/// assert_eq!(result.completeness_score, 0.0);
/// assert_eq!(result.missing_required.len(), 3);
/// ```
#[instrument(skip_all, fields(sections = snapshot.len()))]
pub fn validate(snapshot: &Snapshot) -> ValidationResult {
    let mut missing_required = Vec::new();
    let mut valid_fields = Vec::new();
    let mut issues = Vec::new();

    // Required paths; subject_id also carries a format rule, so a present
    // but too-short id counts toward the score without entering valid_fields.
    let mut present_required = 0usize;
    for (section, key) in REQUIRED_PATHS {
        let path = format!("{}.{}", section.as_str(), key);
        match lookup(snapshot, section, &[key]) {
            Some(_) => {
                present_required += 1;
                if !(section == Section::Subject && key == "subject_id") {
                    valid_fields.push(path);
                }
            }
            None => missing_required.push(path),
        }
    }

    if let Some(subject_id) = lookup(snapshot, Section::Subject, &["subject_id"]) {
        let id_text = value_as_text(subject_id);
        if id_text.chars().count() < MIN_SUBJECT_ID_LENGTH {
            issues.push(ValidationIssue::warning(
                "subject.subject_id",
                format!(
                    "Subject ID '{}' is shorter than {} characters",
                    id_text, MIN_SUBJECT_ID_LENGTH
                ),
            ));
        } else {
            valid_fields.push("subject.subject_id".to_string());
        }
    }

    if let Some(Value::String(sex)) = lookup(snapshot, Section::Subject, &["sex"]) {
        if VALID_SEX.contains(&sex.as_str()) {
            valid_fields.push("subject.sex".to_string());
        } else {
            issues.push(ValidationIssue::error(
                "subject.sex",
                format!("Sex must be one of {:?}, got '{}'", VALID_SEX, sex),
            ));
        }
    }

    if let Some(Value::String(name)) = lookup(snapshot, Section::Subject, &["species", "name"])
        && !KNOWN_SPECIES.contains(&name.as_str())
    {
        issues.push(ValidationIssue::warning(
            "subject.species.name",
            format!("Species '{}' is not a recognized species name", name),
        ));
    }

    let mut abbreviations = Vec::new();
    if let Some(Value::Array(modalities)) =
        lookup(snapshot, Section::DataDescription, &["modality"])
    {
        for (index, entry) in modalities.iter().enumerate() {
            let Some(Value::String(abbreviation)) = entry.get("abbreviation") else {
                continue;
            };
            if KNOWN_MODALITIES.contains(&abbreviation.as_str()) {
                abbreviations.push(abbreviation.as_str());
            } else {
                issues.push(ValidationIssue::error(
                    format!("data_description.modality[{}].abbreviation", index),
                    format!("'{}' is not a known modality abbreviation", abbreviation),
                ));
            }
        }
    }

    if let Some(thickness) = lookup(snapshot, Section::Procedures, &["section_thickness_um"]) {
        match thickness.as_f64() {
            Some(value) if value > 0.0 => {
                valid_fields.push("procedures.section_thickness_um".to_string());
            }
            _ => issues.push(ValidationIssue::error(
                "procedures.section_thickness_um",
                "Section thickness must be a strictly positive number".to_string(),
            )),
        }
    }

    if let Some(coordinates) = lookup(snapshot, Section::Procedures, &["coordinates"])
        && coordinates.is_object()
    {
        valid_fields.push("procedures.coordinates".to_string());
    }

    // Physiology acquisitions are expected to carry session timing; the
    // warning is keyed on the absent section, not on the modality field.
    let physiology = abbreviations
        .iter()
        .any(|a| PHYSIOLOGY_MODALITIES.contains(a));
    if physiology && !snapshot.contains_key(&Section::Session) {
        issues.push(ValidationIssue::warning(
            "session",
            "Physiology modality captured without a session section".to_string(),
        ));
    }

    let completeness_score = present_required as f64 / REQUIRED_PATHS.len() as f64;
    debug!(
        completeness_score,
        issues = issues.len(),
        "validation complete"
    );
    ValidationResult::new(completeness_score, missing_required, valid_fields, issues)
}

/// Walk a dotted path inside one section. `None` for an absent or null leaf,
/// or when an intermediate value is not a mapping (including sections kept as
/// raw text by the defensive decode).
fn lookup<'a>(snapshot: &'a Snapshot, section: Section, path: &[&str]) -> Option<&'a Value> {
    let mut current = snapshot.get(&section)?;
    for key in path {
        current = current.get(key)?;
    }
    if current.is_null() { None } else { Some(current) }
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
