//! Validation verdict types.

use serde::{Deserialize, Serialize};

/// Classification of a validation issue.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks `valid` status
    #[display("error")]
    Error,
    /// Informational only; never flips the overall status
    #[display("warning")]
    Warning,
}

/// One finding from a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path of the field the finding is about
    pub field: String,
    /// Human-readable explanation
    pub message: String,
    /// Whether this blocks a `valid` verdict
    pub severity: Severity,
}

impl ValidationIssue {
    /// Create an error-severity issue.
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Create a warning-severity issue.
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Overall verdict of a validation run.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// No error-severity issue exists (warnings are allowed)
    #[display("valid")]
    Valid,
    /// At least one error-severity issue exists
    #[display("errors")]
    Errors,
}

/// The structured, scored verdict of one validation run.
///
/// The serialized form splits `issues` into separate `errors` and `warnings`
/// arrays, matching the layout stored in the draft's validation slot;
/// deserialization re-merges them errors-first.
///
/// # Examples
///
/// ```
/// use curator_core::{ValidationIssue, ValidationResult, ValidationStatus};
///
/// let result = ValidationResult::new(
///     0.0,
///     vec!["subject.subject_id".to_string()],
///     vec![],
///     vec![ValidationIssue::warning("subject.species.name", "unrecognized species")],
/// );
/// assert_eq!(result.status, ValidationStatus::Valid);
/// assert_eq!(result.warnings().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ValidationResultWire", into = "ValidationResultWire")]
pub struct ValidationResult {
    /// `Errors` iff any issue has error severity
    pub status: ValidationStatus,
    /// Fraction in [0.0, 1.0] of required paths present
    pub completeness_score: f64,
    /// Required paths absent from the snapshot, in rule order
    pub missing_required: Vec<String>,
    /// Paths that were checked and passed, in rule order
    pub valid_fields: Vec<String>,
    /// All findings, in rule order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Assemble a verdict; the status is derived from the issues.
    pub fn new(
        completeness_score: f64,
        missing_required: Vec<String>,
        valid_fields: Vec<String>,
        issues: Vec<ValidationIssue>,
    ) -> Self {
        let status = if issues.iter().any(|i| i.severity == Severity::Error) {
            ValidationStatus::Errors
        } else {
            ValidationStatus::Valid
        };
        Self {
            status,
            completeness_score,
            missing_required,
            valid_fields,
            issues,
        }
    }

    /// Error-severity findings.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
    }

    /// Warning-severity findings.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }
}

/// Stored layout of a verdict: issues split by severity.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ValidationResultWire {
    status: ValidationStatus,
    completeness_score: f64,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
    missing_required: Vec<String>,
    valid_fields: Vec<String>,
}

impl From<ValidationResult> for ValidationResultWire {
    fn from(result: ValidationResult) -> Self {
        let (errors, warnings) = result
            .issues
            .into_iter()
            .partition(|i| i.severity == Severity::Error);
        Self {
            status: result.status,
            completeness_score: result.completeness_score,
            errors,
            warnings,
            missing_required: result.missing_required,
            valid_fields: result.valid_fields,
        }
    }
}

impl From<ValidationResultWire> for ValidationResult {
    fn from(wire: ValidationResultWire) -> Self {
        let mut issues = wire.errors;
        issues.extend(wire.warnings);
        Self {
            status: wire.status,
            completeness_score: wire.completeness_score,
            missing_required: wire.missing_required,
            valid_fields: wire.valid_fields,
            issues,
        }
    }
}
