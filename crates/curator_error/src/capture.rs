//! Capture input error types.

/// Input-shape problems reported by the capture boundary.
///
/// These are recoverable outcomes for the caller, never crashes: the
/// orchestrator rejects the request and leaves the draft untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CaptureErrorKind {
    /// The request carried no session identifier
    #[display("session_id is required")]
    MissingSessionId,
    /// Every section value in the request was absent or empty
    #[display("no metadata fields provided")]
    NoFieldsProvided,
    /// The named field is not a recognized section or the validation slot
    #[display("unknown metadata field: {}", _0)]
    UnknownField(String),
}

/// Capture error with source location tracking.
///
/// # Examples
///
/// ```
/// use curator_error::{CaptureError, CaptureErrorKind};
///
/// let err = CaptureError::new(CaptureErrorKind::UnknownField("sample".into()));
/// assert!(format!("{}", err).contains("unknown metadata field"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Capture Error: {} at line {} in {}", kind, line, file)]
pub struct CaptureError {
    /// The kind of error that occurred
    pub kind: CaptureErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CaptureError {
    /// Create a new CaptureError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CaptureErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_field_name() {
        let err = CaptureError::new(CaptureErrorKind::UnknownField("lab_tracks_id".into()));
        let rendered = format!("{err}");
        assert!(rendered.contains("lab_tracks_id"));
        assert!(rendered.contains("capture.rs"));
    }

    #[test]
    fn test_kinds_are_distinct() {
        assert_ne!(
            CaptureErrorKind::MissingSessionId,
            CaptureErrorKind::NoFieldsProvided
        );
    }
}
