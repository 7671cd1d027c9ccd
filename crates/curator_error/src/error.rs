//! Top-level error wrapper types.

use crate::CaptureError;
#[cfg(feature = "database")]
use crate::DatabaseError;

/// This is the foundation error enum. Variants cover every failure class the
/// core exposes to callers.
///
/// # Examples
///
/// ```
/// use curator_error::{CuratorError, CaptureError, CaptureErrorKind};
///
/// let capture_err = CaptureError::new(CaptureErrorKind::MissingSessionId);
/// let err: CuratorError = capture_err.into();
/// assert!(format!("{}", err).contains("session_id"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CuratorErrorKind {
    /// Invalid capture input (recoverable, reported to the caller)
    #[from(CaptureError)]
    Capture(CaptureError),
    /// Persistence failure
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Curator error with kind discrimination.
///
/// # Examples
///
/// ```
/// use curator_error::{CuratorResult, CaptureError, CaptureErrorKind};
///
/// fn might_fail() -> CuratorResult<()> {
///     Err(CaptureError::new(CaptureErrorKind::NoFieldsProvided))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Curator Error: {}", _0)]
pub struct CuratorError(Box<CuratorErrorKind>);

impl CuratorError {
    /// Create a new error from a kind.
    pub fn new(kind: CuratorErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CuratorErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CuratorErrorKind
impl<T> From<T> for CuratorError
where
    T: Into<CuratorErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Curator operations.
///
/// # Examples
///
/// ```
/// use curator_error::{CuratorResult, CaptureError, CaptureErrorKind};
///
/// fn reject() -> CuratorResult<String> {
///     Err(CaptureError::new(CaptureErrorKind::MissingSessionId))?
/// }
/// ```
pub type CuratorResult<T> = std::result::Result<T, CuratorError>;
