//! Error types for the Curator metadata capture service.
//!
//! This crate provides the foundation error types used throughout the Curator
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use curator_error::{CaptureError, CaptureErrorKind, CuratorResult};
//!
//! fn capture(session_id: &str) -> CuratorResult<()> {
//!     if session_id.is_empty() {
//!         Err(CaptureError::new(CaptureErrorKind::MissingSessionId))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(capture("").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capture;
#[cfg(feature = "database")]
mod database;
mod error;

pub use capture::{CaptureError, CaptureErrorKind};
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{CuratorError, CuratorErrorKind, CuratorResult};
