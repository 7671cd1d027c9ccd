//! Draft lifecycle states.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a draft record.
///
/// `Validated` and `Error` are reserved: they are accepted when read back
/// from storage but no operation currently assigns them. The only transition
/// driven by the store is `Draft` -> `Confirmed`.
///
/// # Examples
///
/// ```
/// use curator_core::DraftStatus;
///
/// assert_eq!(DraftStatus::Confirmed.as_str(), "confirmed");
/// assert_eq!(DraftStatus::parse("draft"), Some(DraftStatus::Draft));
/// ```
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
pub enum DraftStatus {
    /// Freshly created, still accumulating sections
    #[display("draft")]
    Draft,
    /// Reserved: passed validation (never assigned today)
    #[display("validated")]
    Validated,
    /// Explicitly confirmed by the scientist
    #[display("confirmed")]
    Confirmed,
    /// Reserved: failed terminally (never assigned today)
    #[display("error")]
    Error,
}

impl DraftStatus {
    /// Stable lowercase name, matching the stored column.
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStatus::Draft => "draft",
            DraftStatus::Validated => "validated",
            DraftStatus::Confirmed => "confirmed",
            DraftStatus::Error => "error",
        }
    }

    /// Parse a status name; `None` for anything outside the allowed set.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "draft" => Some(DraftStatus::Draft),
            "validated" => Some(DraftStatus::Validated),
            "confirmed" => Some(DraftStatus::Confirmed),
            "error" => Some(DraftStatus::Error),
            _ => None,
        }
    }
}
