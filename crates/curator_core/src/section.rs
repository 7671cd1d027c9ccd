//! The closed set of metadata section identifiers.

use serde::{Deserialize, Serialize};

/// One of the nine schema areas a draft record can hold.
///
/// Field updates are addressed by these identifiers rather than free-form
/// strings, so an invalid name is rejected at the parse boundary instead of
/// deep inside the store.
///
/// # Examples
///
/// ```
/// use curator_core::Section;
///
/// assert_eq!(Section::Subject.as_str(), "subject");
/// assert_eq!(Section::parse("quality_control"), Some(Section::QualityControl));
/// assert_eq!(Section::parse("lab_tracks_id"), None);
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
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// The experimental subject (id, species, sex, ...)
    #[display("subject")]
    Subject,
    /// Surgical and histology procedures
    #[display("procedures")]
    Procedures,
    /// Project, modality, and funding description
    #[display("data_description")]
    DataDescription,
    /// Instrument hardware description
    #[display("instrument")]
    Instrument,
    /// Acquisition parameters
    #[display("acquisition")]
    Acquisition,
    /// Session timing and stimulus epochs
    #[display("session")]
    Session,
    /// Processing pipeline description
    #[display("processing")]
    Processing,
    /// Quality control evaluations
    #[display("quality_control")]
    QualityControl,
    /// Rig hardware description
    #[display("rig")]
    Rig,
}

impl Section {
    /// Stable snake_case name, matching the stored column and wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Subject => "subject",
            Section::Procedures => "procedures",
            Section::DataDescription => "data_description",
            Section::Instrument => "instrument",
            Section::Acquisition => "acquisition",
            Section::Session => "session",
            Section::Processing => "processing",
            Section::QualityControl => "quality_control",
            Section::Rig => "rig",
        }
    }

    /// Parse a section name; `None` for anything outside the closed set.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "subject" => Some(Section::Subject),
            "procedures" => Some(Section::Procedures),
            "data_description" => Some(Section::DataDescription),
            "instrument" => Some(Section::Instrument),
            "acquisition" => Some(Section::Acquisition),
            "session" => Some(Section::Session),
            "processing" => Some(Section::Processing),
            "quality_control" => Some(Section::QualityControl),
            "rig" => Some(Section::Rig),
            _ => None,
        }
    }
}

/// An addressable column of a draft record: one of the nine sections, or the
/// reserved slot holding the last validation verdict.
///
/// # Examples
///
/// ```
/// use curator_core::{Field, Section};
///
/// assert_eq!(Field::parse("rig"), Some(Field::Section(Section::Rig)));
/// assert_eq!(Field::parse("validation_results"), Some(Field::ValidationResults));
/// assert_eq!(Field::parse("notes"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Field {
    /// A metadata section
    #[display("{}", _0)]
    Section(Section),
    /// The stored result of the last validation run
    #[display("validation_results")]
    ValidationResults,
}

impl Field {
    /// Stable name, matching the stored column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Section(section) => section.as_str(),
            Field::ValidationResults => "validation_results",
        }
    }

    /// Parse a field name; `None` for anything outside the closed set.
    pub fn parse(name: &str) -> Option<Self> {
        if name == "validation_results" {
            return Some(Field::ValidationResults);
        }
        Section::parse(name).map(Field::Section)
    }
}

impl From<Section> for Field {
    fn from(section: Section) -> Self {
        Field::Section(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_nine_sections() {
        assert_eq!(Section::iter().count(), 9);
    }

    #[test]
    fn test_parse_round_trip() {
        for section in Section::iter() {
            assert_eq!(Section::parse(section.as_str()), Some(section));
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Section::DataDescription).unwrap();
        assert_eq!(json, "\"data_description\"");
        let back: Section = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Section::DataDescription);
    }

    #[test]
    fn test_field_rejects_unknown_names() {
        assert_eq!(Field::parse("subject_json"), None);
        assert_eq!(Field::parse(""), None);
    }
}
