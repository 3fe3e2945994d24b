//! Import session progress and outcome types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::document::Document;

/// Stage an import session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPhase {
    Reading,
    Parsing,
    Finalizing,
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportPhase::Reading => write!(f, "reading"),
            ImportPhase::Parsing => write!(f, "parsing"),
            ImportPhase::Finalizing => write!(f, "finalizing"),
        }
    }
}

/// A single progress update. `percent` is in 0..=100 and never decreases
/// within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportProgress {
    pub percent: u8,
    pub phase: ImportPhase,
}

/// How the source content is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Freeform text split into chapters by heading detection.
    Text,
    /// A pre-structured `{title, chapters}` document used verbatim.
    Json,
}

impl SourceFormat {
    /// `.json` selects the structured path; anything else is text.
    pub fn from_file_name(name: &str) -> Self {
        if name.ends_with(".json") {
            SourceFormat::Json
        } else {
            SourceFormat::Text
        }
    }
}

/// Document title derived from a source name: the file name without its
/// last extension.
pub fn title_from_source_name(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

/// Events yielded by an import session. Exactly one terminal event
/// (`Completed`, `Cancelled` or `Failed`) ends the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ImportEvent {
    Progress(ImportProgress),
    Completed { document: Document },
    Cancelled,
    Failed { message: String },
}

impl ImportEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ImportEvent::Progress(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_format_from_name() {
        assert_eq!(SourceFormat::from_file_name("book.json"), SourceFormat::Json);
        assert_eq!(SourceFormat::from_file_name("book.txt"), SourceFormat::Text);
        assert_eq!(SourceFormat::from_file_name("json"), SourceFormat::Text);
    }

    #[test]
    fn test_title_from_source_name() {
        assert_eq!(title_from_source_name("三体.txt"), "三体");
        assert_eq!(title_from_source_name("notes/archive.tar.gz"), "archive.tar");
        assert_eq!(title_from_source_name("README"), "README");
    }

    #[test]
    fn test_terminal_events() {
        assert!(ImportEvent::Cancelled.is_terminal());
        assert!(!ImportEvent::Progress(ImportProgress {
            percent: 10,
            phase: ImportPhase::Reading
        })
        .is_terminal());
    }
}
