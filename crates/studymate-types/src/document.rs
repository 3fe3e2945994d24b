//! Imported study documents.

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// Title used when segmentation finds no content at all.
pub const EMPTY_DOCUMENT_CHAPTER_TITLE: &str = "第一章";

/// One chapter of study material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl Chapter {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            translation: None,
        }
    }
}

/// A titled, ordered list of chapters.
///
/// Documents produced by import always contain at least one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub chapters: Vec<Chapter>,
}

impl Document {
    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    pub fn chapter_mut(&mut self, index: usize) -> Result<&mut Chapter, DocumentError> {
        let len = self.chapters.len();
        self.chapters
            .get_mut(index)
            .ok_or(DocumentError::ChapterOutOfRange { index, len })
    }

    /// Replace a chapter's title and body.
    ///
    /// The title is trimmed and must not be blank. Editing the body drops any
    /// stale translation.
    pub fn edit_chapter(
        &mut self,
        index: usize,
        title: &str,
        text: &str,
    ) -> Result<(), DocumentError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DocumentError::EmptyTitle);
        }
        let chapter = self.chapter_mut(index)?;
        if chapter.text != text {
            chapter.translation = None;
        }
        chapter.title = title.to_string();
        chapter.text = text.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document {
            title: "notes".to_string(),
            chapters: vec![Chapter::new("第一章", "a"), Chapter::new("第二章", "b")],
        }
    }

    #[test]
    fn test_edit_chapter_updates_fields() {
        let mut doc = sample();
        doc.edit_chapter(1, "  第二章 新  ", "bb").unwrap();
        assert_eq!(doc.chapters[1].title, "第二章 新");
        assert_eq!(doc.chapters[1].text, "bb");
    }

    #[test]
    fn test_edit_chapter_rejects_blank_title() {
        let mut doc = sample();
        assert_eq!(doc.edit_chapter(0, "   ", "x"), Err(DocumentError::EmptyTitle));
        assert_eq!(doc.chapters[0].text, "a");
    }

    #[test]
    fn test_edit_chapter_out_of_range() {
        let mut doc = sample();
        assert_eq!(
            doc.edit_chapter(5, "t", "x"),
            Err(DocumentError::ChapterOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_edit_text_clears_translation() {
        let mut doc = sample();
        doc.chapters[0].translation = Some("A".to_string());
        doc.edit_chapter(0, "第一章", "a").unwrap();
        assert_eq!(doc.chapters[0].translation.as_deref(), Some("A"));
        doc.edit_chapter(0, "第一章", "changed").unwrap();
        assert!(doc.chapters[0].translation.is_none());
    }

    #[test]
    fn test_document_json_shape() {
        let doc: Document = serde_json::from_str(
            r#"{"title":"T","chapters":[{"title":"A","text":"x"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.chapters[0].translation, None);
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["chapters"][0].get("translation").is_none());
    }
}
