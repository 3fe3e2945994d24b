//! Chapter segmentation of freeform text.
//!
//! A heading is a line starting with "第" + numeral (CJK or ASCII digits) +
//! one unit character. Numerals are not validated, so repeated or
//! out-of-order headings are kept as written. Blank lines are dropped and
//! body lines within a chapter are joined by a blank line.

use std::sync::LazyLock;

use regex::Regex;

use studymate_types::document::{Chapter, Document, EMPTY_DOCUMENT_CHAPTER_TITLE};

static CHAPTER_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^第[一二三四五六七八九十百千0-9]+[章节篇卷部集回]")
        .expect("chapter heading pattern is valid")
});

/// Whether a trimmed line opens a new chapter.
pub fn is_chapter_heading(line: &str) -> bool {
    CHAPTER_HEADING.is_match(line)
}

/// Split `raw` into chapters. Pure and total.
///
/// Body text before the first heading goes into a chapter titled
/// `第{n}章`, where `n` counts every chapter opened so far. Input with no
/// non-blank line yields one chapter holding the trimmed input.
pub fn segment(raw: &str, fallback_title: &str) -> Document {
    let mut chapters = Vec::new();
    let mut current: Option<Chapter> = None;
    let mut counter = 0usize;

    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if is_chapter_heading(line) {
            chapters.extend(current.take());
            counter += 1;
            current = Some(Chapter::new(line, ""));
            continue;
        }

        let chapter = current.get_or_insert_with(|| {
            counter += 1;
            Chapter::new(format!("第{counter}章"), "")
        });
        if !chapter.text.is_empty() {
            chapter.text.push_str("\n\n");
        }
        chapter.text.push_str(line);
    }
    chapters.extend(current);

    if chapters.is_empty() {
        chapters.push(Chapter::new(EMPTY_DOCUMENT_CHAPTER_TITLE, raw.trim()));
    }

    Document {
        title: fallback_title.to_string(),
        chapters,
    }
}
