use serde::{Deserialize, Serialize};

use crate::notification::Severity;

/// One entry of a chapter analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisItem {
    pub title: String,
    pub content: String,
    pub kind: Severity,
}

impl AnalysisItem {
    pub fn new(title: impl Into<String>, content: impl Into<String>, kind: Severity) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            kind,
        }
    }
}
