//! Dialogue and conversation-turn types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::emotion::EmotionLabel;
use crate::llm::{Message, MessageRole};

/// Follow-up prompts offered after every turn.
pub const DEFAULT_SUGGESTIONS: [&str; 3] = ["你好！", "今天过得怎么样？", "有什么可以帮助你的吗？"];

/// Who produced an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl From<Speaker> for MessageRole {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::User => MessageRole::User,
            Speaker::Assistant => MessageRole::Assistant,
        }
    }
}

/// One remembered line of dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub role: Speaker,
    pub content: String,
}

impl Utterance {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Utterance> for Message {
    fn from(utterance: &Utterance) -> Self {
        Message {
            role: utterance.role.into(),
            content: utterance.content.clone(),
        }
    }
}

/// The result of one user message: the reply shown and the emotion it carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user_text: String,
    pub reply: String,
    pub emotion: EmotionLabel,
    pub timestamp: DateTime<Utc>,
    pub suggestions: Vec<String>,
}

impl ConversationTurn {
    pub fn new(user_text: impl Into<String>, reply: impl Into<String>, emotion: EmotionLabel) -> Self {
        Self {
            user_text: user_text.into(),
            reply: reply.into(),
            emotion,
            timestamp: Utc::now(),
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utterance_into_message() {
        let message: Message = (&Utterance::assistant("hello")).into();
        assert_eq!(message.role, MessageRole::Assistant);
        assert_eq!(message.content, "hello");
    }

    #[test]
    fn test_turn_carries_default_suggestions() {
        let turn = ConversationTurn::new("hi", "hello", EmotionLabel::Happy);
        assert_eq!(turn.suggestions, vec!["你好！", "今天过得怎么样？", "有什么可以帮助你的吗？"]);
    }

    #[test]
    fn test_utterance_serializes_role() {
        let json = serde_json::to_value(Utterance::user("x")).unwrap();
        assert_eq!(json["role"], "user");
    }
}
