use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::emotion::EmotionLabel;

/// Name of the persona created when the roster is empty.
pub const DEFAULT_PERSONA_NAME: &str = "小月";

/// Personality description of the built-in persona.
pub const DEFAULT_PERSONALITY: &str = "温柔、聪慧的学习助手，喜欢帮助用户学习和解决问题";

/// Avatar used when a persona does not provide one.
pub const DEFAULT_AVATAR: &str = "./default/normal.png";

/// Unique identifier for a persona, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonaId(pub Uuid);

impl PersonaId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for PersonaId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PersonaId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A companion character the user chats with.
///
/// `personality` is free text injected into the system prompt. `emotions`
/// maps each label to an image reference; missing entries fall back to the
/// bundled artwork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub id: PersonaId,
    pub name: String,
    pub personality: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default)]
    pub emotions: BTreeMap<EmotionLabel, String>,
    pub created_at: DateTime<Utc>,
}

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

impl Persona {
    /// Create a persona with the bundled emotion artwork.
    pub fn new(name: impl Into<String>, personality: impl Into<String>) -> Self {
        Self {
            id: PersonaId::new(),
            name: name.into(),
            personality: personality.into(),
            avatar: default_avatar(),
            emotions: default_emotion_assets(),
            created_at: Utc::now(),
        }
    }

    /// The persona seeded into an empty roster.
    pub fn default_companion() -> Self {
        Self::new(DEFAULT_PERSONA_NAME, DEFAULT_PERSONALITY)
    }

    /// Image reference for `emotion`, falling back to the bundled asset.
    pub fn asset_for(&self, emotion: EmotionLabel) -> &str {
        self.emotions
            .get(&emotion)
            .map(String::as_str)
            .filter(|asset| !asset.trim().is_empty())
            .unwrap_or_else(|| emotion.default_asset())
    }

    /// Greeting shown right after switching to this persona.
    pub fn greeting(&self) -> String {
        format!("你好，我是{}！", self.name)
    }
}

/// Request to create a new persona.
///
/// Emotions not listed fall back to the bundled artwork.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePersonaRequest {
    pub name: String,
    pub personality: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub emotions: BTreeMap<EmotionLabel, String>,
}

/// Bundled artwork for every label.
pub fn default_emotion_assets() -> BTreeMap<EmotionLabel, String> {
    EmotionLabel::ALL
        .into_iter()
        .map(|label| (label, label.default_asset().to_string()))
        .collect()
}
