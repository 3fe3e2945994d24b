//! Emotion labels shown by the companion persona.
//!
//! The label set is closed. Every classifier, tag mapping and persona asset
//! lookup resolves to one of these ten values, with [`EmotionLabel::Happy`]
//! as the neutral default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the ten emotions a persona can display.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    #[default]
    Happy,
    Thinking,
    Surprised,
    Angry,
    Sad,
    Shy,
    Confused,
    Excited,
    Tired,
    Proud,
}

impl EmotionLabel {
    /// All labels, in picker order.
    pub const ALL: [EmotionLabel; 10] = [
        EmotionLabel::Happy,
        EmotionLabel::Thinking,
        EmotionLabel::Surprised,
        EmotionLabel::Angry,
        EmotionLabel::Sad,
        EmotionLabel::Shy,
        EmotionLabel::Confused,
        EmotionLabel::Excited,
        EmotionLabel::Tired,
        EmotionLabel::Proud,
    ];

    /// Stable machine name, also used as the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Happy => "happy",
            EmotionLabel::Thinking => "thinking",
            EmotionLabel::Surprised => "surprised",
            EmotionLabel::Angry => "angry",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Shy => "shy",
            EmotionLabel::Confused => "confused",
            EmotionLabel::Excited => "excited",
            EmotionLabel::Tired => "tired",
            EmotionLabel::Proud => "proud",
        }
    }

    /// Chinese name shown to the user.
    pub fn display_name(&self) -> &'static str {
        match self {
            EmotionLabel::Happy => "开心",
            EmotionLabel::Thinking => "思考",
            EmotionLabel::Surprised => "惊讶",
            EmotionLabel::Angry => "恼怒",
            EmotionLabel::Sad => "难过",
            EmotionLabel::Shy => "害羞",
            EmotionLabel::Confused => "困惑",
            EmotionLabel::Excited => "兴奋",
            EmotionLabel::Tired => "疲惫",
            EmotionLabel::Proud => "骄傲",
        }
    }

    /// Bundled image used when a persona has no custom asset for this label.
    ///
    /// Thinking shares the confused artwork.
    pub fn default_asset(&self) -> &'static str {
        match self {
            EmotionLabel::Happy => "./default/happy.png",
            EmotionLabel::Thinking | EmotionLabel::Confused => "./default/confused.png",
            EmotionLabel::Surprised => "./default/surprised.png",
            EmotionLabel::Angry => "./default/angry.png",
            EmotionLabel::Sad => "./default/sad.png",
            EmotionLabel::Shy => "./default/shy.png",
            EmotionLabel::Excited => "./default/love.png",
            EmotionLabel::Tired => "./default/sleepy.png",
            EmotionLabel::Proud => "./default/proud.png",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts either the machine name (case-insensitive) or the Chinese name.
impl FromStr for EmotionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        EmotionLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == needle || label.display_name() == needle)
            .ok_or_else(|| format!("invalid emotion label: '{s}'"))
    }
}
