//! Trailing emotion tags in remote replies.
//!
//! A reply may end with `[label]` where the label is one or more ASCII word
//! characters (`[A-Za-z0-9_]`). Only a tag at the very end of the text
//! counts. CJK tags such as `[害羞]`, tags with spaces and tags with
//! punctuation do not match: the reply keeps them and the caller falls back
//! to the classifier on the full text.

use std::sync::LazyLock;

use regex::Regex;

use studymate_types::emotion::EmotionLabel;

static TRAILING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z0-9_]+)\]$").expect("trailing tag pattern is valid"));

/// Split a trailing `[tag]` off `reply`.
///
/// Returns the reply with the tag removed and surrounding whitespace trimmed,
/// plus the tag content. `None` when no tag is present.
pub fn split_trailing_tag(reply: &str) -> Option<(String, &str)> {
    let captures = TRAILING_TAG.captures(reply)?;
    let whole = captures.get(0)?;
    let tag = captures.get(1)?.as_str();
    let body = reply[..whole.start()].trim().to_string();
    Some((body, tag))
}

/// Map a tag onto the closed label set. Unknown tags resolve to the default.
pub fn map_tag(tag: &str) -> EmotionLabel {
    match tag.trim().to_lowercase().as_str() {
        "开心" | "快乐" | "高兴" | "happy" | "joyful" | "glad" | "cheerful" => EmotionLabel::Happy,
        "难过" | "伤心" | "sad" | "unhappy" | "sorrowful" => EmotionLabel::Sad,
        "生气" | "愤怒" | "恼怒" | "angry" | "mad" | "annoyed" => EmotionLabel::Angry,
        "惊讶" | "震惊" | "surprised" | "shocked" | "amazed" => EmotionLabel::Surprised,
        "困惑" | "迷茫" | "confused" | "puzzled" => EmotionLabel::Confused,
        "害羞" | "不好意思" | "shy" | "embarrassed" => EmotionLabel::Shy,
        "骄傲" | "自豪" | "proud" => EmotionLabel::Proud,
        "疲惫" | "困" | "tired" | "sleepy" => EmotionLabel::Tired,
        "兴奋" | "喜欢" | "爱" | "excited" | "love" => EmotionLabel::Excited,
        "思考" | "thinking" | "pondering" | "thoughtful" => EmotionLabel::Thinking,
        _ => EmotionLabel::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trailing_tag() {
        let (body, tag) = split_trailing_tag("今天学得不错！ [happy]").unwrap();
        assert_eq!(body, "今天学得不错！");
        assert_eq!(tag, "happy");
    }

    #[test]
    fn test_cjk_tag_is_not_a_tag() {
        assert!(split_trailing_tag("好的 [害羞]").is_none());
        assert!(split_trailing_tag("今天学得不错！ [开心]").is_none());
        assert!(split_trailing_tag("ok [café]").is_none());
    }

    #[test]
    fn test_split_ascii_tag() {
        let (body, tag) = split_trailing_tag("Nice work.[proud]").unwrap();
        assert_eq!(body, "Nice work.");
        assert_eq!(tag, "proud");
    }

    #[test]
    fn test_tag_must_be_at_very_end() {
        assert!(split_trailing_tag("[happy] 今天不错").is_none());
        assert!(split_trailing_tag("今天不错 [happy]\n").is_none());
        assert!(split_trailing_tag("今天不错 [happy] ").is_none());
    }

    #[test]
    fn test_multiword_or_punctuated_tags_do_not_match() {
        assert!(split_trailing_tag("ok [very happy]").is_none());
        assert!(split_trailing_tag("ok [happy!]").is_none());
        assert!(split_trailing_tag("ok []").is_none());
    }

    #[test]
    fn test_only_last_tag_is_stripped() {
        let (body, tag) = split_trailing_tag("[surprised] 真的吗 [shy]").unwrap();
        assert_eq!(body, "[surprised] 真的吗");
        assert_eq!(tag, "shy");
    }

    #[test]
    fn test_map_tag_synonyms() {
        assert_eq!(map_tag("joyful"), EmotionLabel::Happy);
        assert_eq!(map_tag("Glad"), EmotionLabel::Happy);
        assert_eq!(map_tag("愤怒"), EmotionLabel::Angry);
        assert_eq!(map_tag("不好意思"), EmotionLabel::Shy);
        assert_eq!(map_tag("困"), EmotionLabel::Tired);
        assert_eq!(map_tag("爱"), EmotionLabel::Excited);
        assert_eq!(map_tag("思考"), EmotionLabel::Thinking);
    }

    #[test]
    fn test_map_tag_unknown_falls_back_to_default() {
        assert_eq!(map_tag("melancholic"), EmotionLabel::Happy);
        assert_eq!(map_tag("平静"), EmotionLabel::Happy);
    }
}
