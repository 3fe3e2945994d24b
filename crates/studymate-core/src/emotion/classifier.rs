//! Keyword-based emotion classifier.
//!
//! Groups are evaluated in a fixed priority order:
//! happy > sad > angry > surprised > confused > shy > proud > tired > excited.
//! The first group with any keyword in the (lowercased) input wins, so a
//! keyword shared by two groups always resolves to the earlier one.
//! No match yields the default label. `Thinking` is never produced here.
//!
//! Chinese keywords match as substrings. English keywords match whole words
//! only, so "mad" does not fire inside "made".

use std::sync::LazyLock;

use regex::Regex;

use studymate_types::emotion::EmotionLabel;

/// A keyword group: label, substring keywords, whole-word English keywords.
/// Keywords must be lowercase.
type KeywordGroup = (EmotionLabel, &'static [&'static str], &'static [&'static str]);

/// Keyword groups in priority order.
const KEYWORD_GROUPS: &[KeywordGroup] = &[
    (
        EmotionLabel::Happy,
        &["开心", "快乐", "高兴", "喜欢", "爱", "好", "棒", "优秀"],
        &["happy", "glad", "great", "awesome", "love"],
    ),
    (
        EmotionLabel::Sad,
        &["难过", "伤心", "哭", "痛苦", "累", "疲惫"],
        &["sad", "cry", "crying", "upset", "depressed"],
    ),
    (
        EmotionLabel::Angry,
        &["生气", "愤怒", "讨厌", "恨", "烦"],
        &["angry", "mad", "hate", "annoyed"],
    ),
    (
        EmotionLabel::Surprised,
        &["惊讶", "震惊", "没想到", "哇", "哦"],
        &["wow", "surprise", "surprised", "shocked"],
    ),
    (
        EmotionLabel::Confused,
        &["不懂", "不明白", "为什么", "怎么", "困惑"],
        &["confused", "don't understand", "why"],
    ),
    (
        EmotionLabel::Shy,
        &["害羞", "不好意思", "难为情"],
        &["shy", "embarrassed", "blush"],
    ),
    (
        EmotionLabel::Proud,
        &["骄傲", "自豪", "成功", "胜利"],
        &["proud", "success", "victory"],
    ),
    (
        EmotionLabel::Tired,
        &["困", "睡觉", "疲惫", "累"],
        &["tired", "sleepy", "exhausted"],
    ),
    (
        EmotionLabel::Excited,
        &["喜欢", "爱", "关心", "在乎"],
        &["excited", "care about", "miss you"],
    ),
];

/// One whole-word matcher per group, same order as [`KEYWORD_GROUPS`].
/// A word boundary is anything other than an ASCII letter, digit, `_` or `'`.
static ENGLISH_MATCHERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    KEYWORD_GROUPS
        .iter()
        .map(|(_, _, words)| {
            let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
            let pattern = format!(r"(?:^|[^a-z0-9_'])(?:{})(?:[^a-z0-9_']|$)", alternatives.join("|"));
            Regex::new(&pattern).expect("english keyword pattern is valid")
        })
        .collect()
});

/// Classify `text` into one label. Total and deterministic.
pub fn classify(text: &str) -> EmotionLabel {
    let haystack = text.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .zip(ENGLISH_MATCHERS.iter())
        .find(|((_, substrings, _), words)| {
            substrings.iter().any(|keyword| haystack.contains(keyword)) || words.is_match(&haystack)
        })
        .map(|((label, _, _), _)| *label)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_lowercase() {
        for (_, substrings, words) in KEYWORD_GROUPS {
            for keyword in substrings.iter().chain(words.iter()) {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn test_classify_each_group() {
        assert_eq!(classify("我今天很开心"), EmotionLabel::Happy);
        assert_eq!(classify("我好难过"), EmotionLabel::Happy); // "好" belongs to happy
        assert_eq!(classify("我很难过"), EmotionLabel::Sad);
        assert_eq!(classify("真让人生气"), EmotionLabel::Angry);
        assert_eq!(classify("哇，真的吗"), EmotionLabel::Surprised);
        assert_eq!(classify("我不明白这道题"), EmotionLabel::Confused);
        assert_eq!(classify("有点难为情"), EmotionLabel::Shy);
        assert_eq!(classify("我们成功了"), EmotionLabel::Proud);
        assert_eq!(classify("我想睡觉"), EmotionLabel::Tired);
        assert_eq!(classify("谢谢你关心我"), EmotionLabel::Excited);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("I am SO Tired"), EmotionLabel::Tired);
        assert_eq!(classify("WOW"), EmotionLabel::Surprised);
    }

    #[test]
    fn test_priority_order_wins_on_shared_keywords() {
        // "累" is in both sad and tired; sad comes first.
        assert_eq!(classify("累"), EmotionLabel::Sad);
        // "爱" is in both happy and excited; happy comes first.
        assert_eq!(classify("爱"), EmotionLabel::Happy);
        // Two groups present: the earlier group wins regardless of position.
        assert_eq!(classify("我想睡觉，但是很生气"), EmotionLabel::Angry);
    }

    #[test]
    fn test_english_keywords_match_whole_words_only() {
        assert_eq!(classify("I made dinner"), EmotionLabel::Happy);
        assert_eq!(classify("whatever"), EmotionLabel::Happy);
        assert_eq!(classify("a crystal vase"), EmotionLabel::Happy);
        assert_eq!(classify("my glove"), EmotionLabel::Happy);
        assert_eq!(classify("a shyness study"), EmotionLabel::Happy);

        assert_eq!(classify("I'm mad at this proof"), EmotionLabel::Angry);
        assert_eq!(classify("don't cry."), EmotionLabel::Sad);
        assert_eq!(classify("shy"), EmotionLabel::Shy);
        assert_eq!(classify("I don't understand"), EmotionLabel::Confused);
        assert_eq!(classify("我今天很tired"), EmotionLabel::Tired);
    }

    #[test]
    fn test_classify_default_and_empty() {
        assert_eq!(classify(""), EmotionLabel::Happy);
        assert_eq!(classify("the weather report"), EmotionLabel::Happy);
    }

    #[test]
    fn test_classify_never_thinking() {
        for text in ["思考", "thinking", "hmm", "让我想想"] {
            assert_ne!(classify(text), EmotionLabel::Thinking);
        }
    }
}
