//! Local Markdown-to-HTML conversion.
//!
//! A fixed, ordered list of rewrite rules. Each rule runs on the output of
//! the previous one, so order is part of the behavior: the link rule runs
//! before the image rule, and list wrapping runs on the whole text. The
//! result is intentionally naive; it is only the offline fallback for the
//! remote renderer.

use std::sync::LazyLock;

use regex::Regex;

/// Line prefixes that are left alone by the paragraph rule.
const BLOCK_PREFIXES: &[&str] = &[
    "<h1>", "<h2>", "<h3>", "<h4>", "<h5>", "<h6>", "<ul>", "<ol>", "<li>", "<pre>",
    "<blockquote>", "<hr>",
];

enum Rule {
    /// Regex replacement applied to every match.
    Replace(Regex, &'static str),
    /// Wrap each line that does not start with a block tag in `<p>`.
    Paragraphs,
}

impl Rule {
    fn replace(pattern: &str, replacement: &'static str) -> Self {
        Rule::Replace(
            Regex::new(pattern).expect("markdown rule pattern is valid"),
            replacement,
        )
    }

    fn apply(&self, input: &str) -> String {
        match self {
            Rule::Replace(regex, replacement) => regex.replace_all(input, *replacement).into_owned(),
            Rule::Paragraphs => input
                .split('\n')
                .map(|line| {
                    if BLOCK_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
                        line.to_string()
                    } else {
                        format!("<p>{line}</p>")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // headings
        Rule::replace(r"(?m)^# (.*)$", "<h1>${1}</h1>"),
        Rule::replace(r"(?m)^## (.*)$", "<h2>${1}</h2>"),
        Rule::replace(r"(?m)^### (.*)$", "<h3>${1}</h3>"),
        Rule::replace(r"(?m)^#### (.*)$", "<h4>${1}</h4>"),
        Rule::replace(r"(?m)^##### (.*)$", "<h5>${1}</h5>"),
        Rule::replace(r"(?m)^###### (.*)$", "<h6>${1}</h6>"),
        // emphasis
        Rule::replace(r"\*\*(.*)\*\*", "<strong>${1}</strong>"),
        Rule::replace(r"\*(.*)\*", "<em>${1}</em>"),
        Rule::replace(r"__(.*)__", "<strong>${1}</strong>"),
        Rule::replace(r"_(.*)_", "<em>${1}</em>"),
        // lists
        Rule::replace(r"(?m)^- (.*)$", "<li>${1}</li>"),
        Rule::replace(r"(?s)(<li>.*</li>)", "<ul>${1}</ul>"),
        Rule::replace(r"(?m)^[0-9]+\. (.*)$", "<li>${1}</li>"),
        Rule::replace(r"(?s)(<li>.*</li>)", "<ol>${1}</ol>"),
        // links and images
        Rule::replace(r"\[(.*)\]\((.*)\)", r#"<a href="${2}" target="_blank">${1}</a>"#),
        Rule::replace(r"!\[(.*)\]\((.*)\)", r#"<img src="${2}" alt="${1}">"#),
        // code
        Rule::replace(r"```([\s\S]*?)```", "<pre><code>${1}</code></pre>"),
        Rule::replace(r"`(.*?)`", "<code>${1}</code>"),
        // blocks
        Rule::replace(r"(?m)^> (.*)$", "<blockquote>${1}</blockquote>"),
        Rule::replace(r"(?m)^---$", "<hr>"),
        Rule::Paragraphs,
    ]
});

/// Convert Markdown to HTML with the ordered local rules.
pub fn render_markdown(markdown: &str) -> String {
    RULES
        .iter()
        .fold(markdown.to_string(), |html, rule| rule.apply(&html))
}
