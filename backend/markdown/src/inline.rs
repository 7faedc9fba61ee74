//! Inline span tokenizer.
//!
//! Splits one text field into styled spans. Patterns run in precedence passes
//! (code, then bold, then italic); each pass only looks at text that earlier
//! passes left plain, so a code span is never re-split for emphasis.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanStyle {
    Plain,
    Bold,
    Italic,
    Code,
}

/// A run of text with a single style. Delimiters are not part of `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Plain)
    }

    pub fn is_plain(&self) -> bool {
        self.style == SpanStyle::Plain
    }
}

static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD_STAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BOLD_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(.+?)__").unwrap());
// The wrapped text may not start or end with a star, so a run like `****`
// is left alone.
static ITALIC_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]|[^*].*?[^*])\*").unwrap());
static ITALIC_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_]+)_").unwrap());

/// Passes in precedence order. Order matters: `**` must be consumed before the
/// single-star pass sees it.
fn passes() -> [(&'static Regex, SpanStyle); 5] {
    [
        (&*CODE_RE, SpanStyle::Code),
        (&*BOLD_STAR_RE, SpanStyle::Bold),
        (&*BOLD_UNDERSCORE_RE, SpanStyle::Bold),
        (&*ITALIC_STAR_RE, SpanStyle::Italic),
        (&*ITALIC_UNDERSCORE_RE, SpanStyle::Italic),
    ]
}

/// Tokenize `text` into styled spans.
///
/// Matching is left-to-right and non-overlapping within a pass. Delimiters
/// that never close (a stray `*`, an empty pair like `**`, a bare run like
/// `****`) stay in the plain text. Never fails; the same input always yields the same spans.
pub fn tokenize(text: &str) -> Vec<Span> {
    let mut parts = vec![Span::plain(text)];

    for (pattern, style) in passes() {
        let mut next = Vec::with_capacity(parts.len());
        for part in parts {
            if !part.is_plain() {
                next.push(part);
                continue;
            }
            split_plain(&part.text, pattern, style, &mut next);
        }
        parts = next;
    }

    parts.retain(|span| !(span.is_plain() && span.text.is_empty()));
    parts
}

/// Drop inline markers, keeping only the text they wrap.
pub fn strip_markers(text: &str) -> String {
    tokenize(text).into_iter().map(|span| span.text).collect()
}

fn split_plain(text: &str, pattern: &Regex, style: SpanStyle, out: &mut Vec<Span>) {
    let mut pos = 0;
    for caps in pattern.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > pos {
            out.push(Span::plain(&text[pos..whole.start()]));
        }
        out.push(Span::new(inner.as_str(), style));
        pos = whole.end();
    }
    if pos < text.len() {
        out.push(Span::plain(&text[pos..]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(spans: &[Span]) -> Vec<(&str, SpanStyle)> {
        spans.iter().map(|s| (s.text.as_str(), s.style)).collect()
    }

    #[test]
    fn test_mixed_styles() {
        let spans = tokenize("**bold** and *italic* and `code`");
        assert_eq!(
            pairs(&spans),
            vec![
                ("bold", SpanStyle::Bold),
                (" and ", SpanStyle::Plain),
                ("italic", SpanStyle::Italic),
                (" and ", SpanStyle::Plain),
                ("code", SpanStyle::Code),
            ]
        );
    }

    #[test]
    fn test_plain_text_is_single_span() {
        let text = "No markers here, just text.";
        assert_eq!(tokenize(text), vec![Span::plain(text)]);
    }

    #[test]
    fn test_empty_text() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_code_content_is_not_restyled() {
        let spans = tokenize("run `a **b** c` now");
        assert_eq!(
            pairs(&spans),
            vec![
                ("run ", SpanStyle::Plain),
                ("a **b** c", SpanStyle::Code),
                (" now", SpanStyle::Plain),
            ]
        );
    }

    #[test]
    fn test_stray_delimiters_stay_literal() {
        assert_eq!(tokenize("5 * 3 = 15"), vec![Span::plain("5 * 3 = 15")]);
        assert_eq!(tokenize("a ** b"), vec![Span::plain("a ** b")]);
        assert_eq!(tokenize("tick ` alone"), vec![Span::plain("tick ` alone")]);
    }

    #[test]
    fn test_delimiter_runs_stay_literal() {
        assert_eq!(tokenize("****"), vec![Span::plain("****")]);
        assert_eq!(tokenize("a **** b"), vec![Span::plain("a **** b")]);
        assert_eq!(tokenize("```"), vec![Span::plain("```")]);
        assert_eq!(tokenize("____"), vec![Span::plain("____")]);
        assert_eq!(strip_markers("a **** b"), "a **** b");
    }

    #[test]
    fn test_bold_before_italic() {
        let spans = tokenize("***both***");
        // The bold pass claims the leftmost `**...**`; the trailing star is
        // unmatched and stays literal.
        assert_eq!(
            pairs(&spans),
            vec![
                ("*both", SpanStyle::Bold),
                ("*", SpanStyle::Plain),
            ]
        );
    }

    #[test]
    fn test_underscore_markers() {
        let spans = tokenize("__strong__ and _soft_");
        assert_eq!(
            pairs(&spans),
            vec![
                ("strong", SpanStyle::Bold),
                (" and ", SpanStyle::Plain),
                ("soft", SpanStyle::Italic),
            ]
        );
    }

    #[test]
    fn test_multiple_matches_in_one_pass() {
        let spans = tokenize("*a* b *c*");
        assert_eq!(
            pairs(&spans),
            vec![
                ("a", SpanStyle::Italic),
                (" b ", SpanStyle::Plain),
                ("c", SpanStyle::Italic),
            ]
        );
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("**Q3** report with `code` and *flair*"), "Q3 report with code and flair");
        assert_eq!(strip_markers("5 * 3"), "5 * 3");
    }

    #[test]
    fn test_deterministic() {
        let text = "mix `x` of **y** and _z_ *w*";
        assert_eq!(tokenize(text), tokenize(text));
    }
}
