//! Plain-text helpers: tag stripping, truncation and time-to-read.

use crate::dom::{Document, StrTendril};
use regex::Regex;
use std::sync::LazyLock;

/// Two or more consecutive whitespace characters.
#[allow(clippy::expect_used)]
static MULTI_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("valid regex"));

/// Remove all markup and return the text content.
///
/// The markup is parsed and its text nodes are joined with a space so
/// adjacent blocks do not run together. Runs of whitespace collapse to one
/// space. Attribute values never leak into the result.
///
/// # Examples
/// ```
/// use rs_article_parser::text::strip_tags;
///
/// assert_eq!(strip_tags("<p>Fish &amp; chips</p><p>Peas</p>"), "Fish & chips Peas");
/// ```
#[must_use]
pub fn strip_tags(html: &str) -> String {
    let doc = Document::from(html);
    let Some(body) = doc.select("body").nodes().first().copied() else {
        return String::new();
    };

    let parts: Vec<StrTendril> = body
        .descendants()
        .into_iter()
        .filter(dom_query::NodeRef::is_text)
        .map(|node| node.text())
        .collect();
    let joined = parts.iter().map(|part| &**part).collect::<Vec<&str>>().join(" ");

    MULTI_SPACE_RE.replace_all(&joined, " ").trim().to_string()
}

/// Shorten `text` to at most `max_len` characters plus an ellipsis.
///
/// The cut falls back to the last word boundary inside the limit, so words
/// are never split unless the limit holds a single word.
///
/// # Examples
/// ```
/// use rs_article_parser::text::truncate;
///
/// assert_eq!(truncate("The quick brown fox", 12), "The quick...");
/// assert_eq!(truncate("Short", 12), "Short");
/// ```
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let head: String = text.chars().take(max_len).collect();
    match head.rfind(' ') {
        Some(boundary) if !head[..boundary].trim().is_empty() => {
            format!("{}...", head[..boundary].trim_end())
        }
        _ => {
            let cut: String = head.chars().take(max_len.saturating_sub(3)).collect();
            format!("{cut}...")
        }
    }
}

/// Estimated reading time of `text` in minutes, rounded up.
///
/// Empty text reads in zero minutes. A `words_per_minute` of zero is treated
/// as one.
#[must_use]
pub fn get_time_to_read(text: &str, words_per_minute: usize) -> u32 {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.max(1));
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
