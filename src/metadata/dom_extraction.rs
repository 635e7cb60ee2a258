//! DOM-based Metadata Extraction
//!
//! Reads `<link rel>` references (canonical, shortlink, amphtml, icons) and the
//! `<title>` element, used alongside and as a fallback to meta tags.

use crate::dom::{self, Document, Selection};
use crate::result::MetaRecord;
use regex::Regex;
use std::sync::LazyLock;

/// Runs of whitespace inside a title.
#[allow(clippy::expect_used)]
static TITLE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Extract the text of the `<title>` element, whitespace collapsed.
#[must_use]
pub fn examine_title_element(doc: &Document) -> Option<String> {
    let title_elem = doc.select("title").first();
    if title_elem.is_empty() {
        return None;
    }

    let title = dom::text_content(&title_elem);
    let title = TITLE_WHITESPACE.replace_all(title.trim(), " ").to_string();

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Fill `canonical`, `shortlink`, `amphtml` and `favicon` from `<link>` elements.
///
/// The `rel` attribute is a space separated token list; the first element
/// carrying each token wins.
#[must_use]
pub fn extract_link_rels(doc: &Document, original: MetaRecord) -> MetaRecord {
    let mut result = original;

    for node in doc.select("link[rel][href]").nodes() {
        let link = Selection::from(*node);

        let href = dom::get_attribute(&link, "href").unwrap_or_default();
        let href = href.trim();
        if href.is_empty() {
            continue;
        }

        let rel = dom::get_attribute(&link, "rel").unwrap_or_default().to_lowercase();
        for token in rel.split_whitespace() {
            let field = match token {
                "canonical" => &mut result.canonical,
                "shortlink" => &mut result.shortlink,
                "amphtml" => &mut result.amphtml,
                "icon" | "apple-touch-icon" => &mut result.favicon,
                _ => continue,
            };
            if field.is_empty() {
                *field = href.to_string();
            }
        }
    }

    result
}

/// Fall back to the `<title>` element when no title was found yet.
#[must_use]
pub fn extract_dom_title(doc: &Document, original: MetaRecord) -> MetaRecord {
    let mut result = original;

    if result.title.is_empty() {
        if let Some(title) = examine_title_element(doc) {
            result.title = title;
        }
    }

    result
}
