//! HTML Cleaning and Minification
//!
//! `cleanify` normalizes raw input before metadata and readability run;
//! `clean_and_minify` sanitizes the extracted article markup down to an
//! allow-list of tags and attributes.

use crate::dom::{self, Document, Selection};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// HTML comments, including multi-line ones.
#[allow(clippy::expect_used)]
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));

/// Runs of whitespace.
#[allow(clippy::expect_used)]
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Elements whose text keeps its original whitespace.
const PRESERVED_WHITESPACE_TAGS: &[&str] = &["pre", "textarea", "script", "style"];

/// Elements removed together with their content during sanitization.
static DISCARDED_TAGS_SELECTOR: &str = "script, style, textarea, option, noscript, template";

/// Tags kept in article content. Anything else is unwrapped.
pub static ALLOWED_TAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "h1", "h2", "h3", "h4", "h5", "h6", "u", "b", "i", "em", "strong", "small",
        "sup", "sub", "div", "span", "p", "article", "blockquote", "section",
        "details", "summary", "pre", "code", "ul", "ol", "li", "dd", "dl", "dt",
        "table", "th", "tr", "td", "thead", "tbody", "tfoot", "fieldset", "legend",
        "figure", "figcaption", "img", "picture", "video", "audio", "source",
        "iframe", "progress", "br", "hr", "label", "abbr", "a", "svg",
    ]
    .into_iter()
    .collect()
});

/// Attributes kept per tag. Unlisted tags keep no attributes.
#[must_use]
pub fn allowed_attributes(tag: &str) -> &'static [&'static str] {
    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => &["id"],
        "a" => &["href", "target", "title"],
        "abbr" => &["title"],
        "progress" => &["value", "max"],
        "img" => &["src", "srcset", "alt", "width", "height", "title"],
        "picture" => &["media", "srcset"],
        "video" | "audio" => &["controls", "width", "height", "autoplay", "muted", "loop", "src"],
        "source" => &["src", "srcset", "type", "media", "sizes"],
        "iframe" => &["src", "frameborder", "height", "width", "scrolling", "allow"],
        "svg" => &["width", "height"],
        "td" | "th" => &["colspan", "rowspan"],
        _ => &[],
    }
}

/// Hosts whose embeds survive sanitization.
pub const ALLOWED_IFRAME_DOMAINS: &[&str] = &["youtube.com", "youtube-nocookie.com", "vimeo.com"];

/// URL schemes accepted in `href`/`src` values.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp", "mailto", "tel"];

/// Normalize raw input HTML.
///
/// Parses the document (repairing malformed markup), drops comments and
/// collapses whitespace outside `pre` and `textarea`. Scripts are kept so
/// JSON-LD metadata stays readable.
#[must_use]
pub fn cleanify(html: &str) -> String {
    let without_comments = COMMENT_RE.replace_all(html, "");
    let doc = Document::from(without_comments.as_ref());
    minify_document(&doc);
    doc.html().trim().to_string()
}

/// Sanitize extracted article markup and minify it.
///
/// Returns the cleaned inner HTML of the document body.
#[must_use]
pub fn clean_and_minify(html: &str) -> String {
    let without_comments = COMMENT_RE.replace_all(html, "");
    let doc = Document::from(without_comments.as_ref());
    sanitize(&doc);
    minify_document(&doc);
    let body = doc.select("body");
    dom::inner_html(&body).trim().to_string()
}

/// Collapse whitespace runs in every text node to one space.
///
/// Text under `pre`, `textarea`, `script` and `style` is left untouched.
pub fn minify_document(doc: &Document) {
    for node in doc.root().descendants() {
        if !node.is_text() {
            continue;
        }
        let preserved = node
            .ancestors_it(None)
            .any(|ancestor| PRESERVED_WHITESPACE_TAGS.iter().any(|tag| ancestor.has_name(tag)));
        if preserved {
            continue;
        }

        let text = node.text();
        if let std::borrow::Cow::Owned(collapsed) = WHITESPACE_RE.replace_all(&text, " ") {
            node.set_text(collapsed);
        }
    }
}

fn sanitize(doc: &Document) {
    doc.select(DISCARDED_TAGS_SELECTOR).remove();

    for node in doc.select("iframe").nodes().to_vec() {
        let iframe = Selection::from(node);
        let src = dom::get_attribute(&iframe, "src").unwrap_or_default();
        if !is_allowed_iframe(&src) {
            dom::remove(&iframe);
        }
    }

    let body = doc.select("body");

    let mut disallowed: HashSet<String> = HashSet::new();
    for node in body.select("*").nodes() {
        let tag = dom::tag_name(&Selection::from(*node)).unwrap_or_default();
        if !ALLOWED_TAGS.contains(tag.as_str()) {
            disallowed.insert(tag);
        }
    }
    if !disallowed.is_empty() {
        let tags: Vec<&str> = disallowed.iter().map(String::as_str).collect();
        dom::strip_tags(&body, &tags);
    }

    for node in body.select("*").nodes() {
        let sel = Selection::from(*node);
        let tag = dom::tag_name(&sel).unwrap_or_default();
        let allowed = allowed_attributes(&tag);

        for (key, value) in dom::get_all_attributes(&sel) {
            let keep = allowed.contains(&key.as_str())
                && (!matches!(key.as_str(), "href" | "src") || is_safe_url(&value));
            if !keep {
                dom::remove_attribute(&sel, &key);
            }
        }
    }
}

fn is_allowed_iframe(src: &str) -> bool {
    let Ok(url) = url::Url::parse(src.trim()) else {
        return false;
    };
    url.host_str().is_some_and(|host| {
        ALLOWED_IFRAME_DOMAINS
            .iter()
            .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
    })
}

/// Relative references are safe; absolute ones must use an allowed scheme.
fn is_safe_url(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    let scheme_end = value.find(':');
    let path_start = value.find(['/', '?', '#']);
    match (scheme_end, path_start) {
        (Some(colon), Some(slash)) if slash < colon => true,
        (Some(colon), _) => ALLOWED_SCHEMES.contains(&&value[..colon]),
        (None, _) => true,
    }
}
