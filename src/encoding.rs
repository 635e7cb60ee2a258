//! Character encoding detection and transcoding.
//!
//! Byte input is decoded to UTF-8 before extraction. The charset comes from a
//! byte-order mark, then the HTTP `Content-Type` header when one is known, then
//! the HTML meta declarations, and finally defaults to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// `charset=` parameter of a `Content-Type` header value
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"';\s]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Detect character encoding from HTML bytes.
///
/// Looks for charset declarations in the following order:
/// 1. A UTF-8 or UTF-16 byte-order mark
/// 2. `<meta charset="...">`
/// 3. `<meta http-equiv="Content-Type" content="...; charset=...">`
/// 4. Defaults to UTF-8 if no declaration found
///
/// Only examines the first 1024 bytes for performance.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    // Only look at first 1024 bytes for performance
    let head = &html[..html.len().min(1024)];

    // Convert to string with lossy conversion to search for meta tags
    let head_str = String::from_utf8_lossy(head);

    // Try <meta charset="...">
    if let Some(charset) = extract_charset(&head_str) {
        if let Some(encoding) = Encoding::for_label(charset.as_bytes()) {
            return encoding;
        }
    }

    // Try <meta http-equiv="Content-Type" content="...; charset=...">
    if let Some(charset) = extract_content_type_charset(&head_str) {
        if let Some(encoding) = Encoding::for_label(charset.as_bytes()) {
            return encoding;
        }
    }

    // Default to UTF-8 (standard web default)
    UTF_8
}

/// Extract charset from `<meta charset="...">` tag.
fn extract_charset(html: &str) -> Option<String> {
    CHARSET_META_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract charset from `<meta http-equiv="Content-Type" content="...; charset=...">` tag.
fn extract_content_type_charset(html: &str) -> Option<String> {
    CONTENT_TYPE_CHARSET_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Encoding named by the `charset` parameter of a `Content-Type` header.
///
/// Returns `None` when the parameter is missing or names an unknown label.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Decode a response body using its `Content-Type` header when available.
///
/// A byte-order mark always wins. Without a usable header charset the
/// encoding is sniffed from the document as in [`transcode_to_utf8`].
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if Encoding::for_bom(body).is_some() {
        return transcode_to_utf8(body);
    }

    match content_type.and_then(charset_from_content_type) {
        Some(encoding) => {
            let (decoded, _had_errors) = encoding.decode_without_bom_handling(body);
            decoded.into_owned()
        }
        None => transcode_to_utf8(body),
    }
}

/// Transcode HTML bytes to UTF-8 string.
///
/// Detects the encoding and converts to UTF-8, using lossy conversion
/// to handle invalid characters gracefully (replacing them with �).
///
/// # Examples
///
/// ```
/// use rs_article_parser::encoding::transcode_to_utf8;
///
/// let html = b"<html><body>Hello, World!</body></html>";
/// let utf8_str = transcode_to_utf8(html);
/// assert!(utf8_str.contains("Hello, World!"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);

    // decode() strips a BOM and replaces malformed sequences with U+FFFD
    let (decoded, _encoding_used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}
