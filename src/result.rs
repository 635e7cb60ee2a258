//! Result types for extraction output.
//!
//! `MetaRecord` is the flat metadata view of a document; `Article` is the
//! normalized record produced by a successful extraction.

use serde::{Deserialize, Serialize};

/// Metadata read from an HTML document.
///
/// Every field is a string that is empty when the document does not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRecord {
    /// URL declared by `og:url`, `twitter:url` or equivalent.
    pub url: String,

    /// Target of `<link rel="shortlink">`.
    pub shortlink: String,

    /// Target of `<link rel="amphtml">`.
    pub amphtml: String,

    /// Target of `<link rel="canonical">`.
    pub canonical: String,

    /// Page title.
    pub title: String,

    /// Page description.
    pub description: String,

    /// Main image URL, possibly relative.
    pub image: String,

    /// Author name.
    pub author: String,

    /// Publication date, RFC 3339 when it could be parsed.
    pub published: String,

    /// Site name (e.g. `og:site_name`).
    pub source: String,

    /// Favicon URL, possibly relative.
    pub favicon: String,

    /// Page type (`og:type`).
    #[serde(rename = "type")]
    pub page_type: String,
}

/// Article extracted from an HTML document.
///
/// On success every invariant holds: `title` is non-empty, `links` is the
/// non-empty candidate URL set, `url` is one of `links`, `source` is the
/// domain of `url`, and `image` is empty or absolute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Best URL chosen among `links`.
    pub url: String,

    /// Article title.
    pub title: String,

    /// Authored description, or an excerpt of the content.
    pub description: String,

    /// Purified, deduplicated candidate URLs in priority order.
    pub links: Vec<String>,

    /// Absolute URL of the main image, or empty.
    pub image: String,

    /// Sanitized and minified article markup.
    pub content: String,

    /// Author name, or empty.
    pub author: String,

    /// Domain of `url`.
    pub source: String,

    /// Publication date, or empty.
    pub published: String,

    /// Estimated reading time in minutes.
    pub ttr: u32,
}
