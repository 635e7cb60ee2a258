//! # rs-article-parser
//!
//! Extract normalized article records from web pages.
//!
//! Given raw HTML and, optionally, the URL it was loaded from, the extractor
//! resolves a title, ranks the candidate URLs declared by the page, pulls the
//! main content out with readability, sanitizes it, and reports a description,
//! main image, author, publication date and reading time.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_article_parser::extract_article;
//!
//! let paragraph = "<p>Rust gives you memory safety without garbage collection, \
//!     and fearless concurrency on top. Teams adopt it for command line tools, \
//!     network services and embedded firmware alike.</p>";
//! let html = format!(
//!     r#"<html><head><title>Why Rust</title>
//!     <link rel="canonical" href="https://example.com/why-rust"></head>
//!     <body><article><h1>Why Rust</h1>{paragraph}{paragraph}{paragraph}</article></body></html>"#
//! );
//!
//! if let Some(article) = extract_article(&html, None) {
//!     println!("{} ({} min)", article.title, article.ttr);
//!     assert_eq!(article.url, "https://example.com/why-rust");
//! }
//! ```
//!
//! ## Features
//!
//! - **Metadata**: Open Graph, Twitter cards, Dublin Core, Parse.ly, JSON-LD
//! - **URL resolution**: tracking parameters stripped, best URL ranked by title
//! - **Content**: readability extraction, per-site transformations, sanitizing
//! - **Retrieval**: async HTTP fetching with content-type and charset handling

mod error;
mod extract;
mod options;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Pluggable collaborators of the extraction pipeline.
pub mod capabilities;

/// HTML cleaning, sanitizing and minification.
pub mod html_processing;

/// Metadata extraction (link relations, meta tags, JSON-LD).
pub mod metadata;

/// Readability main-content detection.
pub mod readability;

/// HTTP retrieval.
pub mod retrieve;

/// Plain-text helpers.
pub mod text;

/// Per-site pre/post parser transformations.
pub mod transformation;

/// URL utilities for validation, purification, resolution and ranking.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use capabilities::{ContentExtractor, MetadataExtractor, ParserHooks, UrlChooser, UrlPurifier};
pub use error::{Error, Result};
pub use extract::{Extractor, ExtractorBuilder};
pub use options::{FetchOptions, ParserOptions, UrlCompareAlgorithm, DEFAULT_USER_AGENT};
pub use result::{Article, MetaRecord};
pub use retrieve::{fetch_article, fetch_article_with, fetch_html};
pub use transformation::{Transformation, Transformations};

/// Extracts an article from an HTML document using default options.
///
/// # Arguments
///
/// * `html` - The HTML document as a string slice
/// * `source_url` - The address the document was loaded from, if known
///
/// # Returns
///
/// Returns `Some(Article)` when a title, a valid URL and enough content were
/// found, `None` otherwise.
#[must_use]
pub fn extract_article(html: &str, source_url: Option<&str>) -> Option<Article> {
    Extractor::default().extract(html, source_url)
}

/// Extracts an article from an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use rs_article_parser::{extract_article_with_options, ParserOptions};
///
/// let options = ParserOptions {
///     content_length_threshold: 500,
///     ..ParserOptions::default()
/// };
/// let article = extract_article_with_options("<p>too short</p>", Some("https://example.com/a"), &options);
/// assert!(article.is_none());
/// ```
#[must_use]
pub fn extract_article_with_options(
    html: &str,
    source_url: Option<&str>,
    options: &ParserOptions,
) -> Option<Article> {
    Extractor::builder()
        .options(options.clone())
        .build()
        .extract(html, source_url)
}

/// Extracts an article from HTML bytes with automatic encoding detection.
///
/// The encoding is detected from a byte-order mark,
/// `<meta charset="...">` or
/// `<meta http-equiv="Content-Type" content="...; charset=...">`,
/// defaulting to UTF-8. Invalid characters are replaced with �.
#[must_use]
pub fn extract_article_bytes(html: &[u8], source_url: Option<&str>) -> Option<Article> {
    let html_str = encoding::transcode_to_utf8(html);
    extract_article(&html_str, source_url)
}
