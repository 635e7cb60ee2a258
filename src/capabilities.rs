//! Pluggable collaborators of the extraction pipeline.
//!
//! The pipeline only talks to metadata parsing, readability, URL purification,
//! best-URL ranking and the pre/post parser hooks through these traits. Each
//! has a default implementation in this crate; tests and callers can swap
//! any of them through [`crate::ExtractorBuilder`].

use crate::result::MetaRecord;

/// Parses an HTML document into a flat metadata record.
pub trait MetadataExtractor: Send + Sync {
    /// Read metadata from `html`. Never fails; missing fields stay empty.
    fn extract_metadata(&self, html: &str) -> MetaRecord;
}

/// Generic main-content detection.
pub trait ContentExtractor: Send + Sync {
    /// Derive a title from the document, or `None` when there is none.
    fn extract_title(&self, html: &str, url: &str) -> Option<String>;

    /// Extract the main content markup, or `None` when nothing readable exists.
    fn extract_content(&self, html: &str, url: &str) -> Option<String>;
}

/// Normalizes candidate URLs before deduplication.
pub trait UrlPurifier: Send + Sync {
    /// Return the normalized URL, or `None` to drop the candidate.
    fn purify(&self, url: &str) -> Option<String>;
}

/// Picks the canonical URL of an article.
///
/// Implementations must be deterministic and must return a member of
/// `candidates`.
pub trait UrlChooser: Send + Sync {
    /// Choose one of `candidates` for an article titled `title`.
    fn choose_best_url(&self, candidates: &[String], title: &str) -> Option<String>;
}

/// Domain-specific transforms applied around readability extraction.
pub trait ParserHooks: Send + Sync {
    /// Adjust the full document before readability runs.
    fn pre_parse(&self, html: &str, links: &[String]) -> String;

    /// Clean up the extracted content markup.
    fn post_parse(&self, html: &str, links: &[String]) -> String;
}
