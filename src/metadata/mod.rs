//! Metadata extraction module.
//!
//! This module provides functions for extracting metadata from HTML documents,
//! including link relations, HTML meta tags, Open Graph, and JSON-LD.

pub mod dom_extraction;
pub mod json_ld;
pub mod meta_tags;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use dom_query::Document;

use crate::capabilities::MetadataExtractor;
use crate::result::MetaRecord;

pub use dom_extraction::{examine_title_element, extract_dom_title, extract_link_rels};
pub use json_ld::extract_json_ld;
pub use meta_tags::{examine_meta, validate_metadata_name};

/// Extract all metadata from an HTML string.
///
/// Sources are consulted in order and each only fills fields that are still
/// empty:
/// 1. `<link rel>` references
/// 2. HTML meta tags (og:, twitter:, dc., parsely-, itemprop)
/// 3. JSON-LD (Schema.org structured data)
/// 4. The `<title>` element
///
/// Every field is trimmed; parseable publication dates become RFC 3339.
#[must_use]
pub fn extract_metadata(html: &str) -> MetaRecord {
    let doc = Document::from(html);

    let mut metadata = MetaRecord::default();
    metadata = dom_extraction::extract_link_rels(&doc, metadata);
    metadata = meta_tags::examine_meta(&doc, metadata);
    metadata = json_ld::extract_json_ld(&doc, metadata);
    metadata = dom_extraction::extract_dom_title(&doc, metadata);

    post_process_metadata(metadata)
}

/// Default [`MetadataExtractor`] backed by [`extract_metadata`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaTagExtractor;

impl MetadataExtractor for MetaTagExtractor {
    fn extract_metadata(&self, html: &str) -> MetaRecord {
        extract_metadata(html)
    }
}

/// Trim every field and normalize the publication date.
fn post_process_metadata(mut metadata: MetaRecord) -> MetaRecord {
    for field in [
        &mut metadata.url,
        &mut metadata.shortlink,
        &mut metadata.amphtml,
        &mut metadata.canonical,
        &mut metadata.title,
        &mut metadata.description,
        &mut metadata.image,
        &mut metadata.author,
        &mut metadata.published,
        &mut metadata.source,
        &mut metadata.favicon,
        &mut metadata.page_type,
    ] {
        let trimmed = field.trim();
        if trimmed.len() != field.len() {
            *field = trimmed.to_string();
        }
    }

    if let Some(date) = parse_meta_date(&metadata.published) {
        metadata.published = date.to_rfc3339_opts(SecondsFormat::Secs, true);
    }

    metadata
}

/// Parse the date formats commonly found in meta tags and JSON-LD.
///
/// Returns `None` for anything unrecognized; callers keep the raw value.
#[must_use]
pub fn parse_meta_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_metadata_priority() {
        let html = r#"<!DOCTYPE html>
        <html>
        <head>
            <title>Element Title</title>
            <meta property="og:title" content="OG Title">
            <script type="application/ld+json">
            {"@type": "Article", "headline": "JSON-LD Title", "author": {"name": "Ld Author"}}
            </script>
        </head>
        <body><h1>DOM Title</h1></body>
        </html>"#;

        let metadata = extract_metadata(html);

        assert_eq!(metadata.title, "OG Title");
        assert_eq!(metadata.author, "Ld Author");
    }

    #[test]
    fn test_extract_metadata_fallback_chain() {
        let html = r#"<!DOCTYPE html>
        <html>
        <head>
            <title>  Article Title </title>
            <meta property="og:description" content="OG Description">
            <link rel="canonical" href="https://example.com/a">
        </head>
        <body></body>
        </html>"#;

        let metadata = extract_metadata(html);

        assert_eq!(metadata.title, "Article Title");
        assert_eq!(metadata.description, "OG Description");
        assert_eq!(metadata.canonical, "https://example.com/a");
        assert!(metadata.url.is_empty());
    }

    #[test]
    fn test_extract_metadata_empty_document() {
        assert_eq!(extract_metadata(""), MetaRecord::default());
    }

    #[test]
    fn test_published_is_normalized() {
        let html = r#"<meta property="article:published_time" content="2024-03-15T12:30:00+02:00">"#;
        assert_eq!(extract_metadata(html).published, "2024-03-15T10:30:00Z");

        let html = r#"<meta name="dc.date" content="2023-07-04">"#;
        assert_eq!(extract_metadata(html).published, "2023-07-04T00:00:00Z");
    }

    #[test]
    fn test_unparseable_published_is_kept() {
        let html = r#"<meta name="dc.date" content="last Tuesday">"#;
        assert_eq!(extract_metadata(html).published, "last Tuesday");
    }

    #[test]
    fn test_post_process_trims_fields() {
        let metadata = MetaRecord {
            title: "  Spaced Title  ".to_string(),
            author: "\n".to_string(),
            ..MetaRecord::default()
        };

        let result = post_process_metadata(metadata);

        assert_eq!(result.title, "Spaced Title");
        assert!(result.author.is_empty());
    }

    #[test]
    fn test_parse_meta_date() {
        assert!(parse_meta_date("2024-01-15T10:30:00Z").is_some());
        assert!(parse_meta_date("Mon, 15 Jan 2024 10:30:00 +0000").is_some());
        assert!(parse_meta_date("2024-01-15T10:30:00").is_some());
        assert!(parse_meta_date("2024/01/15").is_some());
        assert!(parse_meta_date("").is_none());
        assert!(parse_meta_date("soon").is_none());
    }

    #[test]
    fn test_meta_tag_extractor_trait() {
        let extractor = MetaTagExtractor;
        let metadata = MetadataExtractor::extract_metadata(&extractor, "<title>T</title>");
        assert_eq!(metadata.title, "T");
    }
}
