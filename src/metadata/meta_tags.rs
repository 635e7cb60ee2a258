//! HTML Meta Tag Extraction
//!
//! Reads `<meta>` elements keyed by `name`, `property` or `itemprop`, covering
//! Open Graph, Twitter cards, Dublin Core, Parse.ly and schema.org names.

use crate::dom::{self, Document, Selection};
use crate::result::MetaRecord;

/// Meta names carrying the site name.
pub const SOURCE_ATTRS: &[&str] = &["application-name", "og:site_name", "twitter:site", "publisher"];

/// Meta names carrying the document URL.
pub const URL_ATTRS: &[&str] = &["og:url", "twitter:url", "parsely-link"];

/// Meta names carrying the title.
pub const TITLE_ATTRS: &[&str] = &["title", "og:title", "twitter:title", "parsely-title", "dc.title"];

/// Meta names carrying the description.
pub const DESCRIPTION_ATTRS: &[&str] = &[
    "description", "og:description", "twitter:description", "parsely-description", "dc.description",
];

/// Meta names carrying the main image.
pub const IMAGE_ATTRS: &[&str] = &[
    "image", "og:image", "og:image:url", "og:image:secure_url",
    "twitter:image", "twitter:image:src", "parsely-image-url", "thumbnail",
];

/// Meta names carrying the author.
pub const AUTHOR_ATTRS: &[&str] = &[
    "author", "creator", "og:creator", "article:author", "twitter:creator",
    "dc.creator", "parsely-author", "byl", "sailthru.author",
];

/// Meta names carrying the publication date.
pub const PUBLISHED_TIME_ATTRS: &[&str] = &[
    "article:published_time", "article:modified_time", "og:updated_time",
    "dc.date", "dc.date.issued", "dc.date.created", "dc:created", "dcterms.date",
    "datepublished", "datemodified", "istitle", "parsely-pub-date",
];

/// Meta names carrying the page type.
pub const TYPE_ATTRS: &[&str] = &["og:type"];

/// Examine HTML meta tags for metadata.
///
/// The first non-empty value found in document order wins for each field;
/// values already present in `original` are kept.
#[must_use]
pub fn examine_meta(doc: &Document, original: MetaRecord) -> MetaRecord {
    let mut result = original;

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);

        let name = dom::get_attribute(&meta, "name")
            .or_else(|| dom::get_attribute(&meta, "property"))
            .or_else(|| dom::get_attribute(&meta, "itemprop"))
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        let content = dom::get_attribute(&meta, "content").unwrap_or_default();
        let content = content.trim();

        if name.is_empty() || content.is_empty() {
            continue;
        }

        let name = name.as_str();
        let field = if TITLE_ATTRS.contains(&name) {
            &mut result.title
        } else if DESCRIPTION_ATTRS.contains(&name) {
            &mut result.description
        } else if URL_ATTRS.contains(&name) {
            &mut result.url
        } else if IMAGE_ATTRS.contains(&name) {
            &mut result.image
        } else if AUTHOR_ATTRS.contains(&name) {
            if !validate_metadata_name(content) {
                continue;
            }
            &mut result.author
        } else if PUBLISHED_TIME_ATTRS.contains(&name) {
            &mut result.published
        } else if SOURCE_ATTRS.contains(&name) {
            &mut result.source
        } else if TYPE_ATTRS.contains(&name) {
            &mut result.page_type
        } else {
            continue;
        };

        if field.is_empty() {
            *field = content.to_string();
        }
    }

    result
}

/// Validate that a metadata name looks like a real author name.
///
/// Filters out:
/// - Empty or very short names
/// - Names that look like URLs
/// - Names with too many special characters
/// - Names that look like JSON
#[must_use]
pub fn validate_metadata_name(name: &str) -> bool {
    let name = name.trim();

    if name.chars().count() < 2 || name.len() > 120 {
        return false;
    }

    if name.starts_with("http://") || name.starts_with("https://") || name.starts_with("www.") {
        return false;
    }

    if name.starts_with('{') || name.starts_with('[') {
        return false;
    }

    // Too many digits (likely an ID)
    let digit_count = name.chars().filter(char::is_ascii_digit).count();
    if digit_count > 3 {
        return false;
    }

    let special_count = name
        .chars()
        .filter(|c| {
            !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '\'' | '.' | '@' | '_')
        })
        .count();

    special_count <= 2
}
