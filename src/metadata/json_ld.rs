//! JSON-LD Metadata Parsing
//!
//! Extracts structured metadata from Schema.org JSON-LD embedded in HTML
//! documents. Typed objects are collected from every
//! `<script type="application/ld+json">` block, including nested objects and
//! `@graph` arrays, then ranked so top-level article objects win.

use crate::dom::{self, Document, Selection};
use crate::result::MetaRecord;
use serde_json::{Map, Value};

/// A typed schema object with its relevance score.
#[derive(Debug, Clone)]
struct SchemaData {
    types: Vec<String>,
    data: Map<String, Value>,
    importance: i32,
}

#[derive(Debug, Default)]
struct SchemaGroups {
    persons: Vec<SchemaData>,
    organizations: Vec<SchemaData>,
    articles: Vec<SchemaData>,
}

/// Merge JSON-LD metadata into `original`.
///
/// Only empty fields are filled. Scripts that are not valid JSON are skipped.
#[must_use]
pub fn extract_json_ld(doc: &Document, original: MetaRecord) -> MetaRecord {
    let mut result = original;
    let groups = decode_json_ld(doc);

    for article in &groups.articles {
        if result.title.is_empty() {
            if let Some(title) = get_single_string_value(&article.data, "headline")
                .or_else(|| get_single_string_value(&article.data, "name"))
            {
                result.title = title;
            }
        }

        if result.description.is_empty() {
            if let Some(desc) = get_single_string_value(&article.data, "description") {
                result.description = desc;
            }
        }

        if result.published.is_empty() {
            if let Some(date) = get_single_string_value(&article.data, "datePublished")
                .or_else(|| get_single_string_value(&article.data, "dateModified"))
            {
                result.published = date;
            }
        }

        if result.image.is_empty() {
            if let Some(image) = extract_schema_image(&article.data) {
                result.image = image;
            }
        }

        if result.url.is_empty() {
            if let Some(url) = get_single_string_value(&article.data, "url") {
                result.url = url;
            }
        }

        if result.author.is_empty() {
            if let Some(author) = article.data.get("author").and_then(get_author_name) {
                result.author = author;
            }
        }

        if result.source.is_empty() {
            if let Some(Value::Object(publisher)) = article.data.get("publisher") {
                if let Some(name) = get_schema_names(publisher) {
                    result.source = name;
                }
            }
        }

        if result.page_type.is_empty() {
            if let Some(kind) = article.types.first() {
                result.page_type.clone_from(kind);
            }
        }
    }

    if result.author.is_empty() {
        if let Some(name) = groups.persons.iter().find_map(|p| get_schema_names(&p.data)) {
            result.author = name;
        }
    }

    if result.source.is_empty() {
        if let Some(name) = groups.organizations.iter().find_map(|o| get_schema_names(&o.data)) {
            result.source = name;
        }
    }

    result
}

/// Parse and categorize JSON-LD scripts into persons, organizations, and articles.
fn decode_json_ld(doc: &Document) -> SchemaGroups {
    let mut groups = SchemaGroups::default();

    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let script_sel = Selection::from(*script);
        let json_text = dom::text_content(&script_sel).trim().to_string();

        if json_text.is_empty() {
            continue;
        }

        let Ok(data) = serde_json::from_str::<Value>(&json_text) else {
            continue;
        };

        process_schema_value(&data, 0, &mut groups);
    }

    // Stable sort keeps document order among equals
    groups.persons.sort_by(|a, b| b.importance.cmp(&a.importance));
    groups.organizations.sort_by(|a, b| b.importance.cmp(&a.importance));
    groups.articles.sort_by(|a, b| b.importance.cmp(&a.importance));

    groups
}

fn process_schema_value(value: &Value, depth: i32, groups: &mut SchemaGroups) {
    match value {
        Value::Object(map) => {
            let types = get_schema_types(map);

            if types.is_empty() {
                for val in map.values() {
                    process_schema_value(val, depth, groups);
                }
                return;
            }

            let schema = SchemaData {
                importance: calculate_importance(&types, depth),
                types,
                data: map.clone(),
            };

            if is_person_type(&schema.types) {
                groups.persons.push(schema);
            } else if is_organization_type(&schema.types) {
                groups.organizations.push(schema);
            } else if is_article_type(&schema.types) {
                groups.articles.push(schema);
            }

            for val in map.values() {
                process_schema_value(val, depth + 1, groups);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                process_schema_value(item, depth, groups);
            }
        }
        _ => {}
    }
}

/// Lowercased `@type` values of a schema object.
fn get_schema_types(obj: &Map<String, Value>) -> Vec<String> {
    match obj.get("@type") {
        Some(Value::String(s)) => vec![s.to_lowercase()],
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

/// Name of a person or organization, composing given and family names if needed.
fn get_schema_names(data: &Map<String, Value>) -> Option<String> {
    if let Some(Value::String(name)) = data.get("name") {
        let name = name.trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    let given = data.get("givenName").and_then(Value::as_str).unwrap_or("");
    let family = data.get("familyName").and_then(Value::as_str).unwrap_or("");

    let full_name = format!("{} {}", given.trim(), family.trim()).trim().to_string();
    if full_name.is_empty() {
        None
    } else {
        Some(full_name)
    }
}

/// Author names from a string, an object, or an array of either.
fn get_author_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Object(obj) => get_schema_names(obj),
        Value::Array(arr) => {
            let names: Vec<String> = arr.iter().filter_map(get_author_name).collect();
            if names.is_empty() {
                None
            } else {
                Some(names.join(", "))
            }
        }
        _ => None,
    }
}

fn get_single_string_value(data: &Map<String, Value>, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { Some(s.to_string()) }
        }
        Value::Array(arr) => arr
            .first()
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}

fn is_person_type(types: &[String]) -> bool {
    types.iter().any(|t| matches!(t.as_str(), "person" | "author" | "creator"))
}

fn is_organization_type(types: &[String]) -> bool {
    types.iter().any(|t| matches!(t.as_str(), "organization" | "newsmediaorganization" | "website" | "publisher"))
}

fn is_article_type(types: &[String]) -> bool {
    types.iter().any(|t| matches!(
        t.as_str(),
        "article" | "newsarticle" | "blogposting" | "webpage" | "report"
        | "techarticle" | "scholarlyarticle" | "socialmediaposting" | "reportagenewsarticle"
    ))
}

fn calculate_importance(types: &[String], depth: i32) -> i32 {
    let base = if is_article_type(types) { 100 } else { 50 };
    base - depth * 10
}

fn extract_schema_image(data: &Map<String, Value>) -> Option<String> {
    let image = match data.get("image")? {
        Value::Array(arr) => arr.first()?,
        other => other,
    };

    match image {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Object(obj) => obj
            .get("url")
            .or_else(|| obj.get("contentUrl"))
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> MetaRecord {
        extract_json_ld(&Document::from(html), MetaRecord::default())
    }

    #[test]
    fn test_simple_article_schema() {
        let metadata = extract(
            r#"<!DOCTYPE html>
        <html>
        <head>
            <script type="application/ld+json">
            {
                "@type": "Article",
                "headline": "Test Article Title",
                "description": "This is the article description.",
                "datePublished": "2024-01-15T10:30:00Z",
                "author": {
                    "@type": "Person",
                    "name": "John Doe"
                },
                "publisher": {"@type": "Organization", "name": "Daily Example"}
            }
            </script>
        </head>
        <body></body>
        </html>"#,
        );

        assert_eq!(metadata.title, "Test Article Title");
        assert_eq!(metadata.description, "This is the article description.");
        assert_eq!(metadata.published, "2024-01-15T10:30:00Z");
        assert_eq!(metadata.author, "John Doe");
        assert_eq!(metadata.source, "Daily Example");
        assert_eq!(metadata.page_type, "article");
    }

    #[test]
    fn test_graph_array() {
        let metadata = extract(
            r#"<script type="application/ld+json">
            {
                "@context": "https://schema.org",
                "@graph": [
                    {"@type": "WebSite", "name": "Example News"},
                    {"@type": "NewsArticle", "headline": "Graph Headline",
                     "image": [{"@type": "ImageObject", "url": "https://example.com/a.jpg"}]}
                ]
            }
            </script>"#,
        );

        assert_eq!(metadata.title, "Graph Headline");
        assert_eq!(metadata.image, "https://example.com/a.jpg");
        assert_eq!(metadata.source, "Example News");
    }

    #[test]
    fn test_author_variants() {
        let metadata = extract(
            r#"<script type="application/ld+json">
            {"@type": "BlogPosting", "author": [
                {"@type": "Person", "givenName": "Ada", "familyName": "Lovelace"},
                "Charles Babbage"
            ]}
            </script>"#,
        );
        assert_eq!(metadata.author, "Ada Lovelace, Charles Babbage");

        let metadata = extract(
            r#"<script type="application/ld+json">{"@type": "Article", "author": "Plain Name"}</script>"#,
        );
        assert_eq!(metadata.author, "Plain Name");
    }

    #[test]
    fn test_invalid_json_is_skipped() {
        let metadata = extract(
            r#"<script type="application/ld+json">{ not json</script>
            <script type="application/ld+json">{"@type": "Article", "headline": "Valid"}</script>"#,
        );
        assert_eq!(metadata.title, "Valid");
    }

    #[test]
    fn test_preserves_existing_values() {
        let original = MetaRecord {
            title: "From meta".to_string(),
            ..MetaRecord::default()
        };
        let doc = Document::from(
            r#"<script type="application/ld+json">{"@type": "Article", "headline": "From JSON-LD", "description": "Desc"}</script>"#,
        );
        let metadata = extract_json_ld(&doc, original);

        assert_eq!(metadata.title, "From meta");
        assert_eq!(metadata.description, "Desc");
    }

    #[test]
    fn test_get_schema_types() {
        let value: Value = serde_json::json!({"@type": ["NewsArticle", "Article"]});
        let types = get_schema_types(value.as_object().unwrap_or(&Map::new()));
        assert_eq!(types, vec!["newsarticle", "article"]);
    }

    #[test]
    fn test_extract_schema_image() {
        let value = serde_json::json!({"image": "https://example.com/x.png"});
        let map = value.as_object().cloned().unwrap_or_default();
        assert_eq!(extract_schema_image(&map).as_deref(), Some("https://example.com/x.png"));

        let value = serde_json::json!({"image": {"contentUrl": "/y.png"}});
        let map = value.as_object().cloned().unwrap_or_default();
        assert_eq!(extract_schema_image(&map).as_deref(), Some("/y.png"));
    }
}
