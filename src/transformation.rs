//! Domain-specific pre/post parser transformations.
//!
//! A [`Transformation`] carries URL patterns and optional hooks that edit a
//! parsed document. The first registered transformation with a pattern
//! matching any candidate link is applied around readability extraction.

use std::fmt;
use std::sync::Arc;

use dom_query::Document;
use regex::Regex;
use tracing::debug;

use crate::capabilities::ParserHooks;
use crate::dom;

/// Callback editing a parsed document in place.
pub type DocumentHook = Arc<dyn Fn(&Document) + Send + Sync>;

/// URL patterns plus the hooks applied to matching pages.
#[derive(Clone, Default)]
pub struct Transformation {
    /// Links matching any of these select the transformation.
    pub patterns: Vec<Regex>,

    /// Applied to the whole document before readability runs.
    pub pre: Option<DocumentHook>,

    /// Applied to the extracted content markup.
    pub post: Option<DocumentHook>,
}

impl Transformation {
    /// Create a transformation with no hooks.
    #[must_use]
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self {
            patterns,
            pre: None,
            post: None,
        }
    }

    /// Set the pre-parse hook.
    #[must_use]
    pub fn with_pre<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Document) + Send + Sync + 'static,
    {
        self.pre = Some(Arc::new(hook));
        self
    }

    /// Set the post-parse hook.
    #[must_use]
    pub fn with_post<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Document) + Send + Sync + 'static,
    {
        self.post = Some(Arc::new(hook));
        self
    }

    /// Whether any pattern matches any of `links`.
    #[must_use]
    pub fn matches(&self, links: &[String]) -> bool {
        self.patterns
            .iter()
            .any(|re| links.iter().any(|link| re.is_match(link)))
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns: Vec<&str> = self.patterns.iter().map(Regex::as_str).collect();
        f.debug_struct("Transformation")
            .field("patterns", &patterns)
            .field("pre", &self.pre.is_some())
            .field("post", &self.post.is_some())
            .finish()
    }
}

/// Ordered registry of transformations.
///
/// An owned value: each extractor carries its own registry.
#[derive(Debug, Clone, Default)]
pub struct Transformations {
    items: Vec<Transformation>,
}

impl Transformations {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transformation. Returns the number registered.
    pub fn add(&mut self, transformation: Transformation) -> usize {
        if transformation.patterns.is_empty() {
            debug!("ignoring transformation without patterns");
        } else {
            self.items.push(transformation);
        }
        self.items.len()
    }

    /// Remove every transformation whose pattern list contains any of
    /// `patterns`, compared by source text. Returns the number remaining.
    pub fn remove(&mut self, patterns: &[Regex]) -> usize {
        self.items.retain(|item| {
            !item
                .patterns
                .iter()
                .any(|own| patterns.iter().any(|re| re.as_str() == own.as_str()))
        });
        self.items.len()
    }

    /// All registered transformations in registration order.
    #[must_use]
    pub fn get(&self) -> &[Transformation] {
        &self.items
    }

    /// First transformation matching any of `links`.
    #[must_use]
    pub fn find(&self, links: &[String]) -> Option<&Transformation> {
        self.items.iter().find(|item| item.matches(links))
    }

    /// Apply the matching pre-parse hook to a full document.
    ///
    /// Returns the input unchanged when no hook applies.
    #[must_use]
    pub fn exec_pre_parser(&self, html: &str, links: &[String]) -> String {
        let Some(hook) = self.find(links).and_then(|t| t.pre.as_ref()) else {
            return html.to_string();
        };

        let doc = Document::from(html);
        hook(&doc);
        doc.html().to_string()
    }

    /// Apply the matching post-parse hook to extracted content.
    ///
    /// Returns the input unchanged when no hook applies.
    #[must_use]
    pub fn exec_post_parser(&self, html: &str, links: &[String]) -> String {
        let Some(hook) = self.find(links).and_then(|t| t.post.as_ref()) else {
            return html.to_string();
        };

        let doc = Document::from(html);
        hook(&doc);
        dom::inner_html(&doc.select("body")).to_string()
    }
}

impl ParserHooks for Transformations {
    fn pre_parse(&self, html: &str, links: &[String]) -> String {
        self.exec_pre_parser(html, links)
    }

    fn post_parse(&self, html: &str, links: &[String]) -> String {
        self.exec_post_parser(html, links)
    }
}
