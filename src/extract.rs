//! Article extraction pipeline.
//!
//! Resolves the title and the candidate URLs from metadata, picks the best
//! URL, runs the content chain (normalize, pre-parse, readability, post-parse,
//! clean) and assembles an [`Article`]. Every step that cannot produce a usable
//! value ends the extraction with `None`.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::capabilities::{
    ContentExtractor, MetadataExtractor, ParserHooks, UrlChooser, UrlPurifier,
};
use crate::html_processing;
use crate::metadata::MetaTagExtractor;
use crate::options::ParserOptions;
use crate::readability::ReadabilityExtractor;
use crate::result::{Article, MetaRecord};
use crate::text;
use crate::transformation::Transformations;
use crate::url_utils::{self, SimilarityChooser, TrackingParamPurifier};

/// Extracts articles from HTML with a fixed set of options and collaborators.
///
/// Cheap to clone and safe to share across threads.
///
/// # Example
///
/// ```rust
/// use rs_article_parser::{Extractor, ParserOptions};
///
/// let extractor = Extractor::builder()
///     .options(ParserOptions {
///         content_length_threshold: 50,
///         ..ParserOptions::default()
///     })
///     .build();
///
/// assert!(extractor.extract("<html><body></body></html>", None).is_none());
/// ```
#[derive(Clone)]
pub struct Extractor {
    options: ParserOptions,
    metadata: Arc<dyn MetadataExtractor>,
    content: Arc<dyn ContentExtractor>,
    purifier: Arc<dyn UrlPurifier>,
    chooser: Arc<dyn UrlChooser>,
    hooks: Arc<dyn ParserHooks>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Extractor {
    /// Start building an extractor with the default collaborators.
    #[must_use]
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::default()
    }

    /// Options this extractor was built with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Extract an article from `html`.
    ///
    /// `source_url` is the address the document was loaded from; it is the
    /// last URL candidate and is used to resolve the readability title.
    /// Returns `None` when no title, no valid URL or not enough content is
    /// found.
    #[must_use]
    pub fn extract(&self, html: &str, source_url: Option<&str>) -> Option<Article> {
        let input_url = source_url.unwrap_or_default().trim();

        let html = html_processing::cleanify(html);
        let meta = self.metadata.extract_metadata(&html);

        let title = self.resolve_title(&meta, &html, input_url)?;
        let links = self.resolve_candidates(&meta, input_url)?;
        let best_url = self.resolve_best_url(&links, &title);

        let Some(content) = self.compose_content(&html, &best_url, &links) else {
            debug!(url = %best_url, "no content extracted");
            return None;
        };

        let text_content = text::strip_tags(&content);
        let text_len = text_content.chars().count();
        if text_len < self.options.content_length_threshold {
            debug!(
                url = %best_url,
                text_len,
                threshold = self.options.content_length_threshold,
                "content below length threshold"
            );
            return None;
        }

        let description = self.summarize(&meta.description, &text_content);
        let image = resolve_image(&best_url, &meta.image);
        let ttr = text::get_time_to_read(&text_content, self.options.words_per_minute);

        Some(Article {
            source: url_utils::get_domain(&best_url),
            url: best_url,
            title,
            description,
            links,
            image,
            content,
            author: meta.author,
            published: meta.published,
            ttr,
        })
    }

    /// Metadata title, else the readability title.
    fn resolve_title(&self, meta: &MetaRecord, html: &str, input_url: &str) -> Option<String> {
        if !meta.title.trim().is_empty() {
            return Some(meta.title.clone());
        }

        let title = self
            .content
            .extract_title(html, input_url)
            .filter(|title| !title.trim().is_empty());
        if title.is_none() {
            debug!(url = input_url, "no title found");
        }
        title
    }

    /// Valid, purified, deduplicated candidate URLs in priority order.
    fn resolve_candidates(&self, meta: &MetaRecord, input_url: &str) -> Option<Vec<String>> {
        let raw = [
            meta.url.as_str(),
            meta.shortlink.as_str(),
            meta.amphtml.as_str(),
            meta.canonical.as_str(),
            input_url,
        ];

        let mut links: Vec<String> = Vec::with_capacity(raw.len());
        for candidate in raw {
            if !url_utils::is_valid_url(candidate) {
                continue;
            }
            let Some(purified) = self.purifier.purify(candidate) else {
                continue;
            };
            if !links.contains(&purified) {
                links.push(purified);
            }
        }

        if links.is_empty() {
            debug!(url = input_url, "no valid candidate url");
            return None;
        }

        Some(links)
    }

    /// Best URL among `links`; never a URL outside the set.
    fn resolve_best_url(&self, links: &[String], title: &str) -> String {
        let first = links.first().cloned().unwrap_or_default();

        match self.chooser.choose_best_url(links, title) {
            Some(url) if links.contains(&url) => url,
            Some(url) => {
                warn!(%url, fallback = %first, "best url is not a candidate");
                first
            }
            None => first,
        }
    }

    /// Normalize, pre-parse, readability, post-parse, clean-and-minify.
    fn compose_content(&self, html: &str, best_url: &str, links: &[String]) -> Option<String> {
        let normalized = url_utils::normalize_urls(html, best_url);
        let prepared = self.hooks.pre_parse(&normalized, links);

        self.content
            .extract_content(&prepared, best_url)
            .and_then(|content| non_empty(self.hooks.post_parse(&content, links)))
            .and_then(|content| non_empty(html_processing::clean_and_minify(&content)))
    }

    /// Authored description when long enough, else an excerpt of the text.
    fn summarize(&self, description: &str, text_content: &str) -> String {
        if description.chars().count() > self.options.description_length_threshold {
            return description.to_string();
        }

        text::truncate(text_content, self.options.description_truncate_len).replace('\n', " ")
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

/// Absolute image URL, or empty when there is none.
fn resolve_image(best_url: &str, image: &str) -> String {
    if image.is_empty() {
        return String::new();
    }

    let resolved = url_utils::absolutify_url(best_url, image);
    if url_utils::is_absolute_url(&resolved).0 {
        resolved
    } else {
        String::new()
    }
}

/// Builder for [`Extractor`].
///
/// Unset collaborators fall back to the crate defaults: meta-tag metadata,
/// `dom_smoothie` readability, tracking-parameter purification, similarity
/// ranking with the configured algorithm and an empty transformation registry.
#[derive(Default)]
pub struct ExtractorBuilder {
    options: ParserOptions,
    metadata: Option<Arc<dyn MetadataExtractor>>,
    content: Option<Arc<dyn ContentExtractor>>,
    purifier: Option<Arc<dyn UrlPurifier>>,
    chooser: Option<Arc<dyn UrlChooser>>,
    hooks: Option<Arc<dyn ParserHooks>>,
}

impl ExtractorBuilder {
    /// Thresholds and tuning.
    #[must_use]
    pub fn options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace metadata parsing.
    #[must_use]
    pub fn metadata_extractor(mut self, extractor: impl MetadataExtractor + 'static) -> Self {
        self.metadata = Some(Arc::new(extractor));
        self
    }

    /// Replace readability title and content extraction.
    #[must_use]
    pub fn content_extractor(mut self, extractor: impl ContentExtractor + 'static) -> Self {
        self.content = Some(Arc::new(extractor));
        self
    }

    /// Replace URL purification.
    #[must_use]
    pub fn url_purifier(mut self, purifier: impl UrlPurifier + 'static) -> Self {
        self.purifier = Some(Arc::new(purifier));
        self
    }

    /// Replace best-URL ranking.
    #[must_use]
    pub fn url_chooser(mut self, chooser: impl UrlChooser + 'static) -> Self {
        self.chooser = Some(Arc::new(chooser));
        self
    }

    /// Install pre/post parser hooks, such as a [`Transformations`] registry.
    #[must_use]
    pub fn parser_hooks(mut self, hooks: impl ParserHooks + 'static) -> Self {
        self.hooks = Some(Arc::new(hooks));
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Extractor {
        let algorithm = self.options.urls_compare_algorithm;
        Extractor {
            options: self.options,
            metadata: self.metadata.unwrap_or_else(|| Arc::new(MetaTagExtractor)),
            content: self.content.unwrap_or_else(|| Arc::new(ReadabilityExtractor)),
            purifier: self.purifier.unwrap_or_else(|| Arc::new(TrackingParamPurifier)),
            chooser: self
                .chooser
                .unwrap_or_else(|| Arc::new(SimilarityChooser { algorithm })),
            hooks: self.hooks.unwrap_or_else(|| Arc::new(Transformations::new())),
        }
    }
}
