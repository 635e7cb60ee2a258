//! Readability main-content detection via `dom_smoothie`.

use dom_smoothie::{Article, Config, Readability};
use tracing::debug;

use crate::capabilities::ContentExtractor;

/// Upper bound on elements scored by readability.
const MAX_ELEMENTS_TO_PARSE: usize = 9000;

fn parse_article(html: &str, url: &str) -> Option<Article> {
    let cfg = Config {
        max_elements_to_parse: MAX_ELEMENTS_TO_PARSE,
        keep_classes: true,
        ..Default::default()
    };

    let doc_url = (!url.trim().is_empty()).then_some(url.trim());
    let mut readability = match Readability::new(html, doc_url, Some(cfg)) {
        Ok(readability) => readability,
        Err(err) => {
            debug!(%err, "readability rejected document");
            return None;
        }
    };

    match readability.parse() {
        Ok(article) => Some(article),
        Err(err) => {
            debug!(%err, "readability found no article");
            None
        }
    }
}

/// Title readability derives for `html`, or `None` when it is empty.
#[must_use]
pub fn extract_title_with_readability(html: &str, url: &str) -> Option<String> {
    let title = parse_article(html, url)?.title;
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Main content markup of `html`, or `None` when nothing readable exists.
///
/// `url` resolves relative links inside the extracted content.
#[must_use]
pub fn extract_with_readability(html: &str, url: &str) -> Option<String> {
    let article = parse_article(html, url)?;

    if article.text_content.trim().is_empty() {
        debug!("readability content has no text");
        return None;
    }

    Some(article.content.to_string())
}

/// Default [`ContentExtractor`] backed by `dom_smoothie`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityExtractor;

impl ContentExtractor for ReadabilityExtractor {
    fn extract_title(&self, html: &str, url: &str) -> Option<String> {
        extract_title_with_readability(html, url)
    }

    fn extract_content(&self, html: &str, url: &str) -> Option<String> {
        extract_with_readability(html, url)
    }
}
