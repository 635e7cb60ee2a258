//! HTTP retrieval of HTML documents.
//!
//! One GET per call, no retries. Status codes of 400 and above and non-text
//! content types are reported as errors.

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, warn};

use crate::encoding;
use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::options::{FetchOptions, DEFAULT_USER_AGENT};
use crate::result::Article;

/// Content type assumed when a response does not declare one.
const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Fetch `url` and return the body decoded to UTF-8.
///
/// # Errors
///
/// - [`Error::InvalidUrl`] when `url` does not parse
/// - [`Error::Network`] for status codes of 400 and above
/// - [`Error::UnsupportedContentType`] when the content type lacks `text/`
/// - [`Error::Request`] when the transport fails
pub async fn fetch_html(url: &str, options: &FetchOptions) -> Result<String> {
    let parsed = url::Url::parse(url.trim()).map_err(|_| Error::InvalidUrl(url.to_string()))?;

    let client = match &options.client {
        Some(client) => client.clone(),
        None => reqwest::Client::builder().build()?,
    };
    let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

    debug!(%parsed, "fetching");
    let response = client
        .get(parsed)
        .header(USER_AGENT, user_agent)
        .send()
        .await?;

    let status = response.status().as_u16();
    if status >= 400 {
        warn!(url, status, "request failed");
        return Err(Error::Network { status });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    if !content_type.to_ascii_lowercase().contains("text/") {
        warn!(url, %content_type, "unsupported content type");
        return Err(Error::UnsupportedContentType(content_type));
    }

    let body = response.bytes().await?;
    Ok(encoding::decode_body(&body, Some(&content_type)))
}

/// Fetch `url` and extract an article with default options.
///
/// `Ok(None)` means the page was retrieved but held no usable article.
pub async fn fetch_article(url: &str, options: &FetchOptions) -> Result<Option<Article>> {
    fetch_article_with(&Extractor::default(), url, options).await
}

/// Fetch `url` and extract an article with `extractor`.
pub async fn fetch_article_with(
    extractor: &Extractor,
    url: &str,
    options: &FetchOptions,
) -> Result<Option<Article>> {
    let html = fetch_html(url, options).await?;
    Ok(extractor.extract(&html, Some(url)))
}
