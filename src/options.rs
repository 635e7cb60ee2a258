//! Configuration options for article parsing and retrieval.
//!
//! `ParserOptions` holds the thresholds the extraction pipeline reads. It is
//! carried by each `Extractor` and never mutated during a call, so one
//! snapshot can be shared across threads.

use serde::Deserialize;

/// Default user agent sent by the retrieval client.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:104.0) Gecko/20100101 Firefox/104.0";

/// String similarity algorithm used to rank candidate URLs against the title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UrlCompareAlgorithm {
    /// Normalized Levenshtein similarity.
    #[default]
    Levenshtein,

    /// Sørensen–Dice coefficient over character bigrams.
    DiceCoefficient,

    /// Jaccard index over character bigram sets.
    JaccardIndex,
}

/// Thresholds and tuning for article extraction.
///
/// # Example
///
/// ```rust
/// use rs_article_parser::ParserOptions;
///
/// let options = ParserOptions {
///     content_length_threshold: 500,
///     ..ParserOptions::default()
/// };
/// assert_eq!(options.description_truncate_len, 210);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserOptions {
    /// A metadata description longer than this (in characters) is used verbatim.
    ///
    /// Default: `180`
    pub description_length_threshold: usize,

    /// Length (in characters) of the excerpt derived from content text.
    ///
    /// Default: `210`
    pub description_truncate_len: usize,

    /// Minimum length (in characters) of the extracted plain text.
    ///
    /// Extractions shorter than this are rejected.
    ///
    /// Default: `200`
    pub content_length_threshold: usize,

    /// Reading speed used for time-to-read.
    ///
    /// Default: `300`
    pub words_per_minute: usize,

    /// Algorithm used to pick the best URL among the candidates.
    ///
    /// Default: `Levenshtein`
    pub urls_compare_algorithm: UrlCompareAlgorithm,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            description_length_threshold: 180,
            description_truncate_len: 210,
            content_length_threshold: 200,
            words_per_minute: 300,
            urls_compare_algorithm: UrlCompareAlgorithm::Levenshtein,
        }
    }
}

/// Options for a single retrieval.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Transport to send the request with. Timeouts, proxies and redirect
    /// policy are configured on this client. A fresh client is built when unset.
    pub client: Option<reqwest::Client>,

    /// Value of the `user-agent` header. Falls back to [`DEFAULT_USER_AGENT`].
    pub user_agent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parser_options() {
        let opts = ParserOptions::default();

        assert_eq!(opts.description_length_threshold, 180);
        assert_eq!(opts.description_truncate_len, 210);
        assert_eq!(opts.content_length_threshold, 200);
        assert_eq!(opts.words_per_minute, 300);
        assert_eq!(opts.urls_compare_algorithm, UrlCompareAlgorithm::Levenshtein);
    }

    #[test]
    fn test_custom_thresholds() {
        let opts = ParserOptions {
            content_length_threshold: 50,
            words_per_minute: 200,
            ..ParserOptions::default()
        };

        assert_eq!(opts.content_length_threshold, 50);
        assert_eq!(opts.words_per_minute, 200);
        assert_eq!(opts.description_length_threshold, 180);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let json = r#"{"contentLengthThreshold": 120, "urlsCompareAlgorithm": "diceCoefficient"}"#;
        let opts: ParserOptions = serde_json::from_str(json).unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(opts.content_length_threshold, 120);
        assert_eq!(opts.urls_compare_algorithm, UrlCompareAlgorithm::DiceCoefficient);
        assert_eq!(opts.description_truncate_len, 210);
    }

    #[test]
    fn test_fetch_options_default() {
        let opts = FetchOptions::default();
        assert!(opts.client.is_none());
        assert!(opts.user_agent.is_none());
    }
}
