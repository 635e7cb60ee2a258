//! Error types for rs-article-parser.
//!
//! Only the retrieval boundary produces errors. Extraction itself reports
//! "no usable article" as `None` so batch callers can skip a document.

/// Error type for retrieval operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a status code of 400 or above.
    #[error("Request failed with error code {status}")]
    Network {
        /// HTTP status code of the response.
        status: u16,
    },

    /// The response body is not a text document.
    #[error("Content type must be \"text/html\", not \"{0}\"")]
    UnsupportedContentType(String),

    /// The URL to fetch could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport failed before a response was received.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, Error>;
