//! Error types for reference data loading.
//!
//! All errors are propagated via [`SourceError`]. Callers decide whether to
//! retry with [`SourceError::is_retryable`]: upstream transport failures are
//! worth another attempt, everything else means the data itself is bad.

use forage_catalog::CatalogError;

/// Errors that can occur while fetching, caching, or loading reference data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The upstream API was unreachable, timed out, or returned a non-success
    /// status.
    #[error("upstream request failed: {0}")]
    Http(String),

    /// An area listing was not valid JSON.
    #[error("malformed drop listing for area {area}: {source}")]
    MalformedArea {
        /// The area whose listing failed to parse.
        area: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A cache file operation failed.
    #[error("cache I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The fetched data does not form a valid catalog.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl SourceError {
    /// Whether retrying the same load later might succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
