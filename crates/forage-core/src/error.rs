//! Error types for the `forage-core` crate.
//!
//! Validation problems (unknown policy, unknown zone) are not errors here:
//! they are collected as user-facing diagnostics by the pipeline. A
//! [`CoreError`] always aborts the request it occurred in.

use forage_catalog::CatalogError;

/// Errors that abort a recommendation request.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A catalog lookup failed.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: CatalogError,
    },

    /// Yield or total computation overflowed.
    #[error("arithmetic overflow while resolving {item}")]
    ArithmeticOverflow {
        /// The item being resolved.
        item: String,
    },

    /// The engine configuration is unusable.
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}
