//! Error types for the runner.
//!
//! Uses `thiserror` for typed errors that surface through startup and the
//! command session: configuration, reference data loading, engine setup,
//! and terminal I/O.

use forage_core::CoreError;
use forage_source::SourceError;

use crate::config::ConfigError;

/// Errors that can occur during runner operation.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration is invalid or unreadable.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Reference data could not be loaded.
    #[error("reference data error: {0}")]
    Source(#[from] SourceError),

    /// The engine rejected its configuration.
    #[error("engine error: {0}")]
    Engine(#[from] CoreError),

    /// Reading commands or writing replies failed.
    #[error("session I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunnerError {
    /// Whether the operation that failed is worth retrying after a delay.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Source(e) => e.is_retryable(),
            Self::Config(_) | Self::Engine(_) | Self::Io(_) => false,
        }
    }
}
