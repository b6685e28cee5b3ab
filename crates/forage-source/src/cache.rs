//! Time-boxed JSON cache of the last fetched snapshot.
//!
//! The cache file is a serialized [`CatalogSnapshot`] whose `__timestamp`
//! records when it was fetched. A snapshot is reused while it is younger
//! than the configured TTL. A missing, unreadable, or corrupt file is
//! treated as stale: the next load simply fetches again.

use std::path::{Path, PathBuf};

use forage_types::CatalogSnapshot;
use tracing::{debug, info, warn};

use crate::error::SourceError;

/// Whether a snapshot fetched at `fetched_at` is still fresh at `now`.
pub fn is_fresh(fetched_at: i64, now: i64, ttl_secs: i64) -> bool {
    now.checked_sub(fetched_at)
        .is_some_and(|age| age < ttl_secs)
}

/// A snapshot cache backed by one JSON file.
#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
    ttl_secs: i64,
}

impl CacheFile {
    /// Cache at `path` whose entries stay fresh for `ttl_secs`.
    pub fn new(path: impl Into<PathBuf>, ttl_secs: i64) -> Self {
        Self {
            path: path.into(),
            ttl_secs,
        }
    }

    /// Location of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached snapshot if it exists and is fresh at `now`.
    pub async fn load_fresh(&self, now: i64) -> Option<CatalogSnapshot> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no cache file");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cache file unreadable, treating as stale");
                return None;
            }
        };

        let snapshot: CatalogSnapshot = match serde_json::from_slice(&bytes) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cache file corrupt, treating as stale");
                return None;
            }
        };

        if is_fresh(snapshot.timestamp, now, self.ttl_secs) {
            info!(
                path = %self.path.display(),
                fetched_at = snapshot.timestamp,
                items = snapshot.items.len(),
                "using cached reference data"
            );
            Some(snapshot)
        } else {
            info!(
                path = %self.path.display(),
                fetched_at = snapshot.timestamp,
                "cached reference data is stale"
            );
            None
        }
    }

    /// Overwrite the cache with `snapshot`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be written, or
    /// [`SourceError::Serialization`] if the snapshot cannot be encoded.
    pub async fn store(&self, snapshot: &CatalogSnapshot) -> Result<(), SourceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec(snapshot)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), "reference data cached");
        Ok(())
    }
}
