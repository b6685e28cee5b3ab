//! Shared, swappable catalog for the command session.
//!
//! Requests clone the current `Arc<Catalog>` and work on that snapshot for
//! their whole lifetime. A refresh builds a complete new catalog first and
//! only then swaps the `Arc`, so no request ever sees a half-loaded catalog.
//!
//! After a failed reload the handle waits `retry_delay_secs` before it asks
//! upstream again, so an outage costs one fetch per delay window rather than
//! one per command.

use std::sync::Arc;

use forage_catalog::Catalog;
use forage_source::cache::is_fresh;
use forage_source::{ReferenceDataProvider, SourceError};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::RunnerSettings;

/// The live catalog plus the provider that can reload it.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
    provider: ReferenceDataProvider,
    retry_delay_secs: i64,
    /// Unix time of the last failed reload, if the last attempt failed.
    last_failure: RwLock<Option<i64>>,
}

impl CatalogHandle {
    /// Load the initial catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the first load fails.
    pub async fn load(
        provider: ReferenceDataProvider,
        settings: &RunnerSettings,
    ) -> Result<Self, SourceError> {
        let catalog = provider.load(settings.force_refresh).await?;
        info!(
            items = catalog.len(),
            fetched_at = catalog.fetched_at(),
            "catalog loaded"
        );
        Ok(Self::with_catalog(catalog, provider, settings))
    }

    fn with_catalog(
        catalog: Catalog,
        provider: ReferenceDataProvider,
        settings: &RunnerSettings,
    ) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
            provider,
            retry_delay_secs: i64::try_from(settings.retry_delay_secs).unwrap_or(i64::MAX),
            last_failure: RwLock::new(None),
        }
    }

    /// The catalog to serve the next request from.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&*self.current.read().await)
    }

    /// Reload and swap the catalog if it is older than the freshness window
    /// at `now`. Returns whether a swap happened.
    ///
    /// A failed reload keeps the current catalog, and no new attempt is made
    /// until `retry_delay_secs` after the failure.
    pub async fn refresh_if_stale(&self, now: i64) -> bool {
        let fetched_at = self.current.read().await.fetched_at();
        if is_fresh(fetched_at, now, self.provider.ttl_secs()) {
            return false;
        }

        let last_failure = *self.last_failure.read().await;
        if last_failure
            .is_some_and(|failed_at| is_fresh(failed_at, now, self.retry_delay_secs))
        {
            debug!(?last_failure, "catalog refresh backing off");
            return false;
        }

        match self.provider.load_at(false, now).await {
            Ok(catalog) => {
                info!(
                    items = catalog.len(),
                    previous = fetched_at,
                    fetched_at = catalog.fetched_at(),
                    "catalog refreshed"
                );
                *self.current.write().await = Arc::new(catalog);
                *self.last_failure.write().await = None;
                true
            }
            Err(e) => {
                warn!(
                    error = %e,
                    retry_in_secs = self.retry_delay_secs,
                    "catalog refresh failed, keeping current snapshot"
                );
                *self.last_failure.write().await = Some(now);
                false
            }
        }
    }
}
