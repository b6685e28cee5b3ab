//! Reference data loading: cache first, upstream second.
//!
//! A load reuses the cache file while it is fresh. Otherwise it fetches the
//! item listing and every configured area, merges in the map-gathered
//! ingredients, stamps the snapshot with the fetch time, validates it as a
//! [`Catalog`], and only then overwrites the cache.

use forage_catalog::{Catalog, augment_areas};
use forage_types::{AreaDropRecord, AreaDrops, CatalogSnapshot, ItemRecord};
use tracing::{info, warn};

use crate::cache::CacheFile;
use crate::client::{AreaResponse, ReferenceSource};
use crate::config::SourceConfig;
use crate::error::SourceError;

/// Loads catalogs from a [`ReferenceSource`] through a [`CacheFile`].
#[derive(Debug)]
pub struct ReferenceDataProvider {
    source: ReferenceSource,
    cache: CacheFile,
    config: SourceConfig,
}

impl ReferenceDataProvider {
    /// Create a provider over `source`, caching at `config.cache_path`.
    pub fn new(source: ReferenceSource, config: SourceConfig) -> Self {
        let cache = CacheFile::new(config.cache_path.clone(), config.cache_ttl_secs);
        Self {
            source,
            cache,
            config,
        }
    }

    /// Seconds a loaded catalog stays fresh.
    pub const fn ttl_secs(&self) -> i64 {
        self.config.cache_ttl_secs
    }

    /// Load a catalog as of the current time.
    ///
    /// # Errors
    ///
    /// See [`Self::load_at`].
    pub async fn load(&self, force_refresh: bool) -> Result<Catalog, SourceError> {
        self.load_at(force_refresh, chrono::Utc::now().timestamp())
            .await
    }

    /// Load a catalog as of `now` (unix seconds).
    ///
    /// With `force_refresh` the cache is never read, only written.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if upstream is unreachable,
    /// [`SourceError::Serialization`] if the item listing is malformed,
    /// [`SourceError::MalformedArea`] if a required area listing is
    /// malformed, or [`SourceError::Catalog`] if the data does not form a
    /// valid catalog.
    pub async fn load_at(&self, force_refresh: bool, now: i64) -> Result<Catalog, SourceError> {
        if !force_refresh {
            if let Some(snapshot) = self.cache.load_fresh(now).await {
                match Catalog::from_snapshot(&snapshot) {
                    Ok(catalog) => return Ok(catalog),
                    Err(e) => {
                        warn!(error = %e, "cached snapshot rejected, refetching");
                    }
                }
            }
        }

        let snapshot = self.fetch_snapshot(now).await?;
        let catalog = Catalog::from_snapshot(&snapshot)?;

        if let Err(e) = self.cache.store(&snapshot).await {
            warn!(
                path = %self.cache.path().display(),
                error = %e,
                "failed to write cache file"
            );
        }

        info!(
            source = self.source.name(),
            items = catalog.len(),
            fetched_at = now,
            "reference data fetched"
        );
        Ok(catalog)
    }

    /// Fetch a fresh, augmented snapshot from upstream.
    async fn fetch_snapshot(&self, now: i64) -> Result<CatalogSnapshot, SourceError> {
        let mut snapshot = CatalogSnapshot::default();

        let body = self.source.fetch_items().await?;
        let records: Vec<ItemRecord> = serde_json::from_str(&body)?;
        for record in records {
            snapshot.insert_item(record);
        }

        for area in &self.config.areas {
            let response = self.source.fetch_area(area).await?;
            let drops = self.parse_area(area, &response)?;
            snapshot.areas.insert(area.clone(), drops);
        }

        augment_areas(&mut snapshot.areas);
        snapshot.timestamp = now;
        Ok(snapshot)
    }

    /// Parse one area listing. Optional areas may answer with any status or
    /// a non-JSON body, which counts as no drops.
    fn parse_area(&self, area: &str, response: &AreaResponse) -> Result<AreaDrops, SourceError> {
        let optional = self.config.optional_areas.contains(area);
        if !response.is_success() {
            if optional {
                warn!(area, status = response.status, "area has no drop data");
                return Ok(AreaDrops::new());
            }
            return Err(SourceError::Http(format!(
                "drop listing for area {area} returned status {}",
                response.status
            )));
        }

        match serde_json::from_str::<Vec<AreaDropRecord>>(&response.body) {
            Ok(rows) => Ok(rows
                .into_iter()
                .map(|row| (row.item_name, row.drop_count))
                .collect()),
            Err(e) if optional => {
                warn!(area, error = %e, "area has no drop data");
                Ok(AreaDrops::new())
            }
            Err(source) => Err(SourceError::MalformedArea {
                area: area.to_owned(),
                source,
            }),
        }
    }
}
