//! Reference data source settings.
//!
//! [`SourceConfig`] mirrors the `source:` section of `forage-config.yaml`.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Where reference data comes from and how long a local copy stays fresh.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the reference data API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the JSON cache file.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// Seconds a cached snapshot stays fresh.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: i64,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Areas whose drop listings are fetched, in request order.
    #[serde(default = "default_areas")]
    pub areas: Vec<String>,

    /// Areas allowed to answer with a non-JSON "no data" body.
    #[serde(default = "default_optional_areas")]
    pub optional_areas: BTreeSet<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cache_path: default_cache_path(),
            cache_ttl_secs: default_cache_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            areas: default_areas(),
            optional_areas: default_optional_areas(),
        }
    }
}

impl SourceConfig {
    /// HTTP request timeout as a [`Duration`].
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// URL of the full item listing.
    pub fn items_url(&self) -> String {
        format!("{}/item/all", self.base_url.trim_end_matches('/'))
    }

    /// URL of one area's drop listing.
    pub fn area_url(&self, area: &str) -> String {
        format!(
            "{}/area?areaName={area}",
            self.base_url.trim_end_matches('/')
        )
    }
}

fn default_base_url() -> String {
    "http://api.playeternalreturn.com/aesop".to_owned()
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("extra_files/api_results.json")
}

const fn default_cache_ttl_secs() -> i64 {
    10_800
}

const fn default_request_timeout_secs() -> u64 {
    30
}

fn default_areas() -> Vec<String> {
    [
        "Alley",
        "Temple",
        "Avenue",
        "Pond",
        "Hospital",
        "Archery Range",
        "School",
        "Research Center",
        "Cemetery",
        "Factory",
        "Hotel",
        "Forest",
        "Chapel",
        "Beach",
        "Uptown",
        "Dock",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn default_optional_areas() -> BTreeSet<String> {
    BTreeSet::from(["Research Center".to_owned()])
}
