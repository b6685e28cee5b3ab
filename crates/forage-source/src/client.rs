//! Reference data backends.
//!
//! Uses enum dispatch instead of trait objects because async methods are not
//! dyn-compatible. Backends return raw response bodies; parsing and the
//! per-area tolerance rules live in the [`provider`](crate::provider). Area
//! listings come back with their status code, since an optional area may
//! answer "no data" with a non-success status.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::SourceConfig;
use crate::error::SourceError;

/// Status and raw body of one area drop listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, unparsed.
    pub body: String,
}

impl AreaResponse {
    /// A `200 OK` response carrying `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ---------------------------------------------------------------------------
// Unified backend enum
// ---------------------------------------------------------------------------

/// A backend that can serve the item listing and per-area drop listings.
#[derive(Debug)]
pub enum ReferenceSource {
    /// The live HTTP API.
    Http(HttpSource),
    /// Fixed response bodies held in memory.
    Canned(CannedSource),
}

impl ReferenceSource {
    /// Build the live HTTP backend for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn http(config: &SourceConfig) -> Result<Self, SourceError> {
        Ok(Self::Http(HttpSource::new(config)?))
    }

    /// Raw body of the full item listing.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the request fails.
    pub async fn fetch_items(&self) -> Result<String, SourceError> {
        match self {
            Self::Http(source) => source.fetch_items().await,
            Self::Canned(source) => source.fetch_items(),
        }
    }

    /// Status and raw body of one area's drop listing. A non-success status
    /// is returned, not turned into an error.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if no response arrives.
    pub async fn fetch_area(&self, area: &str) -> Result<AreaResponse, SourceError> {
        match self {
            Self::Http(source) => source.fetch_area(area).await,
            Self::Canned(source) => source.fetch_area(area),
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Http(_) => "http",
            Self::Canned(_) => "canned",
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP backend
// ---------------------------------------------------------------------------

/// Backend for the public reference data API.
///
/// Every request carries the configured timeout, so a hung upstream fails
/// the load instead of stalling it.
#[derive(Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    items_url: String,
    config: SourceConfig,
}

impl HttpSource {
    /// Create a new HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            items_url: config.items_url(),
            config: config.clone(),
        })
    }

    async fn fetch_items(&self) -> Result<String, SourceError> {
        let response = self.get(&self.items_url).await?;
        if !response.is_success() {
            return Err(SourceError::Http(format!(
                "GET {} returned status {}",
                self.items_url, response.status
            )));
        }
        Ok(response.body)
    }

    async fn fetch_area(&self, area: &str) -> Result<AreaResponse, SourceError> {
        self.get(&self.config.area_url(area)).await
    }

    async fn get(&self, url: &str) -> Result<AreaResponse, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Http(format!("GET {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(url, status, bytes = body.len(), "reference data fetched");
        Ok(AreaResponse { status, body })
    }
}

// ---------------------------------------------------------------------------
// Canned backend
// ---------------------------------------------------------------------------

/// Backend serving fixed bodies, for offline runs and tests.
///
/// A listing that was never provided behaves like an unreachable upstream.
#[derive(Debug, Clone, Default)]
pub struct CannedSource {
    items: Option<String>,
    areas: BTreeMap<String, AreaResponse>,
}

impl CannedSource {
    /// A source with no responses at all.
    pub const fn new() -> Self {
        Self {
            items: None,
            areas: BTreeMap::new(),
        }
    }

    /// Serve `body` as the item listing.
    #[must_use]
    pub fn with_items(mut self, body: impl Into<String>) -> Self {
        self.items = Some(body.into());
        self
    }

    /// Serve `body` as the drop listing of `area`.
    #[must_use]
    pub fn with_area(mut self, area: impl Into<String>, body: impl Into<String>) -> Self {
        self.areas.insert(area.into(), AreaResponse::ok(body));
        self
    }

    /// Serve `body` with `status` as the drop listing of `area`.
    #[must_use]
    pub fn with_area_status(
        mut self,
        area: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.areas.insert(
            area.into(),
            AreaResponse {
                status,
                body: body.into(),
            },
        );
        self
    }

    fn fetch_items(&self) -> Result<String, SourceError> {
        self.items
            .clone()
            .ok_or_else(|| SourceError::Http("no canned item listing".to_owned()))
    }

    fn fetch_area(&self, area: &str) -> Result<AreaResponse, SourceError> {
        self.areas
            .get(area)
            .cloned()
            .ok_or_else(|| SourceError::Http(format!("no canned listing for area {area}")))
    }
}
