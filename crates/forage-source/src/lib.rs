//! Reference data client and disk cache for the Forage route planner.
//!
//! The item and area tables come from a public HTTP API that changes rarely
//! and answers slowly. This crate fetches them, keeps a time-boxed JSON copy
//! on disk, and hands out validated [`Catalog`](forage_catalog::Catalog)
//! values.
//!
//! # Architecture
//!
//! ```text
//! ReferenceDataProvider::load
//!     |
//!     +-- fresh cache? --------> CacheFile (extra_files/api_results.json)
//!     |
//!     +-- otherwise -----------> ReferenceSource (HTTP or canned)
//!         |-- item listing
//!         |-- one drop listing per area
//!         +-- augment, stamp, validate, cache
//! ```
//!
//! # Modules
//!
//! - [`cache`] -- Snapshot cache file with freshness checks
//! - [`client`] -- [`ReferenceSource`] backends
//! - [`config`] -- [`SourceConfig`] settings
//! - [`error`] -- Shared error types
//! - [`provider`] -- [`ReferenceDataProvider`] load orchestration

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod provider;

// Re-export primary types for convenience.
pub use cache::CacheFile;
pub use client::{AreaResponse, CannedSource, HttpSource, ReferenceSource};
pub use config::SourceConfig;
pub use error::SourceError;
pub use provider::ReferenceDataProvider;
