//! Item arena, area tables, and route resolution for the Forage route planner.
//!
//! This crate models the static game world: which items exist, how they are
//! crafted, and where they can be found. Everything here is read-only once
//! built and can be shared freely between concurrent requests.
//!
//! # Modules
//!
//! - [`augment`] -- Map-gathered ingredients merged into the area tables.
//! - [`catalog`] -- [`Catalog`] arena with name-to-handle resolution and
//!   recipe cycle validation.
//! - [`error`] -- Error types for catalog construction and lookup.
//! - [`zones`] -- Zone index table, [`Route`] resolution, area listing.

pub mod augment;
pub mod catalog;
pub mod error;
pub mod zones;

// Re-export primary types at crate root.
pub use augment::augment_areas;
pub use catalog::{Catalog, Item, ItemId, Recipe};
pub use error::CatalogError;
pub use zones::{AREA_INDEX, Route, RouteDiagnostic, list_areas, resolve_route};
