//! Shared type definitions for the Forage route planner.
//!
//! This crate is the single source of truth for the reference-data records
//! exchanged between the data source, the catalog, and the recommendation
//! engine.
//!
//! # Modules
//!
//! - [`enums`] -- Item categories and the stats the engine ranks by
//! - [`structs`] -- Upstream item/area rows and the cached catalog snapshot

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Category, Stat};
pub use structs::{AreaDropRecord, AreaDrops, CatalogSnapshot, ItemRecord};
