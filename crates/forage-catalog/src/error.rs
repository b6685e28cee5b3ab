//! Error types for the `forage-catalog` crate.
//!
//! All fallible operations in this crate return [`CatalogError`].

/// Errors that can occur while building or querying the item catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A recipe names a material that is not in the catalog.
    #[error("item {item} references unknown material {material}")]
    UnknownMaterial {
        /// The recipe item.
        item: String,
        /// The missing material name.
        material: String,
    },

    /// A recipe has exactly one of its two materials.
    #[error("item {item} has only one crafting material")]
    IncompleteRecipe {
        /// The malformed recipe item.
        item: String,
    },

    /// The recipe graph loops back on itself.
    #[error("recipe cycle detected through item {item}")]
    Cycle {
        /// An item on the cycle.
        item: String,
    },

    /// A lookup used a name or handle the catalog does not know.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// The catalog holds more items than a handle can address.
    #[error("catalog too large: {0} items")]
    TooManyItems(usize),
}
