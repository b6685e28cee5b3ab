//! Enumeration types shared across the Forage workspace.
//!
//! The upstream item catalog tags every record with an `ItemType` string and
//! carries one column per stat. Only a handful of those values matter to the
//! recommendation engine; everything else collapses into [`Category::Other`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Item categories
// ---------------------------------------------------------------------------

/// The category tag of a catalog item.
///
/// Recommendations are only ever produced for consumables
/// ([`Category::Food`] and [`Category::Beverage`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Something eaten to restore health.
    Food,
    /// Something drunk to restore stamina.
    Beverage,
    /// A crafting material.
    Material,
    /// Any other upstream category (weapons, armor, ...).
    #[serde(other)]
    Other,
}

impl Category {
    /// Whether items of this category can be recommended.
    pub const fn is_consumable(self) -> bool {
        matches!(self, Self::Food | Self::Beverage)
    }
}

// ---------------------------------------------------------------------------
// Tracked stats
// ---------------------------------------------------------------------------

/// A stat the engine ranks consumables by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Health restored on use.
    Heal,
    /// Stamina (SP) restored on use.
    SpRestore,
}

impl Stat {
    /// Every tracked stat, in report order.
    pub const ALL: [Self; 2] = [Self::Heal, Self::SpRestore];

    /// The upstream column name, also used as the label in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heal => "Heal",
            Self::SpRestore => "SpRestore",
        }
    }
}

impl core::fmt::Display for Stat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_food_and_beverage_are_consumable() {
        assert!(Category::Food.is_consumable());
        assert!(Category::Beverage.is_consumable());
        assert!(!Category::Material.is_consumable());
        assert!(!Category::Other.is_consumable());
    }

    #[test]
    fn unknown_category_deserializes_as_other() {
        let parsed: Result<Category, _> = serde_json::from_str("\"Weapon\"");
        assert_eq!(parsed.ok(), Some(Category::Other));
        let food: Result<Category, _> = serde_json::from_str("\"Food\"");
        assert_eq!(food.ok(), Some(Category::Food));
    }

    #[test]
    fn stat_labels_match_upstream_columns() {
        assert_eq!(Stat::Heal.to_string(), "Heal");
        assert_eq!(Stat::SpRestore.as_str(), "SpRestore");
    }
}
