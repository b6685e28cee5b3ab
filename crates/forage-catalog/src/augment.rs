//! Ingredients that never show up in upstream area drop lists.
//!
//! Some ingredients are gathered from the map itself rather than from item
//! boxes, so the per-area API never reports them. They are merged into the
//! area tables once, right after the raw catalog has been fetched and before
//! it is cached:
//!
//! - `Stone`, `Branch` and `Meat` can be found in every area.
//! - `Potato`, `Cod`, `Carp` and `Water` spawn only in designated areas.

use std::collections::BTreeMap;

use forage_types::AreaDrops;
use tracing::debug;

/// Drop weight recorded for ingredients found in every area.
pub const UBIQUITOUS_WEIGHT: u32 = 99;

/// Ingredients available in every area.
pub const UBIQUITOUS_ITEMS: &[&str] = &["Stone", "Branch", "Meat"];

/// Ingredients available only in specific areas, with their drop weights.
pub const AREA_SPECIFIC_ITEMS: &[(&str, &[(&str, u32)])] = &[
    ("Potato", &[("Alley", 4), ("Temple", 8), ("Pond", 4)]),
    ("Cod", &[("Beach", 4), ("Uptown", 4), ("Dock", 4)]),
    ("Carp", &[("Forest", 2), ("Pond", 9), ("Cemetery", 2)]),
    (
        "Water",
        &[
            ("Hotel", 4),
            ("Forest", 3),
            ("Cemetery", 4),
            ("Pond", 11),
            ("Chapel", 1),
        ],
    ),
];

/// Merge the map-gathered ingredients into the fetched area tables.
///
/// Area specific ingredients create their area entry if upstream did not list
/// it. Ubiquitous ingredients are then added to every area.
/// Existing weights for these ingredients are overwritten.
pub fn augment_areas(areas: &mut BTreeMap<String, AreaDrops>) {
    for &(item, placements) in AREA_SPECIFIC_ITEMS {
        for &(area, weight) in placements {
            areas
                .entry(area.to_owned())
                .or_default()
                .insert(item.to_owned(), weight);
        }
    }

    // Runs last so areas created above get them too.
    for drops in areas.values_mut() {
        for &item in UBIQUITOUS_ITEMS {
            drops.insert(item.to_owned(), UBIQUITOUS_WEIGHT);
        }
    }

    debug!(areas = areas.len(), "area tables augmented");
}
