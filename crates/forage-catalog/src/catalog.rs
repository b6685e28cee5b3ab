//! The item arena: every catalog item addressed by a compact [`ItemId`].
//!
//! Upstream records reference their crafting materials by name. Building a
//! [`Catalog`] resolves those names to handles exactly once and then checks
//! that the recipe graph is acyclic, so every later recursive walk (feasibility,
//! yield, leaf ingredients) is guaranteed to terminate.
//!
//! Items are numbered in ascending name order, which gives every consumer a
//! stable, deterministic iteration order for the same snapshot.

use std::collections::BTreeMap;

use forage_types::{AreaDrops, CatalogSnapshot, Category, ItemRecord, Stat};
use tracing::debug;

use crate::error::CatalogError;

/// Handle to an item stored in a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u32);

impl ItemId {
    /// Handle for arena position `raw`. Looking up a handle the catalog never
    /// issued fails with [`CatalogError::UnknownItem`].
    pub const fn from_index(raw: u32) -> Self {
        Self(raw)
    }

    /// Position of the item in the arena.
    pub fn index(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two materials a composite item is crafted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// First material.
    pub material1: ItemId,
    /// Second material.
    pub material2: ItemId,
}

/// A resolved catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique item name.
    pub name: String,
    /// Category tag.
    pub category: Category,
    /// Health restored, if any.
    pub heal: Option<u32>,
    /// Stamina restored, if any.
    pub sp_restore: Option<u32>,
    /// Crafting recipe; `None` for base ingredients.
    pub recipe: Option<Recipe>,
    /// Units produced per successful craft.
    pub initial_count: u32,
}

impl Item {
    /// Whether the item has no recipe.
    pub const fn is_base(&self) -> bool {
        self.recipe.is_none()
    }

    /// The value of `stat`, or `None` if the item does not contribute it.
    pub const fn stat(&self, stat: Stat) -> Option<u32> {
        match stat {
            Stat::Heal => self.heal,
            Stat::SpRestore => self.sp_restore,
        }
    }
}

/// Read-only item and area tables for one reference-data snapshot.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    by_name: BTreeMap<String, ItemId>,
    areas: BTreeMap<String, AreaDrops>,
    fetched_at: i64,
}

impl Catalog {
    /// Build a catalog from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownMaterial`] for a dangling material
    /// reference, [`CatalogError::IncompleteRecipe`] for a record with only
    /// one material, and [`CatalogError::Cycle`] if the recipes loop.
    pub fn from_snapshot(snapshot: &CatalogSnapshot) -> Result<Self, CatalogError> {
        let mut by_name = BTreeMap::new();
        for (index, name) in snapshot.items.keys().enumerate() {
            let raw = u32::try_from(index)
                .ok()
                .ok_or(CatalogError::TooManyItems(snapshot.items.len()))?;
            by_name.insert(name.clone(), ItemId(raw));
        }

        let items = snapshot
            .items
            .values()
            .map(|record| resolve_record(record, &by_name))
            .collect::<Result<Vec<_>, _>>()?;

        validate_acyclic(&items)?;

        debug!(
            items = items.len(),
            areas = snapshot.areas.len(),
            fetched_at = snapshot.timestamp,
            "catalog built"
        );

        Ok(Self {
            items,
            by_name,
            areas: snapshot.areas.clone(),
            fetched_at: snapshot.timestamp,
        })
    }

    /// Get an item by handle.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    /// Get an item by handle, failing with [`CatalogError::UnknownItem`].
    pub fn item(&self, id: ItemId) -> Result<&Item, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownItem(id.to_string()))
    }

    /// Look up the handle for an item name.
    pub fn id_of(&self, name: &str) -> Option<ItemId> {
        self.by_name.get(name).copied()
    }

    /// Look up an item by name.
    pub fn by_name(&self, name: &str) -> Option<&Item> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// Iterate over all items in handle order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.by_name
            .values()
            .filter_map(|&id| self.get(id).map(|item| (id, item)))
    }

    /// Return the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The drop table of an area.
    pub fn area(&self, name: &str) -> Option<&AreaDrops> {
        self.areas.get(name)
    }

    /// Iterate over all areas by name.
    pub fn areas(&self) -> impl Iterator<Item = (&String, &AreaDrops)> {
        self.areas.iter()
    }

    /// Whether `item` can be found in `area`.
    pub fn area_offers(&self, area: &str, item: &str) -> bool {
        self.area(area).is_some_and(|drops| drops.contains_key(item))
    }

    /// Unix seconds at which the underlying snapshot was fetched.
    pub const fn fetched_at(&self) -> i64 {
        self.fetched_at
    }
}

/// Turn one upstream record into an arena item.
fn resolve_record(
    record: &ItemRecord,
    by_name: &BTreeMap<String, ItemId>,
) -> Result<Item, CatalogError> {
    let lookup = |material: &str| {
        by_name
            .get(material)
            .copied()
            .ok_or_else(|| CatalogError::UnknownMaterial {
                item: record.name.clone(),
                material: material.to_owned(),
            })
    };

    let recipe = match (record.material1.as_deref(), record.material2.as_deref()) {
        (Some(m1), Some(m2)) => Some(Recipe {
            material1: lookup(m1)?,
            material2: lookup(m2)?,
        }),
        (None, None) => None,
        _ => {
            return Err(CatalogError::IncompleteRecipe {
                item: record.name.clone(),
            });
        }
    };

    Ok(Item {
        name: record.name.clone(),
        category: record.category,
        heal: record.heal,
        sp_restore: record.sp_restore,
        recipe,
        initial_count: record.initial_count,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Open,
    Closed,
}

/// Depth-first walk over the recipe graph, rejecting any back edge.
///
/// Iterative so a malformed catalog cannot exhaust the stack.
fn validate_acyclic(items: &[Item]) -> Result<(), CatalogError> {
    let mut state = vec![Visit::New; items.len()];

    for root in 0..items.len() {
        if state.get(root) != Some(&Visit::New) {
            continue;
        }

        // (index, children already pushed)
        let mut stack = vec![(root, false)];
        while let Some((index, expanded)) = stack.pop() {
            let Some(slot) = state.get_mut(index) else {
                continue;
            };
            if expanded {
                *slot = Visit::Closed;
                continue;
            }
            match *slot {
                Visit::Closed => continue,
                Visit::Open => {
                    let name = items.get(index).map(|i| i.name.clone()).unwrap_or_default();
                    return Err(CatalogError::Cycle { item: name });
                }
                Visit::New => *slot = Visit::Open,
            }

            stack.push((index, true));
            if let Some(recipe) = items.get(index).and_then(|i| i.recipe) {
                for child in [recipe.material2, recipe.material1] {
                    match state.get(child.index()) {
                        Some(Visit::Open) => {
                            let name = items
                                .get(child.index())
                                .map(|i| i.name.clone())
                                .unwrap_or_default();
                            return Err(CatalogError::Cycle { item: name });
                        }
                        Some(Visit::New) => stack.push((child.index(), false)),
                        _ => {}
                    }
                }
            }
        }
    }

    Ok(())
}
