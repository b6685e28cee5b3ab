//! Record types mirroring the upstream reference data and the on-disk cache.
//!
//! Field names follow the upstream JSON exactly (`Name`, `ItemType`,
//! `Material1`, ...). Upstream writes an empty string where a value is
//! absent, so optional columns go through the `blank` helpers instead of
//! plain `Option` handling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{Category, Stat};

/// Item name -> drop weight for a single area.
pub type AreaDrops = BTreeMap<String, u32>;

// ---------------------------------------------------------------------------
// Item records
// ---------------------------------------------------------------------------

/// One row of the upstream item catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Unique item name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Category tag.
    #[serde(rename = "ItemType")]
    pub category: Category,
    /// Health restored, absent for items that do not heal.
    #[serde(
        rename = "Heal",
        default,
        deserialize_with = "blank::de_count",
        serialize_with = "blank::ser_count"
    )]
    pub heal: Option<u32>,
    /// Stamina restored, absent for items that do not restore stamina.
    #[serde(
        rename = "SpRestore",
        default,
        deserialize_with = "blank::de_count",
        serialize_with = "blank::ser_count"
    )]
    pub sp_restore: Option<u32>,
    /// First crafting material.
    #[serde(
        rename = "Material1",
        default,
        deserialize_with = "blank::de_name",
        serialize_with = "blank::ser_name"
    )]
    pub material1: Option<String>,
    /// Second crafting material.
    #[serde(
        rename = "Material2",
        default,
        deserialize_with = "blank::de_name",
        serialize_with = "blank::ser_name"
    )]
    pub material2: Option<String>,
    /// Units produced per successful craft.
    #[serde(rename = "InitialCount", default = "default_initial_count")]
    pub initial_count: u32,
    /// Upstream columns the engine does not interpret, kept for the cache.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

const fn default_initial_count() -> u32 {
    1
}

impl ItemRecord {
    /// Build a base ingredient record with no stats.
    pub fn base(name: &str, category: Category, initial_count: u32) -> Self {
        Self {
            name: name.to_owned(),
            category,
            heal: None,
            sp_restore: None,
            material1: None,
            material2: None,
            initial_count,
            extra: BTreeMap::new(),
        }
    }

    /// Build a composite record crafted from two materials.
    pub fn composite(
        name: &str,
        category: Category,
        material1: &str,
        material2: &str,
        initial_count: u32,
    ) -> Self {
        Self {
            material1: Some(material1.to_owned()),
            material2: Some(material2.to_owned()),
            ..Self::base(name, category, initial_count)
        }
    }

    /// Set a stat value, builder style.
    #[must_use]
    pub fn with_stat(mut self, stat: Stat, value: u32) -> Self {
        match stat {
            Stat::Heal => self.heal = Some(value),
            Stat::SpRestore => self.sp_restore = Some(value),
        }
        self
    }

    /// The value of `stat`, or `None` if the item does not contribute it.
    pub const fn stat(&self, stat: Stat) -> Option<u32> {
        match stat {
            Stat::Heal => self.heal,
            Stat::SpRestore => self.sp_restore,
        }
    }
}

// ---------------------------------------------------------------------------
// Area records
// ---------------------------------------------------------------------------

/// One row of an upstream per-area drop list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaDropRecord {
    /// Name of the item that can be found.
    #[serde(rename = "ItemName")]
    pub item_name: String,
    /// How many of the item spawn in the area.
    #[serde(rename = "DropCount")]
    pub drop_count: u32,
}

// ---------------------------------------------------------------------------
// Cache document
// ---------------------------------------------------------------------------

/// The merged reference data, exactly as stored in the local cache file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Every upstream item keyed by name.
    pub items: BTreeMap<String, ItemRecord>,
    /// Obtainable items per area, already augmented.
    pub areas: BTreeMap<String, AreaDrops>,
    /// Unix seconds at which the snapshot was fetched.
    #[serde(rename = "__timestamp", default)]
    pub timestamp: i64,
}

impl CatalogSnapshot {
    /// Insert an item record keyed by its name.
    pub fn insert_item(&mut self, record: ItemRecord) {
        self.items.insert(record.name.clone(), record);
    }
}

// ---------------------------------------------------------------------------
// Blank-string helpers
// ---------------------------------------------------------------------------

mod blank {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn de_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s.trim().parse().map(Some).map_err(D::Error::custom),
            Value::Number(n) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("stat value out of range: {n}"))),
            other => Err(D::Error::custom(format!("unexpected stat value: {other}"))),
        }
    }

    #[allow(clippy::ref_option)]
    pub fn ser_count<S: Serializer>(value: &Option<u32>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_u32(*v),
            None => s.serialize_str(""),
        }
    }

    pub fn de_name<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|s| !s.trim().is_empty()))
    }

    #[allow(clippy::ref_option)]
    pub fn ser_name<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPSTREAM_ROW: &str = r#"{
        "Name": "Fried Rice",
        "ItemType": "Food",
        "Heal": 310,
        "SpRestore": "",
        "Material1": "Rice",
        "Material2": "Oil",
        "InitialCount": 2,
        "ItemGrade": "Uncommon"
    }"#;

    #[test]
    fn upstream_row_parses_blank_columns_as_absent() {
        let parsed: Result<ItemRecord, _> = serde_json::from_str(UPSTREAM_ROW);
        assert!(parsed.is_ok());
        let Some(item) = parsed.ok() else { return };
        assert_eq!(item.name, "Fried Rice");
        assert_eq!(item.category, Category::Food);
        assert_eq!(item.stat(Stat::Heal), Some(310));
        assert_eq!(item.stat(Stat::SpRestore), None);
        assert_eq!(item.material1.as_deref(), Some("Rice"));
        assert_eq!(item.initial_count, 2);
        assert!(item.extra.contains_key("ItemGrade"));
    }

    #[test]
    fn base_ingredient_has_no_materials() {
        let raw = r#"{"Name":"Water","ItemType":"Beverage","Heal":"","SpRestore":"60",
                      "Material1":"","Material2":"","InitialCount":1}"#;
        let parsed: Result<ItemRecord, _> = serde_json::from_str(raw);
        assert!(parsed.is_ok());
        let Some(item) = parsed.ok() else { return };
        assert_eq!(item.material1, None);
        assert_eq!(item.material2, None);
        assert_eq!(item.sp_restore, Some(60));
    }

    #[test]
    fn absent_values_are_written_back_as_blank_strings() {
        let item = ItemRecord::base("Stone", Category::Material, 1);
        let json = serde_json::to_value(&item);
        assert!(json.is_ok());
        let Some(json) = json.ok() else { return };
        assert_eq!(json.get("Heal"), Some(&serde_json::Value::String(String::new())));
        assert_eq!(json.get("Material1"), Some(&serde_json::Value::String(String::new())));
    }

    #[test]
    fn negative_stat_is_rejected() {
        let raw = r#"{"Name":"Bad","ItemType":"Food","Heal":-4,"InitialCount":1}"#;
        let parsed: Result<ItemRecord, _> = serde_json::from_str(raw);
        assert!(parsed.is_err());
    }

    #[test]
    fn snapshot_reads_reserved_timestamp_field() {
        let raw = r#"{"items":{},"areas":{"Dock":{"Cod":4}},"__timestamp":1700000000}"#;
        let parsed: Result<CatalogSnapshot, _> = serde_json::from_str(raw);
        assert!(parsed.is_ok());
        let Some(snapshot) = parsed.ok() else { return };
        assert_eq!(snapshot.timestamp, 1_700_000_000);
        assert_eq!(
            snapshot.areas.get("Dock").and_then(|d| d.get("Cod")),
            Some(&4)
        );
    }
}
