//! Zone index table and route resolution.
//!
//! Players describe their route as a list of zone numbers. The numbering is
//! user facing and must stay stable, so index `12` stays unassigned: it once
//! belonged to the Research Center, which never has any drops.

use crate::catalog::Catalog;

/// Fixed mapping from user-facing zone index to area name.
pub const AREA_INDEX: &[(&str, &str)] = &[
    ("0", "Alley"),
    ("1", "Archery Range"),
    ("2", "Avenue"),
    ("3", "Beach"),
    ("4", "Cemetery"),
    ("5", "Chapel"),
    ("6", "Dock"),
    ("7", "Factory"),
    ("8", "Forest"),
    ("9", "Hospital"),
    ("10", "Hotel"),
    ("11", "Pond"),
    ("13", "School"),
    ("14", "Temple"),
    ("15", "Uptown"),
];

/// Look up the area name for a zone index.
pub fn area_for_index(index: &str) -> Option<&'static str> {
    AREA_INDEX
        .iter()
        .find(|(idx, _)| *idx == index)
        .map(|&(_, area)| area)
}

/// An ordered list of areas the player intends to travel through.
///
/// Order only affects how provenance is displayed, never feasibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    areas: Vec<String>,
}

impl Route {
    /// Build a route from area names.
    pub fn new<I, S>(areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            areas: areas.into_iter().map(Into::into).collect(),
        }
    }

    /// The areas in travel order.
    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    /// Number of stops on the route.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Whether the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// A non-fatal problem found while resolving a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDiagnostic {
    /// The token is not in [`AREA_INDEX`].
    UnrecognizedArea(String),
}

impl core::fmt::Display for RouteDiagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnrecognizedArea(token) => write!(f, "Unrecognized area {token}"),
        }
    }
}

/// Resolve whitespace-separated zone indices into a [`Route`].
///
/// Unknown indices are reported and skipped; the rest of the route is still
/// resolved.
pub fn resolve_route<'a, I>(indices: I) -> (Route, Vec<RouteDiagnostic>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut areas = Vec::new();
    let mut diagnostics = Vec::new();

    for token in indices {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match area_for_index(token) {
            Some(area) => areas.push(area.to_owned()),
            None => diagnostics.push(RouteDiagnostic::UnrecognizedArea(token.to_owned())),
        }
    }

    (Route { areas }, diagnostics)
}

/// Render the zone index listing for every area that has drops.
///
/// One line per area, `"{index:<3}- {area}"`, in index order.
pub fn list_areas(catalog: &Catalog) -> String {
    AREA_INDEX
        .iter()
        .filter(|(_, area)| catalog.area(area).is_some_and(|drops| !drops.is_empty()))
        .map(|(idx, area)| format!("{idx:<3}- {area}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use forage_types::{CatalogSnapshot, Category, ItemRecord};

    use super::*;

    #[test]
    fn index_twelve_is_unassigned() {
        assert_eq!(area_for_index("11"), Some("Pond"));
        assert_eq!(area_for_index("12"), None);
        assert_eq!(area_for_index("13"), Some("School"));
        assert_eq!(AREA_INDEX.len(), 15);
    }

    #[test]
    fn resolves_route_in_order() {
        let (route, diagnostics) = resolve_route("2 14 15".split_whitespace());
        assert!(diagnostics.is_empty());
        assert_eq!(route.areas(), ["Avenue", "Temple", "Uptown"]);
    }

    #[test]
    fn unknown_index_is_reported_and_skipped() {
        let (route, diagnostics) = resolve_route(["2", "99", "15"]);
        assert_eq!(route.areas(), ["Avenue", "Uptown"]);
        assert_eq!(
            diagnostics,
            vec![RouteDiagnostic::UnrecognizedArea("99".to_owned())]
        );
        assert_eq!(
            diagnostics.first().map(ToString::to_string).as_deref(),
            Some("Unrecognized area 99")
        );
    }

    #[test]
    fn repeated_zones_are_kept() {
        let (route, _) = resolve_route(["8", "8"]);
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn empty_input_gives_empty_route() {
        let (route, diagnostics) = resolve_route("   ".split_whitespace());
        assert!(route.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn listing_skips_areas_without_drops() {
        let mut snapshot = CatalogSnapshot::default();
        snapshot.insert_item(ItemRecord::base("Cod", Category::Food, 1));
        snapshot
            .areas
            .entry("Dock".to_owned())
            .or_default()
            .insert("Cod".to_owned(), 4);
        snapshot.areas.entry("Alley".to_owned()).or_default();
        snapshot
            .areas
            .entry("Hotel".to_owned())
            .or_default()
            .insert("Cod".to_owned(), 1);

        let catalog = Catalog::from_snapshot(&snapshot);
        assert!(catalog.is_ok());
        let Some(catalog) = catalog.ok() else { return };
        assert_eq!(list_areas(&catalog), "6  - Dock\n10 - Hotel\n");
    }
}
