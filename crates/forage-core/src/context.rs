//! Request-scoped, immutable inputs to recipe resolution.
//!
//! A [`RequestContext`] is assembled once per recommendation request and
//! threaded by reference through availability, yield, provenance and report
//! code. Nothing in it changes after construction, so the same context can be
//! read by every ranking policy without one policy seeing another's work.

use std::collections::BTreeSet;

use forage_catalog::{Catalog, Route};

use crate::config::EngineConfig;

/// Ingredient names obtainable somewhere along a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReachableSet {
    names: BTreeSet<String>,
}

impl ReachableSet {
    /// Collect everything any route area offers, plus the configured
    /// always-available ingredients.
    pub fn for_route(catalog: &Catalog, route: &Route, config: &EngineConfig) -> Self {
        let mut names: BTreeSet<String> = route
            .areas()
            .iter()
            .filter_map(|area| catalog.area(area))
            .flat_map(|drops| drops.keys().cloned())
            .collect();
        names.extend(config.always_available.iter().cloned());
        Self { names }
    }

    /// Whether `name` can be gathered.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of reachable names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing is reachable.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Everything one request needs, borrowed from long-lived state where
/// possible.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    /// The catalog snapshot this request runs against.
    pub catalog: &'a Catalog,
    /// Engine tuning.
    pub config: &'a EngineConfig,
    /// The resolved route.
    pub route: Route,
    /// Ingredients gatherable on the route.
    pub reachable: ReachableSet,
}

impl<'a> RequestContext<'a> {
    /// Build the context for a route.
    pub fn new(catalog: &'a Catalog, config: &'a EngineConfig, route: Route) -> Self {
        let reachable = ReachableSet::for_route(catalog, &route, config);
        Self {
            catalog,
            config,
            route,
            reachable,
        }
    }
}
