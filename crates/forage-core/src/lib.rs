//! Recipe resolution, ranking, and report formatting for the Forage route
//! planner.
//!
//! Given a [`Catalog`](forage_catalog::Catalog) and a route, this crate
//! works out which foods and drinks can be crafted from what the route
//! offers, how many units each craft yields, and which ones are worth
//! making under a chosen ranking policy. Everything here is synchronous and
//! pure over a loaded catalog.
//!
//! # Modules
//!
//! - [`availability`] -- Memoized feasibility and candidate pool assembly.
//! - [`commands`] -- Chat command parsing and dispatch.
//! - [`config`] -- [`EngineConfig`] tuning knobs with game defaults.
//! - [`context`] -- Per-request [`RequestContext`] and reachable set.
//! - [`error`] -- [`CoreError`].
//! - [`pipeline`] -- [`recommend`], one request end to end.
//! - [`provenance`] -- Ordinal route positions for ingredients.
//! - [`ranking`] -- `single`, `total` and `balanced` ranking policies.
//! - [`report`] -- Chat-ready section rendering.
//! - [`yields`] -- Craft yield and leaf ingredient expansion.

pub mod availability;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod provenance;
pub mod ranking;
pub mod report;
pub mod yields;

pub use commands::{Command, HELP_TEXT, execute};
pub use config::EngineConfig;
pub use context::{ReachableSet, RequestContext};
pub use error::CoreError;
pub use pipeline::{Recommendation, recommend};
pub use ranking::{Candidate, Policy, UnknownPolicy};
