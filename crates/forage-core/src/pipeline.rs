//! One recommendation request, start to finish.
//!
//! Policy check, route resolution, reachable set, candidate pools, ranking
//! and formatting, in that order. Validation problems are collected as
//! user-facing messages and the request carries on where it can; anything
//! that breaks resolution aborts with a [`CoreError`].

use forage_catalog::{Catalog, resolve_route};
use forage_types::Stat;
use tracing::{debug, info};

use crate::availability::feasible_candidates;
use crate::config::EngineConfig;
use crate::context::RequestContext;
use crate::error::CoreError;
use crate::ranking::{Policy, rank};
use crate::report::render_section;

/// Outcome of a recommendation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recommendation {
    /// Validation messages, without the `ERROR - ` prefix.
    pub errors: Vec<String>,
    /// Rendered report sections, foods first.
    pub sections: Vec<String>,
    /// Whether the caller should follow up with the help text.
    pub show_help: bool,
}

/// Rank what can be crafted along the route given by zone `indices`.
///
/// An unknown `policy` is reported and nothing else happens. Unknown zone
/// indices are reported and skipped. If no zone resolves, the result asks
/// for help instead of a report.
///
/// # Errors
///
/// Returns [`CoreError`] if the config is invalid or resolution hits a
/// broken catalog entry or overflows.
pub fn recommend<'i, I>(
    catalog: &Catalog,
    config: &EngineConfig,
    policy: &str,
    indices: I,
) -> Result<Recommendation, CoreError>
where
    I: IntoIterator<Item = &'i str>,
{
    config.validate()?;
    let mut out = Recommendation::default();

    let policy: Policy = match policy.parse() {
        Ok(policy) => policy,
        Err(err) => {
            out.errors.push(err.to_string());
            return Ok(out);
        }
    };

    let (route, diagnostics) = resolve_route(indices);
    out.errors
        .extend(diagnostics.iter().map(ToString::to_string));
    if route.is_empty() {
        out.show_help = true;
        return Ok(out);
    }

    let ctx = RequestContext::new(catalog, config, route);
    debug!(
        route = ?ctx.route.areas(),
        reachable = ctx.reachable.len(),
        "route resolved"
    );

    for stat in Stat::ALL {
        let pool = feasible_candidates(&ctx, stat)?;
        let selected = rank(policy, &pool, config.result_count);
        out.sections.push(render_section(&ctx, stat, &selected)?);
    }

    info!(
        policy = %policy,
        stops = ctx.route.len(),
        diagnostics = out.errors.len(),
        "recommendation built"
    );
    Ok(out)
}
