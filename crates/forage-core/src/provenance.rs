//! Where along the route an ingredient can be picked up.

use crate::context::RequestContext;

/// English ordinal for a 1-based position: `1st`, `2nd`, `11th`, `21st`.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Provenance label for `ingredient` on the request's route.
///
/// `All` when every route area offers it. Otherwise `Start` for items the
/// player spawns with, followed by the ordinal of each route stop that
/// offers it, comma separated. Empty when none apply.
pub fn provenance(ctx: &RequestContext<'_>, ingredient: &str) -> String {
    let areas = ctx.route.areas();
    let offered: Vec<bool> = areas
        .iter()
        .map(|area| ctx.catalog.area_offers(area, ingredient))
        .collect();

    if !offered.is_empty() && offered.iter().all(|&hit| hit) {
        return "All".to_owned();
    }

    let mut tokens = Vec::new();
    if ctx.config.start_items.contains(ingredient) {
        tokens.push("Start".to_owned());
    }
    tokens.extend(
        offered
            .iter()
            .enumerate()
            .filter(|&(_, &hit)| hit)
            .map(|(pos, _)| ordinal(pos.saturating_add(1))),
    );
    tokens.join(", ")
}
