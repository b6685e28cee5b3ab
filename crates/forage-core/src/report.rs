//! Chat-ready rendering of ranked candidates.

use forage_types::Stat;

use crate::context::RequestContext;
use crate::error::CoreError;
use crate::provenance::provenance;
use crate::ranking::Candidate;
use crate::yields::leaf_ingredients;

/// Section title for a stat.
pub const fn section_header(stat: Stat) -> &'static str {
    match stat {
        Stat::Heal => "Best Foods To Create:",
        Stat::SpRestore => "Best Drinks To Create:",
    }
}

/// Render one section: a bold header line followed by one block per
/// candidate, each ending in a blank line.
///
/// # Errors
///
/// Returns [`CoreError::Catalog`] if a candidate's ingredients cannot be
/// expanded.
pub fn render_section(
    ctx: &RequestContext<'_>,
    stat: Stat,
    selected: &[Candidate],
) -> Result<String, CoreError> {
    let mut out = format!("**{}**\n", section_header(stat));
    for candidate in selected {
        out.push_str(&render_block(ctx, stat, candidate)?);
    }
    Ok(out)
}

fn render_block(
    ctx: &RequestContext<'_>,
    stat: Stat,
    candidate: &Candidate,
) -> Result<String, CoreError> {
    let leaves = leaf_ingredients(ctx, candidate.id)?
        .into_iter()
        .map(|id| -> Result<String, CoreError> {
            let name = &ctx.catalog.item(id)?.name;
            Ok(format!("{name} ({})", provenance(ctx, name)))
        })
        .collect::<Result<Vec<_>, _>>()?
        .join(", ");

    Ok(format!(
        "*{name}*\n{leaves}\n{stat}: {value}, Quantity: {quantity}, Total: {total}\n\n",
        name = candidate.name,
        value = candidate.stat_value,
        quantity = candidate.craft_yield,
        total = candidate.total,
    ))
}

#[cfg(test)]
mod tests {
    use forage_catalog::{Catalog, Route};
    use forage_types::{CatalogSnapshot, Category, ItemRecord};

    use super::*;
    use crate::availability::feasible_candidates;
    use crate::config::EngineConfig;

    fn catalog() -> Catalog {
        let mut snapshot = CatalogSnapshot::default();
        snapshot.insert_item(ItemRecord::base("Cod", Category::Food, 1).with_stat(Stat::Heal, 40));
        snapshot.insert_item(ItemRecord::base("Stone", Category::Material, 1));
        snapshot.insert_item(
            ItemRecord::composite("Grilled Cod", Category::Food, "Cod", "Stone", 1)
                .with_stat(Stat::Heal, 180),
        );
        for area in ["Dock", "Beach"] {
            snapshot
                .areas
                .entry(area.to_owned())
                .or_default()
                .insert("Stone".to_owned(), 99);
        }
        if let Some(dock) = snapshot.areas.get_mut("Dock") {
            dock.insert("Cod".to_owned(), 4);
        }
        let catalog = Catalog::from_snapshot(&snapshot);
        assert!(catalog.is_ok(), "fixture catalog must build: {catalog:?}");
        catalog.unwrap_or_default()
    }

    #[test]
    fn headers_name_the_stat() {
        assert_eq!(section_header(Stat::Heal), "Best Foods To Create:");
        assert_eq!(section_header(Stat::SpRestore), "Best Drinks To Create:");
    }

    #[test]
    fn block_lists_leaves_with_provenance() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let ctx = RequestContext::new(&catalog, &config, Route::new(["Beach", "Dock"]));
        let pool = feasible_candidates(&ctx, Stat::Heal).unwrap_or_default();
        let grilled: Vec<Candidate> = pool
            .into_iter()
            .filter(|c| c.name == "Grilled Cod")
            .collect();

        let rendered = render_section(&ctx, Stat::Heal, &grilled);
        assert_eq!(
            rendered.ok().as_deref(),
            Some(
                "**Best Foods To Create:**\n\
                 *Grilled Cod*\n\
                 Cod (2nd), Stone (All)\n\
                 Heal: 180, Quantity: 1, Total: 180\n\n"
            )
        );
    }

    #[test]
    fn empty_selection_renders_header_only() {
        let catalog = Catalog::default();
        let config = EngineConfig::default();
        let ctx = RequestContext::new(&catalog, &config, Route::default());
        let rendered = render_section(&ctx, Stat::SpRestore, &[]);
        assert_eq!(rendered.ok().as_deref(), Some("**Best Drinks To Create:**\n"));
    }
}
