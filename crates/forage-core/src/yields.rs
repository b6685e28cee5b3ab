//! Craft yield and leaf-ingredient expansion.
//!
//! A base ingredient yields its `initial_count`. A composite yields the
//! smaller of its two materials' effective yields times its own
//! `initial_count`. A material listed in
//! [`EngineConfig::abundant_ingredients`](crate::config::EngineConfig) is
//! counted at the configured abundant yield, whatever its recipe says. Only
//! one material per recipe is overridden: `material1` if it is abundant,
//! otherwise `material2`.

use forage_catalog::ItemId;

use crate::context::RequestContext;
use crate::error::CoreError;

/// Number of units one successful craft of `id` produces.
///
/// # Errors
///
/// Returns [`CoreError::Catalog`] for unknown ids and
/// [`CoreError::ArithmeticOverflow`] if the yield does not fit in a `u32`.
pub fn craft_yield(ctx: &RequestContext<'_>, id: ItemId) -> Result<u32, CoreError> {
    let item = ctx.catalog.item(id)?;
    let Some(recipe) = item.recipe else {
        return Ok(item.initial_count);
    };

    let abundant = ctx.config.abundant_yield;
    let (first, second) = if is_abundant(ctx, recipe.material1)? {
        (abundant, craft_yield(ctx, recipe.material2)?)
    } else if is_abundant(ctx, recipe.material2)? {
        (craft_yield(ctx, recipe.material1)?, abundant)
    } else {
        (
            craft_yield(ctx, recipe.material1)?,
            craft_yield(ctx, recipe.material2)?,
        )
    };
    first
        .min(second)
        .checked_mul(item.initial_count)
        .ok_or_else(|| CoreError::ArithmeticOverflow {
            item: item.name.clone(),
        })
}

fn is_abundant(ctx: &RequestContext<'_>, material: ItemId) -> Result<bool, CoreError> {
    let item = ctx.catalog.item(material)?;
    Ok(ctx.config.abundant_ingredients.contains(&item.name))
}

/// Base ingredients consumed by `id`, depth first, `material1` before
/// `material2`. Duplicates are kept.
///
/// # Errors
///
/// Returns [`CoreError::Catalog`] if `id` or a material is unknown.
pub fn leaf_ingredients(ctx: &RequestContext<'_>, id: ItemId) -> Result<Vec<ItemId>, CoreError> {
    let mut leaves = Vec::new();
    let mut stack = vec![id];

    while let Some(next) = stack.pop() {
        match ctx.catalog.item(next)?.recipe {
            None => leaves.push(next),
            Some(recipe) => {
                stack.push(recipe.material2);
                stack.push(recipe.material1);
            }
        }
    }

    Ok(leaves)
}
