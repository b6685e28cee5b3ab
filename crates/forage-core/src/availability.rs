//! Which consumables can be crafted from what a route offers.
//!
//! A base ingredient is feasible when it is reachable. A composite is
//! feasible when both of its materials are, recursively. Results only depend
//! on the request's reachable set, so they are memoized for the lifetime of
//! one [`Availability`] value.
//!
//! Recursion always terminates: the catalog rejects cyclic recipes when it is
//! built.

use forage_catalog::ItemId;
use forage_types::Stat;
use tracing::debug;

use crate::context::RequestContext;
use crate::error::CoreError;
use crate::ranking::Candidate;
use crate::yields;

/// Memoizing feasibility resolver for one request.
#[derive(Debug)]
pub struct Availability<'r, 'a> {
    ctx: &'r RequestContext<'a>,
    memo: Vec<Option<bool>>,
}

impl<'r, 'a> Availability<'r, 'a> {
    /// Create a resolver over the request's catalog and reachable set.
    pub fn new(ctx: &'r RequestContext<'a>) -> Self {
        Self {
            ctx,
            memo: vec![None; ctx.catalog.len()],
        }
    }

    /// Whether `id` can be produced from reachable ingredients.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Catalog`] if `id` or one of its materials is not
    /// in the catalog.
    pub fn is_feasible(&mut self, id: ItemId) -> Result<bool, CoreError> {
        if let Some(Some(known)) = self.memo.get(id.index()) {
            return Ok(*known);
        }

        let item = self.ctx.catalog.item(id)?;
        let feasible = match item.recipe {
            None => self.ctx.reachable.contains(&item.name),
            Some(recipe) => {
                self.is_feasible(recipe.material1)? && self.is_feasible(recipe.material2)?
            }
        };

        if let Some(slot) = self.memo.get_mut(id.index()) {
            *slot = Some(feasible);
        }
        Ok(feasible)
    }
}

/// Build the candidate pool for `stat`.
///
/// Every feasible consumable that contributes `stat`, annotated with its
/// stat value, craft yield and total, in catalog order.
///
/// # Errors
///
/// Returns [`CoreError`] if a material lookup fails or yield arithmetic
/// overflows.
pub fn feasible_candidates(
    ctx: &RequestContext<'_>,
    stat: Stat,
) -> Result<Vec<Candidate>, CoreError> {
    let mut availability = Availability::new(ctx);
    let mut pool = Vec::new();

    for (id, item) in ctx.catalog.items() {
        if !item.category.is_consumable() {
            continue;
        }
        let Some(stat_value) = item.stat(stat) else {
            continue;
        };
        if !availability.is_feasible(id)? {
            continue;
        }

        let craft_yield = yields::craft_yield(ctx, id)?;
        let total = stat_value
            .checked_mul(craft_yield)
            .ok_or_else(|| CoreError::ArithmeticOverflow {
                item: item.name.clone(),
            })?;

        pool.push(Candidate {
            id,
            name: item.name.clone(),
            stat_value,
            craft_yield,
            total,
            is_base: item.is_base(),
        });
    }

    debug!(
        stat = %stat,
        candidates = pool.len(),
        reachable = ctx.reachable.len(),
        "candidate pool built"
    );
    Ok(pool)
}
