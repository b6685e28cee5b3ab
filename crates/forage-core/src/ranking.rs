//! Ranking policies over a candidate pool.
//!
//! Every policy takes the pool by shared reference and works on its own
//! copy, so the same pool can be ranked any number of times. Extraction is
//! greedy: the best remaining candidate is removed on each step, with ties
//! going to whichever candidate appears first in the pool.
//!
//! `balanced` fuses the `single` and `total` rankings: both lists are taken
//! at twice the requested length, each is converted to dense rank scores,
//! and candidates present in both are ordered by the sum of their scores.
//! Base ingredients never appear in a balanced ranking.

use std::collections::BTreeMap;
use std::str::FromStr;

use forage_catalog::ItemId;
use tracing::debug;

/// A feasible item with its stat value and yield for one stat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Catalog handle.
    pub id: ItemId,
    /// Item name.
    pub name: String,
    /// Raw stat value per unit.
    pub stat_value: u32,
    /// Units per craft.
    pub craft_yield: u32,
    /// `stat_value * craft_yield`.
    pub total: u32,
    /// Whether the item is a base ingredient.
    pub is_base: bool,
}

/// How to order a candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Highest raw stat value first.
    Single,
    /// Highest stat value times yield first.
    Total,
    /// Lowest combined single/total rank first, composites only.
    #[default]
    Balanced,
}

impl Policy {
    /// Lowercase policy name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Total => "total",
            Self::Balanced => "balanced",
        }
    }
}

impl core::fmt::Display for Policy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The policy name did not match any [`Policy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown list type. Choose from: Total, Single, Balanced")]
pub struct UnknownPolicy;

impl FromStr for Policy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "total" => Ok(Self::Total),
            "balanced" => Ok(Self::Balanced),
            _ => Err(UnknownPolicy),
        }
    }
}

/// Rank `pool` under `policy`, returning at most `n` candidates in
/// selection order.
pub fn rank(policy: Policy, pool: &[Candidate], n: usize) -> Vec<Candidate> {
    let ranked = match policy {
        Policy::Single => rank_single(pool, n),
        Policy::Total => rank_total(pool, n),
        Policy::Balanced => rank_balanced(pool, n),
    };
    debug!(
        policy = %policy,
        pool = pool.len(),
        selected = ranked.len(),
        "pool ranked"
    );
    ranked
}

/// Top `n` by raw stat value.
pub fn rank_single(pool: &[Candidate], n: usize) -> Vec<Candidate> {
    extract_max(pool.to_vec(), n, |c| c.stat_value)
}

/// Top `n` by stat value times yield.
pub fn rank_total(pool: &[Candidate], n: usize) -> Vec<Candidate> {
    extract_max(pool.to_vec(), n, |c| c.total)
}

/// Top `n` composites by combined single and total rank.
pub fn rank_balanced(pool: &[Candidate], n: usize) -> Vec<Candidate> {
    let depth = n.saturating_mul(2);
    let by_single = rank_single(pool, depth);
    let by_total = rank_total(pool, depth);

    let single_scores = dense_scores(&by_single, |c| c.stat_value);
    let total_scores: BTreeMap<&str, u32> = dense_scores(&by_total, |c| c.total)
        .into_iter()
        .map(|(c, score)| (c.name.as_str(), score))
        .collect();

    let mut fused: Vec<(Candidate, u32)> = single_scores
        .into_iter()
        .filter(|(c, _)| !c.is_base)
        .filter_map(|(c, single)| {
            total_scores
                .get(c.name.as_str())
                .map(|&total| (c.clone(), single.saturating_add(total)))
        })
        .collect();

    let mut selected = Vec::with_capacity(n.min(fused.len()));
    while selected.len() < n {
        let Some(best) = position_of_min(&fused) else {
            break;
        };
        selected.push(fused.remove(best).0);
    }
    selected
}

/// Dense rank scores for an already ordered list: the first entry scores 0
/// and the score grows by one each time the key strictly drops.
fn dense_scores<F>(ordered: &[Candidate], key: F) -> Vec<(&Candidate, u32)>
where
    F: Fn(&Candidate) -> u32,
{
    let mut scores = Vec::with_capacity(ordered.len());
    let mut score = 0_u32;
    let mut previous: Option<u32> = None;
    for candidate in ordered {
        let value = key(candidate);
        if previous.is_some_and(|prev| value < prev) {
            score = score.saturating_add(1);
        }
        previous = Some(value);
        scores.push((candidate, score));
    }
    scores
}

fn extract_max<F>(mut working: Vec<Candidate>, n: usize, key: F) -> Vec<Candidate>
where
    F: Fn(&Candidate) -> u32,
{
    let mut selected = Vec::with_capacity(n.min(working.len()));
    while selected.len() < n {
        let Some(best) = position_of_max(&working, &key) else {
            break;
        };
        selected.push(working.remove(best));
    }
    selected
}

/// First position holding the largest key.
fn position_of_max<F>(items: &[Candidate], key: F) -> Option<usize>
where
    F: Fn(&Candidate) -> u32,
{
    let mut best: Option<(usize, u32)> = None;
    for (pos, item) in items.iter().enumerate() {
        let value = key(item);
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((pos, value));
        }
    }
    best.map(|(pos, _)| pos)
}

/// First position holding the smallest combined score.
fn position_of_min(items: &[(Candidate, u32)]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (pos, (_, score)) in items.iter().enumerate() {
        if best.is_none_or(|(_, low)| *score < low) {
            best = Some((pos, *score));
        }
    }
    best.map(|(pos, _)| pos)
}
