//! Engine tuning knobs.
//!
//! [`EngineConfig`] mirrors the `engine:` section of `forage-config.yaml`.
//! Every field has a default matching the behaviour players are used to, so
//! an empty section (or no file at all) yields a working engine.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::CoreError;

/// Configuration for recipe resolution and ranking.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// How many items each ranking policy returns.
    #[serde(default = "default_result_count")]
    pub result_count: usize,

    /// Materials whose yield is always treated as [`Self::abundant_yield`].
    #[serde(default = "default_abundant_ingredients")]
    pub abundant_ingredients: BTreeSet<String>,

    /// Yield forced for abundant materials.
    #[serde(default = "default_abundant_yield")]
    pub abundant_yield: u32,

    /// Ingredients handed to the player at the start of a match.
    #[serde(default = "default_start_items")]
    pub start_items: BTreeSet<String>,

    /// Ingredients treated as reachable regardless of route.
    #[serde(default = "default_always_available")]
    pub always_available: BTreeSet<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            result_count: default_result_count(),
            abundant_ingredients: default_abundant_ingredients(),
            abundant_yield: default_abundant_yield(),
            start_items: default_start_items(),
            always_available: default_always_available(),
        }
    }
}

impl EngineConfig {
    /// Reject configurations the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if `result_count` or
    /// `abundant_yield` is zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.result_count == 0 {
            return Err(CoreError::InvalidConfig(
                "engine.result_count must be at least 1".to_owned(),
            ));
        }
        if self.abundant_yield == 0 {
            return Err(CoreError::InvalidConfig(
                "engine.abundant_yield must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_result_count() -> usize {
    5
}

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

fn default_abundant_ingredients() -> BTreeSet<String> {
    names(&["Branch", "Bread"])
}

const fn default_abundant_yield() -> u32 {
    2
}

fn default_start_items() -> BTreeSet<String> {
    names(&["Bread", "Water"])
}

fn default_always_available() -> BTreeSet<String> {
    names(&["Stone", "Branch", "Bread", "Water"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_rules() {
        let config = EngineConfig::default();
        assert_eq!(config.result_count, 5);
        assert_eq!(config.abundant_yield, 2);
        assert!(config.abundant_ingredients.contains("Branch"));
        assert!(config.abundant_ingredients.contains("Bread"));
        assert!(config.start_items.contains("Water"));
        assert_eq!(config.always_available.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_section_fills_defaults() {
        let parsed: Result<EngineConfig, _> = serde_json::from_str(r#"{"result_count": 3}"#);
        assert!(parsed.is_ok());
        let Some(config) = parsed.ok() else { return };
        assert_eq!(config.result_count, 3);
        assert_eq!(config.start_items, default_start_items());
    }

    #[test]
    fn zero_result_count_is_invalid() {
        let config = EngineConfig {
            result_count: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig(_))
        ));
    }
}
