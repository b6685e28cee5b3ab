//! End-to-end tests for the recommendation pipeline over a small but
//! realistic catalog.
//!
//! The fixture mirrors the shape of the live reference data: raw area drops
//! plus the map-gathered ingredients merged in by `augment_areas`.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use forage_catalog::{Catalog, Route, augment_areas};
use forage_core::availability::feasible_candidates;
use forage_core::ranking::{rank_balanced, rank_single, rank_total};
use forage_core::yields::{craft_yield, leaf_ingredients};
use forage_core::{Command, EngineConfig, RequestContext, execute};
use forage_types::{CatalogSnapshot, Category, ItemRecord, Stat};

fn fixture() -> Catalog {
    let mut snapshot = CatalogSnapshot::default();
    let records = [
        ItemRecord::base("Meat", Category::Food, 1).with_stat(Stat::Heal, 60),
        ItemRecord::base("Branch", Category::Material, 1),
        ItemRecord::base("Stone", Category::Material, 1),
        ItemRecord::base("Bread", Category::Food, 1).with_stat(Stat::Heal, 40),
        ItemRecord::base("Water", Category::Beverage, 1).with_stat(Stat::SpRestore, 60),
        ItemRecord::base("Potato", Category::Food, 1).with_stat(Stat::Heal, 50),
        ItemRecord::base("Cod", Category::Food, 1).with_stat(Stat::Heal, 40),
        ItemRecord::base("Carp", Category::Food, 1).with_stat(Stat::Heal, 45),
        ItemRecord::base("Lemon", Category::Material, 1),
        ItemRecord::base("Honey", Category::Material, 1),
        ItemRecord::base("Milk", Category::Material, 1),
        ItemRecord::composite("Steak", Category::Food, "Meat", "Branch", 1)
            .with_stat(Stat::Heal, 200),
        ItemRecord::composite("Baked Potato", Category::Food, "Potato", "Stone", 1)
            .with_stat(Stat::Heal, 150),
        ItemRecord::composite("Fish Bread", Category::Food, "Cod", "Bread", 2)
            .with_stat(Stat::Heal, 250),
        ItemRecord::composite("Honey Bread", Category::Food, "Honey", "Bread", 1)
            .with_stat(Stat::Heal, 180)
            .with_stat(Stat::SpRestore, 30),
        ItemRecord::composite("Grilled Carp", Category::Food, "Carp", "Branch", 1)
            .with_stat(Stat::Heal, 400),
        ItemRecord::composite("Lemonade", Category::Beverage, "Lemon", "Water", 2)
            .with_stat(Stat::SpRestore, 150),
        ItemRecord::composite("Honey Water", Category::Beverage, "Honey", "Water", 1)
            .with_stat(Stat::SpRestore, 120),
        ItemRecord::composite("Milk Tea", Category::Beverage, "Milk", "Water", 1)
            .with_stat(Stat::SpRestore, 180),
        ItemRecord::composite("Carp Broth", Category::Beverage, "Carp", "Water", 1)
            .with_stat(Stat::SpRestore, 300),
        ItemRecord::composite("Feast", Category::Food, "Steak", "Fish Bread", 1)
            .with_stat(Stat::Heal, 700),
    ];
    for record in records {
        snapshot.insert_item(record);
    }

    for (area, item, weight) in [
        ("Avenue", "Lemon", 3),
        ("Temple", "Honey", 2),
        ("Uptown", "Milk", 5),
        ("Pond", "Carp", 9),
        ("Dock", "Milk", 1),
    ] {
        snapshot
            .areas
            .entry(area.to_owned())
            .or_default()
            .insert(item.to_owned(), weight);
    }
    augment_areas(&mut snapshot.areas);

    Catalog::from_snapshot(&snapshot).expect("fixture catalog is valid")
}

fn run(line: &str, catalog: &Catalog) -> Vec<String> {
    let command = Command::parse(line).expect("line is a command");
    execute(&command, catalog, &EngineConfig::default())
}

/// Block titles in a rendered section, e.g. `*Steak*` -> `Steak`.
fn titles(section: &str) -> Vec<&str> {
    section
        .lines()
        .filter(|line| line.starts_with('*') && !line.starts_with("**"))
        .map(|line| line.trim_matches('*'))
        .collect()
}

/// Every provenance token in a rendered section.
fn provenance_tokens(section: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in section.lines() {
        let mut rest = line;
        while let Some(open) = rest.find(" (") {
            let after = &rest[open + 2..];
            let close = after.find(')').expect("balanced parentheses");
            tokens.extend(after[..close].split(", ").map(str::to_owned));
            rest = &after[close + 1..];
        }
    }
    tokens
}

#[test]
fn balanced_route_produces_two_composite_sections() {
    let catalog = fixture();
    let replies = run("!er 2 14 15", &catalog);

    assert_eq!(replies.len(), 2);
    assert!(replies[0].starts_with("**Best Foods To Create:**\n"));
    assert!(replies[1].starts_with("**Best Drinks To Create:**\n"));

    for section in &replies {
        let names = titles(section);
        assert!(!names.is_empty(), "section has no items: {section}");
        assert!(names.len() <= 5);
        for name in names {
            let item = catalog.by_name(name).expect("title is a catalog item");
            assert!(!item.is_base(), "{name} is a base ingredient");
        }
        for token in provenance_tokens(section) {
            assert!(
                ["All", "Start", "1st", "2nd", "3rd"].contains(&token.as_str()),
                "unexpected provenance {token:?}"
            );
        }
    }
}

#[test]
fn off_route_ingredients_are_never_recommended() {
    let catalog = fixture();
    for policy in ["single", "total", "balanced"] {
        let replies = run(&format!("!er_by {policy} 2 14 15"), &catalog);
        for section in &replies {
            assert!(!section.contains("Carp"), "{policy}: {section}");
        }
    }
}

#[test]
fn bogus_policy_gives_exactly_one_diagnostic() {
    let catalog = fixture();
    let replies = run("!er_by bogus 2 14 15", &catalog);
    assert_eq!(
        replies,
        vec!["ERROR - Unknown list type. Choose from: Total, Single, Balanced"]
    );
}

#[test]
fn unknown_index_is_reported_and_the_rest_still_ranks() {
    let catalog = fixture();
    let replies = run("!er 2 99 14", &catalog);
    assert_eq!(replies.len(), 3);
    assert_eq!(replies[0], "ERROR - Unrecognized area 99");
    assert!(!titles(&replies[1]).is_empty());
}

#[test]
fn same_request_renders_byte_identical_output() {
    let catalog = fixture();
    let first = run("!er 2 14 15", &catalog);
    let second = run("!er 2 14 15", &catalog);
    assert_eq!(first, second);
}

#[test]
fn area_listing_only_shows_areas_with_drops() {
    let catalog = fixture();
    let replies = run("!er_list", &catalog);
    assert_eq!(
        replies,
        vec![
            "0  - Alley\n2  - Avenue\n3  - Beach\n4  - Cemetery\n5  - Chapel\n6  - Dock\n\
             8  - Forest\n10 - Hotel\n11 - Pond\n14 - Temple\n15 - Uptown\n"
        ]
    );
}

#[test]
fn map_gathered_ingredients_reach_every_area() {
    let catalog = fixture();
    for area in ["Alley", "Beach", "Cemetery", "Chapel", "Forest", "Hotel", "Pond"] {
        for item in ["Stone", "Branch", "Meat"] {
            assert!(catalog.area_offers(area, item), "{area} lacks {item}");
        }
    }
}

#[test]
fn feasible_items_only_use_reachable_leaves() {
    let catalog = fixture();
    let config = EngineConfig::default();
    let ctx = RequestContext::new(&catalog, &config, Route::new(["Avenue", "Temple", "Uptown"]));

    for stat in Stat::ALL {
        let pool = feasible_candidates(&ctx, stat).expect("pool builds");
        assert!(!pool.is_empty());
        for candidate in &pool {
            for leaf in leaf_ingredients(&ctx, candidate.id).expect("leaves expand") {
                let name = &catalog.get(leaf).expect("leaf exists").name;
                assert!(ctx.reachable.contains(name), "{name} not reachable");
            }

            let item = catalog.get(candidate.id).expect("candidate exists");
            let craft = craft_yield(&ctx, candidate.id).expect("yield resolves");
            assert!(craft >= 1);
            if item.is_base() {
                assert_eq!(craft, item.initial_count);
            }
        }
    }
}

#[test]
fn every_policy_respects_the_result_count() {
    let catalog = fixture();
    let config = EngineConfig::default();
    let ctx = RequestContext::new(&catalog, &config, Route::new(["Avenue", "Temple", "Uptown"]));
    let pool = feasible_candidates(&ctx, Stat::Heal).expect("pool builds");
    assert!(pool.len() > 5);

    for ranked in [rank_single(&pool, 5), rank_total(&pool, 5)] {
        assert_eq!(ranked.len(), 5);
        assert!(ranked.iter().all(|c| pool.contains(c)));
    }
    let balanced = rank_balanced(&pool, 5);
    assert!(balanced.len() <= 5);
    assert!(balanced.iter().all(|c| !c.is_base));
}

#[test]
fn feast_yield_follows_the_smaller_branch() {
    let catalog = fixture();
    let config = EngineConfig::default();
    let ctx = RequestContext::new(&catalog, &config, Route::new(["Uptown"]));
    let feast = catalog.id_of("Feast").expect("feast exists");
    // Steak: min(Meat 1, Branch 2) = 1. Fish Bread: min(Cod 1, Bread 2) * 2 = 2.
    assert_eq!(craft_yield(&ctx, feast).expect("yield resolves"), 1);
}
