//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::recipe::{CraftVariant, Recipe, SourceKind};
use crate::registry::RecipeBook;

// ===========================================================================
// Recipe constructors
// ===========================================================================

/// Craft variant from optional slot ids, padded to the full grid.
pub fn variant(amount: u64, slots: &[Option<&str>]) -> CraftVariant {
    CraftVariant::new(
        amount,
        slots.iter().map(|slot| slot.map(String::from)).collect(),
    )
}

/// Surface-found item whose base block is itself.
pub fn surface(block: &str) -> Recipe {
    Recipe::natural(vec![SourceKind::Surface], vec![block.to_string()])
}

/// Underground-found item whose base block is itself.
pub fn underground(block: &str) -> Recipe {
    Recipe::natural(vec![SourceKind::Underground], vec![block.to_string()])
}

/// A mineable ore block.
pub fn ore(block: &str) -> Recipe {
    Recipe::natural(vec![SourceKind::Ore], vec![block.to_string()])
}

/// An ore drop mined from the listed ore blocks.
pub fn ore_drop(blocks: &[&str]) -> Recipe {
    Recipe::natural(
        vec![SourceKind::OreDrop],
        blocks.iter().map(|b| b.to_string()).collect(),
    )
}

// ===========================================================================
// Fixture registries
// ===========================================================================

/// A vanilla-flavored fixture registry covering every source kind: stone,
/// redstone, coal, iron, glass, and oak chains, plus a small tool and
/// computer tree on top of them.
pub fn sample_book() -> RecipeBook {
    let mut book = RecipeBook::new();

    let planks = Some("minecraft:oak_planks");
    let stick = Some("minecraft:stick");
    let cobble = Some("minecraft:cobblestone");
    let stone = Some("minecraft:stone");
    let glass = Some("minecraft:glass");
    let ingot = Some("minecraft:iron_ingot");

    // Stone chain.
    book.add("minecraft:cobblestone", underground("minecraft:cobblestone"));
    book.add(
        "minecraft:stone",
        Recipe::smeltable(vec!["minecraft:cobblestone".to_string()]),
    );

    // Redstone.
    book.add("minecraft:redstone_ore", ore("minecraft:redstone_ore"));
    book.add(
        "minecraft:deepslate_redstone_ore",
        ore("minecraft:deepslate_redstone_ore"),
    );
    book.add(
        "minecraft:redstone",
        ore_drop(&[
            "minecraft:redstone_ore",
            "minecraft:deepslate_redstone_ore",
        ]),
    );

    // Coal.
    book.add("minecraft:coal_ore", ore("minecraft:coal_ore"));
    book.add("minecraft:coal", ore_drop(&["minecraft:coal_ore"]));

    // Iron chain.
    book.add("minecraft:iron_ore", ore("minecraft:iron_ore"));
    book.add(
        "minecraft:deepslate_iron_ore",
        ore("minecraft:deepslate_iron_ore"),
    );
    book.add(
        "minecraft:raw_iron",
        ore_drop(&["minecraft:iron_ore", "minecraft:deepslate_iron_ore"]),
    );
    book.add(
        "minecraft:iron_ingot",
        Recipe::smeltable(vec!["minecraft:raw_iron".to_string()]),
    );

    // Glass chain.
    book.add("minecraft:sand", surface("minecraft:sand"));
    book.add(
        "minecraft:glass",
        Recipe::smeltable(vec!["minecraft:sand".to_string()]),
    );
    book.add(
        "minecraft:glass_pane",
        Recipe::craftable(vec![variant(
            16,
            &[glass, glass, glass, glass, glass, glass],
        )]),
    );

    // Oak chain.
    book.add("minecraft:oak_log", surface("minecraft:oak_log"));
    book.add(
        "minecraft:oak_planks",
        Recipe::craftable(vec![variant(4, &[Some("minecraft:oak_log")])]),
    );
    book.add(
        "minecraft:stick",
        Recipe::craftable(vec![variant(4, &[planks, None, None, planks])]),
    );
    book.add(
        "minecraft:crafting_table",
        Recipe::craftable(vec![variant(1, &[planks, planks, None, planks, planks])]),
    );

    // Utility blocks.
    book.add(
        "minecraft:chest",
        Recipe::craftable(vec![variant(
            1,
            &[
                planks, planks, planks, planks, None, planks, planks, planks, planks,
            ],
        )]),
    );
    book.add(
        "minecraft:furnace",
        Recipe::craftable(vec![variant(
            1,
            &[
                cobble, cobble, cobble, cobble, None, cobble, cobble, cobble, cobble,
            ],
        )]),
    );

    // Tools.
    book.add(
        "minecraft:iron_pickaxe",
        Recipe::craftable(vec![variant(
            1,
            &[ingot, ingot, ingot, None, stick, None, None, stick, None],
        )]),
    );

    // Computer tree.
    book.add(
        "computercraft:computer_normal",
        Recipe::craftable(vec![variant(
            1,
            &[
                stone,
                stone,
                stone,
                stone,
                Some("minecraft:redstone"),
                stone,
                stone,
                Some("minecraft:glass_pane"),
                stone,
            ],
        )]),
    );
    book.add(
        "computercraft:turtle_normal",
        Recipe::craftable(vec![variant(
            1,
            &[
                ingot,
                ingot,
                ingot,
                ingot,
                Some("computercraft:computer_normal"),
                ingot,
                ingot,
                Some("minecraft:chest"),
                ingot,
            ],
        )]),
    );

    book
}

/// Linear craft chain for benchmarks and property tests: `item_0` is
/// surface-found, each `item_i` crafts from two of `item_{i-1}` with
/// yield 1. Returns the book and the deepest item id. `depth >= 1`.
pub fn chain_book(depth: usize) -> (RecipeBook, String) {
    let mut book = RecipeBook::new();
    book.add("item_0", surface("item_0"));
    for i in 1..=depth {
        let prev = format!("item_{}", i - 1);
        book.add(
            format!("item_{i}"),
            Recipe::craftable(vec![variant(
                1,
                &[Some(prev.as_str()), Some(prev.as_str())],
            )]),
        );
    }
    (book, format!("item_{depth}"))
}
