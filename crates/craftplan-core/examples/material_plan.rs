//! Material plan example: furnaces, a crafting table, and iron tools from
//! a hand-built registry.
//!
//! Builds a small registry covering every source kind, resolves a
//! multi-target plan, and prints the raw-material shopping list.
//!
//! Run with: `cargo run -p craftplan-core --example material_plan`

use craftplan_core::recipe::{CraftVariant, Recipe, SourceKind};
use craftplan_core::registry::RecipeBook;
use craftplan_core::resolver::{PlanRequest, resolve_many};
use std::collections::BTreeMap;

fn slots(ids: &[Option<&str>]) -> Vec<Option<String>> {
    ids.iter().map(|id| id.map(String::from)).collect()
}

fn main() {
    let mut book = RecipeBook::new();

    // --- Natural resources ---

    book.add(
        "minecraft:oak_log",
        Recipe::natural(
            vec![SourceKind::Surface],
            vec!["minecraft:oak_log".to_string()],
        ),
    );
    book.add(
        "minecraft:cobblestone",
        Recipe::natural(
            vec![SourceKind::Underground],
            vec!["minecraft:cobblestone".to_string()],
        ),
    );
    book.add(
        "minecraft:iron_ore",
        Recipe::natural(
            vec![SourceKind::Ore],
            vec!["minecraft:iron_ore".to_string()],
        ),
    );
    book.add(
        "minecraft:raw_iron",
        Recipe::natural(
            vec![SourceKind::OreDrop],
            vec!["minecraft:iron_ore".to_string()],
        ),
    );

    // --- Smelted items ---

    book.add(
        "minecraft:iron_ingot",
        Recipe::smeltable(vec!["minecraft:raw_iron".to_string()]),
    );

    // --- Crafted items ---

    let planks = Some("minecraft:oak_planks");
    let stick = Some("minecraft:stick");
    let cobble = Some("minecraft:cobblestone");
    let ingot = Some("minecraft:iron_ingot");

    book.add(
        "minecraft:oak_planks",
        Recipe::craftable(vec![CraftVariant::new(
            4,
            slots(&[Some("minecraft:oak_log")]),
        )]),
    );
    book.add(
        "minecraft:stick",
        Recipe::craftable(vec![CraftVariant::new(
            4,
            slots(&[planks, None, None, planks]),
        )]),
    );
    book.add(
        "minecraft:crafting_table",
        Recipe::craftable(vec![CraftVariant::new(
            1,
            slots(&[planks, planks, None, planks, planks]),
        )]),
    );
    book.add(
        "minecraft:furnace",
        Recipe::craftable(vec![CraftVariant::new(
            1,
            slots(&[
                cobble, cobble, cobble, cobble, None, cobble, cobble, cobble, cobble,
            ]),
        )]),
    );
    book.add(
        "minecraft:iron_pickaxe",
        Recipe::craftable(vec![CraftVariant::new(
            1,
            slots(&[ingot, ingot, ingot, None, stick, None, None, stick, None]),
        )]),
    );

    // --- Resolve the plan ---

    let requests = vec![
        PlanRequest::new("minecraft:iron_pickaxe", 1),
        PlanRequest::new("minecraft:crafting_table", 1),
        PlanRequest::new("minecraft:furnace", 3),
    ];

    let plan = match resolve_many(&book, &requests) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("plan failed: {err}");
            std::process::exit(1);
        }
    };

    println!("-- material plan --");
    for request in &requests {
        println!("{:>6} x {}", request.amount, request.item);
    }

    println!("\n-- raw materials --");
    let sorted: BTreeMap<_, _> = plan.resources.iter().collect();
    for (id, amount) in sorted {
        println!("{amount:>6} x {id}");
    }

    println!("\n{} smelt operations", plan.smelt_ops);
    if !plan.missing.is_empty() {
        println!("missing recipes for: {}", plan.missing.join(", "));
    }
}
