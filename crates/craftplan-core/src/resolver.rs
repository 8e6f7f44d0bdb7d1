//! Worklist expansion of a craft tree into raw-resource and smelt totals.
//!
//! [`resolve`] expands one target item breadth-first: the target's first
//! craft variant seeds a FIFO frontier of `(item, quantity)` entries, and
//! each popped entry is classified by its recipe's source kinds. Natural
//! items tally a base block, crafted items convert their required quantity
//! into craft operations (ceiling division by their first variant's yield)
//! and enqueue their ingredients, smelted items count a smelt operation per
//! unit and enqueue their input one-to-one.
//!
//! The target's request amount is a number of craft operations, not an
//! output count: the root's own yield is never applied. Every craftable
//! item discovered below the root does divide by its own yield. This
//! asymmetry is deliberate; [`RootAmount::OutputUnits`] opts out of it.
//!
//! Quantities for the same item reached along different expansion paths are
//! rounded independently by default, which can over-count shared sub-items
//! relative to rounding once over the merged requirement.
//! [`Rounding::MergeBeforeRound`] opts into the merged behavior.
//!
//! Missing sub-recipes do not abort the call: they are recorded in
//! [`Resolution::missing`] and their branch is skipped, under-counting the
//! totals. Every other irregularity aborts with a [`ResolveError`].

use crate::recipe::{AIR, CraftVariant, Recipe, SourceKind};
use crate::registry::RecipeBook;
use std::collections::{HashMap, VecDeque};

/// Smelt operations covered by one unit of fuel.
pub const SMELTS_PER_FUEL: u64 = 8;

/// Default item charged for fuel in multi-target plans.
pub const DEFAULT_FUEL_ITEM: &str = "minecraft:coal_ore";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that abort a resolve call. No partial result is returned.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The target id has no registry entry.
    #[error("no recipe entry for '{0}'")]
    NotFound(String),

    /// The target does not declare the craft source kind.
    #[error("'{0}' is not a craftable item")]
    NotCraftable(String),

    /// An item depends on itself: the root target reappeared in its own
    /// tree, or an item reappeared along its own expansion path.
    #[error("recursive recipe detected for '{0}'")]
    RecursiveRecipe(String),

    /// An entry's declared source kinds match none of the handled branches.
    #[error("unsupported source kinds {kinds:?} for '{item}'")]
    UnsupportedSource {
        item: String,
        kinds: Vec<SourceKind>,
    },

    /// An entry declares a source kind without usable backing data for it.
    #[error("malformed recipe entry for '{item}': {detail}")]
    Malformed {
        item: String,
        detail: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Aggregate outcome of expanding one or more targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Raw item id -> accumulated quantity. Strictly additive during a
    /// resolve call; zero quantities are never materialized.
    pub resources: HashMap<String, u64>,
    /// Total individual smelt operations required.
    pub smelt_ops: u64,
    /// Ids whose recipe lookup failed during expansion, in encounter order.
    /// Their branches were skipped, so the totals under-count.
    pub missing: Vec<String>,
}

impl Resolution {
    /// Quantity accumulated for a raw item, zero if absent.
    pub fn resource(&self, id: &str) -> u64 {
        self.resources.get(id).copied().unwrap_or(0)
    }

    fn add_resource(&mut self, id: &str, amount: u64) {
        if amount > 0 {
            *self.resources.entry(id.to_string()).or_insert(0) += amount;
        }
    }

    fn absorb(&mut self, other: Resolution) {
        for (id, amount) in other.resources {
            *self.resources.entry(id).or_insert(0) += amount;
        }
        self.smelt_ops = self.smelt_ops.saturating_add(other.smelt_ops);
        self.missing.extend(other.missing);
    }
}

// ---------------------------------------------------------------------------
// Strategy options
// ---------------------------------------------------------------------------

/// How the root request amount is interpreted when seeding the worklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RootAmount {
    /// The amount is a number of craft operations of the target; the root
    /// variant's own yield is not applied. Historical behavior.
    #[default]
    CraftOperations,
    /// The amount is a desired output count; the root performs
    /// `ceil(amount / yield)` operations like any other craftable item.
    OutputUnits,
}

/// How repeated requirements for the same craftable item are rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rounding {
    /// Every occurrence reached along a distinct expansion path applies
    /// ceiling division on its own, which can over-count shared sub-items.
    /// Historical behavior.
    #[default]
    PerPath,
    /// Frontier entries for the same item are merged before each pop, so
    /// ceiling division happens once per merged requirement. Entries that
    /// never coexist in the frontier still round separately.
    MergeBeforeRound,
}

/// Strategy flags for a single resolve call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub root_amount: RootAmount,
    pub rounding: Rounding,
}

// ---------------------------------------------------------------------------
// Worklist
// ---------------------------------------------------------------------------

/// A frontier entry: an item, the quantity of it still to account for, and
/// the chain of craft/smelt ancestors that produced it. The ancestor path
/// is the cycle guard; acyclic registries never trip it.
#[derive(Debug, Clone)]
struct WorkItem {
    id: String,
    amount: u64,
    ancestors: Vec<String>,
}

/// Pop the next frontier entry, first merging coexisting same-item entries
/// when merge-before-round is selected.
fn next_entry(frontier: &mut VecDeque<WorkItem>, rounding: Rounding) -> Option<WorkItem> {
    if rounding == Rounding::MergeBeforeRound {
        compress(frontier);
    }
    frontier.pop_front()
}

/// Merge frontier entries that share an item id: quantities are summed and
/// ancestor paths unioned, preserving first-occurrence order.
fn compress(frontier: &mut VecDeque<WorkItem>) {
    let mut merged: Vec<WorkItem> = Vec::with_capacity(frontier.len());
    for entry in frontier.drain(..) {
        match merged.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                existing.amount = existing.amount.saturating_add(entry.amount);
                for ancestor in entry.ancestors {
                    if !existing.ancestors.contains(&ancestor) {
                        existing.ancestors.push(ancestor);
                    }
                }
            }
            None => merged.push(entry),
        }
    }
    frontier.extend(merged);
}

fn first_craft_variant<'a>(id: &str, recipe: &'a Recipe) -> Result<&'a CraftVariant, ResolveError> {
    recipe
        .craft
        .as_ref()
        .and_then(|variants| variants.first())
        .ok_or_else(|| ResolveError::Malformed {
            item: id.to_string(),
            detail: "craft source without craft variants",
        })
}

/// Craft operations needed to cover `amount` output units of a variant.
fn craft_operations(id: &str, variant: &CraftVariant, amount: u64) -> Result<u64, ResolveError> {
    if variant.amount == 0 {
        return Err(ResolveError::Malformed {
            item: id.to_string(),
            detail: "craft variant with zero yield",
        });
    }
    Ok(amount.div_ceil(variant.amount))
}

// ---------------------------------------------------------------------------
// Tree resolver
// ---------------------------------------------------------------------------

/// Expand `target`'s craft tree into raw-resource totals and a smelt count,
/// with the default strategy flags.
pub fn resolve(
    book: &RecipeBook,
    target: &str,
    total_amount: u64,
) -> Result<Resolution, ResolveError> {
    resolve_with(book, target, total_amount, ResolveOptions::default())
}

/// Expand `target`'s craft tree with explicit strategy flags.
pub fn resolve_with(
    book: &RecipeBook,
    target: &str,
    total_amount: u64,
    options: ResolveOptions,
) -> Result<Resolution, ResolveError> {
    let root = book
        .get(target)
        .ok_or_else(|| ResolveError::NotFound(target.to_string()))?;
    if !root.is_craftable() {
        return Err(ResolveError::NotCraftable(target.to_string()));
    }
    let variant = first_craft_variant(target, root)?;

    let operations = match options.root_amount {
        RootAmount::CraftOperations => total_amount,
        RootAmount::OutputUnits => craft_operations(target, variant, total_amount)?,
    };

    let mut frontier: VecDeque<WorkItem> = variant
        .ingredient_counts()
        .into_iter()
        .map(|(id, count)| WorkItem {
            id,
            amount: count.saturating_mul(operations),
            ancestors: Vec::new(),
        })
        .collect();

    let mut result = Resolution::default();

    while let Some(entry) = next_entry(&mut frontier, options.rounding) {
        let WorkItem {
            id,
            amount,
            ancestors,
        } = entry;

        if id == AIR || amount == 0 {
            continue;
        }
        if id == target {
            return Err(ResolveError::RecursiveRecipe(target.to_string()));
        }
        let Some(recipe) = book.get(&id) else {
            result.missing.push(id);
            continue;
        };

        // Branch priority: natural kinds, then craft, then smelt.
        if recipe.sources.iter().any(|kind| kind.is_natural()) {
            let block = recipe
                .blocks
                .as_ref()
                .and_then(|blocks| blocks.first())
                .ok_or_else(|| ResolveError::Malformed {
                    item: id.clone(),
                    detail: "natural source without base blocks",
                })?;
            result.add_resource(block, amount);
        } else if recipe.is_craftable() {
            let variant = first_craft_variant(&id, recipe)?;
            let ops = craft_operations(&id, variant, amount)?;

            let mut path = ancestors;
            path.push(id);
            for (sub, count) in variant.ingredient_counts() {
                if path.contains(&sub) {
                    return Err(ResolveError::RecursiveRecipe(sub));
                }
                frontier.push_back(WorkItem {
                    id: sub,
                    amount: count.saturating_mul(ops),
                    ancestors: path.clone(),
                });
            }
        } else if recipe.sources.contains(&SourceKind::Smelt) {
            let input = recipe
                .smelt
                .as_ref()
                .and_then(|inputs| inputs.first())
                .ok_or_else(|| ResolveError::Malformed {
                    item: id.clone(),
                    detail: "smelt source without inputs",
                })?;
            result.smelt_ops = result.smelt_ops.saturating_add(amount);

            let mut path = ancestors;
            path.push(id.clone());
            if path.iter().any(|ancestor| ancestor == input) {
                return Err(ResolveError::RecursiveRecipe(input.clone()));
            }
            frontier.push_back(WorkItem {
                id: input.clone(),
                amount,
                ancestors: path,
            });
        } else {
            return Err(ResolveError::UnsupportedSource {
                item: id,
                kinds: recipe.sources.clone(),
            });
        }
    }

    Ok(result)
}

// ---------------------------------------------------------------------------
// Multi-target resolver
// ---------------------------------------------------------------------------

/// One (item, amount) request in a multi-target plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub item: String,
    pub amount: u64,
}

impl PlanRequest {
    pub fn new(item: impl Into<String>, amount: u64) -> Self {
        Self {
            item: item.into(),
            amount,
        }
    }
}

/// Options for a multi-target plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    /// Charge fuel for the accumulated smelt operations.
    pub include_fuel: bool,
    /// The item charged as fuel, one unit per [`SMELTS_PER_FUEL`] smelts.
    pub fuel_item: String,
    /// Strategy flags forwarded to each per-target resolve.
    pub resolve: ResolveOptions,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            include_fuel: true,
            fuel_item: DEFAULT_FUEL_ITEM.to_string(),
            resolve: ResolveOptions::default(),
        }
    }
}

/// Resolve every request, merge the results additively, and charge fuel for
/// the accumulated smelt operations (default options).
pub fn resolve_many(
    book: &RecipeBook,
    requests: &[PlanRequest],
) -> Result<Resolution, ResolveError> {
    resolve_many_with(book, requests, &PlanOptions::default())
}

/// Resolve every request with explicit plan options.
///
/// The first failing request aborts the whole plan; no partial aggregate is
/// returned. Fuel is charged once after all requests, at
/// `ceil(smelt_ops / SMELTS_PER_FUEL)` units of the fuel item, and never
/// triggers further smelt or fuel accounting.
pub fn resolve_many_with(
    book: &RecipeBook,
    requests: &[PlanRequest],
    options: &PlanOptions,
) -> Result<Resolution, ResolveError> {
    let mut total = Resolution::default();
    for request in requests {
        let resolved = resolve_with(book, &request.item, request.amount, options.resolve)?;
        total.absorb(resolved);
    }
    if options.include_fuel {
        let fuel = total.smelt_ops.div_ceil(SMELTS_PER_FUEL);
        total.add_resource(&options.fuel_item, fuel);
    }
    Ok(total)
}

// ===========================================================================
// Tests
// ===========================================================================
