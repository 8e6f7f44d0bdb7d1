//! Recipe data model: how a single item is produced.
//!
//! Each registry entry declares one or more [`SourceKind`]s together with
//! the backing data for them: base blocks for naturally found items, craft
//! variants for crafted items, smelt inputs for smelted items. Only index 0
//! of any backing list is consulted by the resolver; later entries are
//! inert reserve slots for alternative recipes.

use serde::{Deserialize, Serialize};

/// Number of slots in a craft grid (3x3, row-major).
pub const GRID_SLOTS: usize = 9;

/// Sentinel item id treated the same as an empty grid slot.
pub const AIR: &str = "minecraft:air";

// ---------------------------------------------------------------------------
// Source kinds
// ---------------------------------------------------------------------------

/// How an item is obtained. An entry may declare several kinds; the
/// resolver acts on the first matching branch in a fixed priority order
/// (natural kinds, then craft, then smelt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Found above ground (logs, sand, sugar cane).
    Surface,
    /// Found below ground (cobblestone).
    Underground,
    /// A mineable ore block.
    Ore,
    /// The item an ore block drops when mined.
    OreDrop,
    /// Built from sub-items in a craft grid.
    Craft,
    /// Derived by heating another item.
    Smelt,
}

impl SourceKind {
    /// Whether this kind resolves directly to a base-block tally.
    pub fn is_natural(self) -> bool {
        matches!(
            self,
            SourceKind::Surface | SourceKind::Underground | SourceKind::Ore | SourceKind::OreDrop
        )
    }
}

// ---------------------------------------------------------------------------
// Craft variants
// ---------------------------------------------------------------------------

/// One way to craft an item: a fixed grid of optional ingredient slots plus
/// the number of output units a single craft operation produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftVariant {
    /// Grid slots in row-major order. `None` and the air sentinel are both
    /// treated as empty.
    #[serde(rename = "recipe")]
    pub slots: Vec<Option<String>>,
    /// Output units per craft operation.
    pub amount: u64,
}

impl CraftVariant {
    /// Build a variant from the given slots, padding with empty slots up to
    /// [`GRID_SLOTS`].
    pub fn new(amount: u64, mut slots: Vec<Option<String>>) -> Self {
        if slots.len() < GRID_SLOTS {
            slots.resize(GRID_SLOTS, None);
        }
        Self { slots, amount }
    }

    /// Tally the non-empty, non-air slots into `(ingredient, count)` pairs.
    ///
    /// Pairs are ordered by first appearance in the grid so that expansion
    /// order downstream is deterministic.
    pub fn ingredient_counts(&self) -> Vec<(String, u64)> {
        let mut counts: Vec<(String, u64)> = Vec::new();
        for slot in self.slots.iter().flatten() {
            if slot.as_str() == AIR {
                continue;
            }
            match counts.iter_mut().find(|(id, _)| id == slot) {
                Some((_, n)) => *n += 1,
                None => counts.push((slot.clone(), 1)),
            }
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Recipe entries
// ---------------------------------------------------------------------------

/// A registry entry describing how one item is produced.
///
/// The populated optional fields are expected to correspond to the declared
/// source kinds: `blocks` for the natural kinds, `craft` for
/// [`SourceKind::Craft`], `smelt` for [`SourceKind::Smelt`]. Entries are
/// not validated on construction or load; a mismatch only surfaces as a
/// resolve-time error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub sources: Vec<SourceKind>,
    /// Base item ids for naturally found items. Index 0 is the one tallied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<String>>,
    /// Alternative craft variants. Index 0 is the one expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub craft: Option<Vec<CraftVariant>>,
    /// Candidate smelt inputs. Index 0 is the one consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smelt: Option<Vec<String>>,
}

impl Recipe {
    /// Entry for a naturally found item, gathered or mined from the listed
    /// base blocks.
    pub fn natural(sources: Vec<SourceKind>, blocks: Vec<String>) -> Self {
        Self {
            sources,
            blocks: Some(blocks),
            craft: None,
            smelt: None,
        }
    }

    /// Entry for a crafted item with one or more grid variants.
    pub fn craftable(variants: Vec<CraftVariant>) -> Self {
        Self {
            sources: vec![SourceKind::Craft],
            blocks: None,
            craft: Some(variants),
            smelt: None,
        }
    }

    /// Entry for a smelted item with one or more candidate inputs.
    pub fn smeltable(inputs: Vec<String>) -> Self {
        Self {
            sources: vec![SourceKind::Smelt],
            blocks: None,
            craft: None,
            smelt: Some(inputs),
        }
    }

    /// Whether the entry declares the craft source kind.
    pub fn is_craftable(&self) -> bool {
        self.sources.contains(&SourceKind::Craft)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
