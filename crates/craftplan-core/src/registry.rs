//! The recipe registry: the authoritative mapping from item id to entry.
//!
//! A [`RecipeBook`] is constructed once at startup (usually from a persisted
//! document), optionally mutated, and then treated as read-only for the
//! duration of any single resolve call. Entries are never validated here;
//! a malformed entry only surfaces as a resolve-time error.

use crate::recipe::Recipe;
use std::collections::{BTreeMap, HashMap};

/// Persisted document form of a registry: item id -> recipe entry.
///
/// A `BTreeMap` so that [`RecipeBook::save`] serializes with a
/// deterministic key order.
pub type Document = BTreeMap<String, Recipe>;

/// Errors from document (de)serialization.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// RecipeBook
// ---------------------------------------------------------------------------

/// The recipe registry. Mutable between resolve calls, read-only during one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeBook {
    entries: HashMap<String, Recipe>,
}

impl RecipeBook {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert or overwrite the entry for an item.
    pub fn add(&mut self, id: impl Into<String>, recipe: Recipe) {
        self.entries.insert(id.into(), recipe);
    }

    /// Remove an item's entry, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Recipe> {
        self.entries.remove(id)
    }

    /// Look up an item's entry. Never panics.
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.entries.get(id)
    }

    /// Bulk insert, overwriting existing entries on duplicate ids (later
    /// keys win).
    pub fn merge(&mut self, entries: HashMap<String, Recipe>) {
        self.entries.extend(entries);
    }

    /// Replace the whole registry with a persisted document.
    pub fn load(&mut self, document: Document) {
        self.entries = document.into_iter().collect();
    }

    /// Snapshot the registry into its persisted document form.
    ///
    /// The full key set is preserved and keys sort deterministically;
    /// entries are not validated.
    pub fn save(&self) -> Document {
        self.entries
            .iter()
            .map(|(id, recipe)| (id.clone(), recipe.clone()))
            .collect()
    }

    /// Parse a registry from its JSON document form.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Document = serde_json::from_str(json)?;
        let mut book = Self::new();
        book.load(document);
        Ok(book)
    }

    /// Serialize the registry to its JSON document form.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(&self.save())?)
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the registered item ids in unspecified order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
