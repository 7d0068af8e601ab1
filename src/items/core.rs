use std::collections::HashSet;

use blake3::Hash;

use crate::error::{NavError, Result};

/// Stable identifier carried by every grid entry.
pub type ItemId = String;

/// Contract for entries the grid navigates over. Order in the sequence is
/// significant; identifiers must be unique within one sequence and stable
/// for surviving entries across replacements.
pub trait GridEntry: Clone {
    fn entry_id(&self) -> ItemId;
}

impl GridEntry for String {
    fn entry_id(&self) -> ItemId {
        self.clone()
    }
}

/// Outcome of a sequence replacement, used by the engine to decide whether
/// lifecycle work (initial focus claim, focus release) is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemsChange {
    pub previous_count: usize,
    pub count: usize,
    /// The list went from empty to non-empty.
    pub became_populated: bool,
    /// The identifier sequence differs from the previous one.
    pub identity_changed: bool,
}

/// Holds the current entry sequence. Replacements are wholesale; the store
/// hashes the identifier sequence so redundant re-sends of an identical list
/// are recognized and reported as unchanged.
#[derive(Debug, Default)]
pub struct ItemStore<T> {
    entries: Vec<T>,
    identity: Option<Hash>,
}

impl<T: GridEntry> ItemStore<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            identity: None,
        }
    }

    /// Replace the whole sequence. Fails without mutating the store when two
    /// entries share an identifier.
    pub fn replace(&mut self, entries: Vec<T>) -> Result<ItemsChange> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            let id = entry.entry_id();
            if !seen.insert(id.clone()) {
                return Err(NavError::DuplicateEntry(id));
            }
        }

        let new_identity = hash_identity(&entries);
        let identity_changed = self.identity != Some(new_identity);
        let previous_count = self.entries.len();
        let count = entries.len();

        self.entries = entries;
        self.identity = Some(new_identity);

        Ok(ItemsChange {
            previous_count,
            count,
            became_populated: previous_count == 0 && count > 0,
            identity_changed,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}

fn hash_identity<T: GridEntry>(entries: &[T]) -> Hash {
    let mut hasher = blake3::Hasher::new();
    for entry in entries {
        let id = entry.entry_id();
        // Length prefix keeps ["ab","c"] distinct from ["a","bc"].
        hasher.update(&(id.len() as u64).to_le_bytes());
        hasher.update(id.as_bytes());
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn first_population_is_reported() {
        let mut store = ItemStore::new();
        let change = store.replace(ids(&["a", "b", "c"])).unwrap();
        assert_eq!(change.previous_count, 0);
        assert_eq!(change.count, 3);
        assert!(change.became_populated);
        assert!(change.identity_changed);
    }

    #[test]
    fn identical_resend_reports_no_identity_change() {
        let mut store = ItemStore::new();
        store.replace(ids(&["a", "b"])).unwrap();
        let change = store.replace(ids(&["a", "b"])).unwrap();
        assert!(!change.identity_changed);
        assert!(!change.became_populated);
    }

    #[test]
    fn reorder_changes_identity() {
        let mut store = ItemStore::new();
        store.replace(ids(&["a", "b"])).unwrap();
        let change = store.replace(ids(&["b", "a"])).unwrap();
        assert!(change.identity_changed);
    }

    #[test]
    fn adjacent_ids_do_not_collide() {
        let mut store = ItemStore::new();
        store.replace(ids(&["ab", "c"])).unwrap();
        let change = store.replace(ids(&["a", "bc"])).unwrap();
        assert!(change.identity_changed);
    }

    #[test]
    fn duplicate_ids_are_rejected_and_store_is_untouched() {
        let mut store = ItemStore::new();
        store.replace(ids(&["a", "b"])).unwrap();
        let err = store.replace(ids(&["x", "x"])).unwrap_err();
        assert!(matches!(err, NavError::DuplicateEntry(id) if id == "x"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).map(String::as_str), Some("a"));
    }

    #[test]
    fn emptying_the_store_is_not_population() {
        let mut store = ItemStore::new();
        store.replace(ids(&["a"])).unwrap();
        let change = store.replace(Vec::new()).unwrap();
        assert_eq!(change.count, 0);
        assert!(!change.became_populated);
    }
}
