//! Per-round ability selection set
//!
//! Ordered by insertion, duplicate-free, capped at `MAX_SELECTIONS`.

use serde::{Deserialize, Serialize};

use crate::combat::constants::MAX_SELECTIONS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection<K> {
    items: Vec<K>,
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self {
            items: Vec::with_capacity(MAX_SELECTIONS),
        }
    }
}

impl<K: Copy + PartialEq> Selection<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a slice, keeping the first `MAX_SELECTIONS` distinct entries
    pub fn from_kinds(kinds: &[K]) -> Self {
        let mut selection = Self::new();
        for &kind in kinds {
            selection.try_insert(kind);
        }
        selection
    }

    /// Add a kind; refused when already present or the set is full
    pub fn try_insert(&mut self, kind: K) -> bool {
        if self.is_full() || self.contains(kind) {
            return false;
        }
        self.items.push(kind);
        true
    }

    pub fn remove(&mut self, kind: K) -> bool {
        let before = self.items.len();
        self.items.retain(|&k| k != kind);
        self.items.len() != before
    }

    /// Remove if present, otherwise insert. Returns whether the set changed.
    pub fn toggle(&mut self, kind: K) -> bool {
        if self.contains(kind) {
            self.remove(kind)
        } else {
            self.try_insert(kind)
        }
    }

    pub fn contains(&self, kind: K) -> bool {
        self.items.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_SELECTIONS
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.items.iter().copied()
    }

    pub fn as_slice(&self) -> &[K] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<K> {
        self.items.clone()
    }
}
