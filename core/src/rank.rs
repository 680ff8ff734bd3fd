//! Insertion-ordered grouping and frequency counting.
//!
//! Every aggregator in the core buckets records by some derived key and
//! then ranks the buckets. Tie-breaking is always "first encountered
//! wins", so the containers here remember the order in which keys first
//! appeared — a plain `HashMap` iteration order would make ranking
//! nondeterministic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// A map that yields its entries in key-first-encounter order.
#[derive(Debug, Clone)]
pub struct Grouped<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K: Eq + Hash + Clone, V> Grouped<K, V> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Fetch the value for `key`, inserting `default()` on first sight.
    pub fn entry_with(&mut self, key: &K, default: impl FnOnce() -> V) -> &mut V {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(key.clone(), i);
                self.entries.push((key.clone(), default()));
                i
            }
        };
        &mut self.entries[i].1
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(K, V)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash + Clone, V> Default for Grouped<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// One ranked entry of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem {
    pub name: String,
    pub count: u64,
}

/// Frequency table over string keys, insertion-ordered.
#[derive(Debug, Clone, Default)]
pub struct FreqTable {
    counts: Grouped<String, u64>,
}

impl FreqTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&mut self, key: &str) {
        *self.counts.entry_with(&key.to_string(), || 0) += 1;
    }

    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(&key.to_string()).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` highest-count entries, ties broken by first encounter.
    ///
    /// Stable sort on descending count, then truncate — the shared top-N
    /// rule used by segmentation, association, and origin reports alike.
    pub fn top_n(&self, n: usize) -> Vec<RankedItem> {
        let mut ranked: Vec<RankedItem> = self
            .iter()
            .map(|(name, count)| RankedItem {
                name: name.to_string(),
                count,
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }

    /// The first key (in encounter order) to reach the maximum count.
    pub fn most_common(&self) -> Option<&str> {
        let mut best: Option<(&str, u64)> = None;
        for (key, count) in self.iter() {
            match best {
                Some((_, max)) if count <= max => {}
                _ => best = Some((key, count)),
            }
        }
        best.map(|(key, _)| key)
    }
}
