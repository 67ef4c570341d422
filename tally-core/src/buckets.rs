//! Insertion-ordered grouping used by the category and date breakdowns.

use std::collections::HashMap;
use std::hash::Hash;

/// Map from key to accumulator that remembers first-appearance order.
#[derive(Debug, Clone)]
pub(crate) struct OrderedBuckets<K, V> {
    entries: Vec<(K, V)>,
    // key -> position in `entries`
    idx: HashMap<K, usize>,
}

impl<K, V> Default for OrderedBuckets<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            idx: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash, V: Default> OrderedBuckets<K, V> {
    pub(crate) fn entry(&mut self, key: K) -> &mut V {
        let pos = *self.idx.entry(key).or_insert_with(|| {
            self.entries.push((key, V::default()));
            self.entries.len() - 1
        });
        &mut self.entries[pos].1
    }

    pub(crate) fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}
