//! Per-category tallies.

use crate::buckets::OrderedBuckets;
use crate::expense::{Category, Expense};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryTotal {
    pub count: usize,
    pub sum: f64,
}

/// Categories present in the input, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    entries: Vec<(Category, CategoryTotal)>,
}

impl CategoryBreakdown {
    pub fn iter(&self) -> impl Iterator<Item = &(Category, CategoryTotal)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all buckets; equals the grand total of the input.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, t)| t.sum).sum()
    }

    /// Category with the most entries. Ties go to the one that appeared first.
    pub fn top_category(&self) -> Option<Category> {
        let mut best: Option<&(Category, CategoryTotal)> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.1.count > b.1.count) {
                best = Some(entry);
            }
        }
        best.map(|(c, _)| *c)
    }
}

pub fn by_category(items: &[Expense]) -> CategoryBreakdown {
    let mut buckets: OrderedBuckets<Category, CategoryTotal> = OrderedBuckets::default();
    for e in items {
        let t = buckets.entry(e.category);
        t.count += 1;
        t.sum += e.amount;
    }
    CategoryBreakdown {
        entries: buckets.into_entries(),
    }
}
