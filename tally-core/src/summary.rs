//! Scalar statistics over a (possibly pre-filtered) item set.

use crate::expense::Expense;

/// Count, total, rounded mean and extremes.
///
/// `max_item` / `min_item` point at the first record that reaches the
/// extremum; both are `None` for an empty set and the numbers are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary<'a> {
    pub count: usize,
    pub sum: f64,
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub max_item: Option<&'a Expense>,
    pub min_item: Option<&'a Expense>,
}

/// Round to the nearest integer, halves toward +inf (2.5 -> 3, -2.5 -> -2).
pub fn round_half_up(x: f64) -> f64 {
    // f64::round sends halves away from zero; pull negative halves back up
    let r = x.round();
    if x - r == 0.5 { r + 1.0 } else { r }
}

pub fn summarize(items: &[Expense]) -> Summary<'_> {
    summarize_iter(items)
}

/// Same as [`summarize`] for any sequence of borrowed records, e.g. a
/// filtered iterator that should not be collected first.
pub fn summarize_iter<'a>(items: impl IntoIterator<Item = &'a Expense>) -> Summary<'a> {
    let mut iter = items.into_iter();
    let Some(first) = iter.next() else {
        return Summary::default();
    };

    let mut max_item = first;
    let mut min_item = first;
    let mut sum = first.amount;
    let mut count = 1usize;

    for e in iter {
        count += 1;
        sum += e.amount;
        // strict comparisons keep the first occurrence on ties
        if e.amount > max_item.amount {
            max_item = e;
        }
        if e.amount < min_item.amount {
            min_item = e;
        }
    }

    Summary {
        count,
        sum,
        average: round_half_up(sum / count as f64),
        max: max_item.amount,
        min: min_item.amount,
        max_item: Some(max_item),
        min_item: Some(min_item),
    }
}
