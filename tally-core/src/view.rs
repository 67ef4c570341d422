//! View selection — filter + search + sort over the stored list.
//!
//! Rules:
//! - category filter (when set) AND case-insensitive title search
//!   (empty keyword keeps everything)
//! - `Highest` / `Lowest` are stable sorts on amount, so equal amounts keep
//!   their relative input order
//! - `Latest` is insertion order reversed, NOT a date sort: two entries logged
//!   on the same day still show most-recently-added first
//!
//! The input slice is never touched; a fresh Vec is returned.

use crate::expense::{Category, Expense};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Latest,
    Highest,
    Lowest,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Latest => "latest",
            SortOrder::Highest => "highest",
            SortOrder::Lowest => "lowest",
        })
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(SortOrder::Latest),
            "highest" => Ok(SortOrder::Highest),
            "lowest" => Ok(SortOrder::Lowest),
            other => Err(format!(
                "unknown sort order '{other}' (expected latest, highest or lowest)"
            )),
        }
    }
}

/// Transient display selections. Never persisted with the data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub category: Option<Category>,
    pub search: String,
    pub sort: SortOrder,
}

impl ViewParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_search(mut self, keyword: impl Into<String>) -> Self {
        self.search = keyword.into();
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// True if the record passes both the category and the keyword filter.
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.is_none_or(|c| expense.category == c) && expense.title_contains(&self.search)
    }
}

/// Filtered items in input order, without sorting.
pub fn filter(items: &[Expense], params: &ViewParams) -> Vec<Expense> {
    items.iter().filter(|e| params.matches(e)).cloned().collect()
}

/// Filter then order `items` for display.
pub fn select(items: &[Expense], params: &ViewParams) -> Vec<Expense> {
    let mut out = filter(items, params);

    match params.sort {
        // sort_by is stable
        SortOrder::Highest => out.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
        SortOrder::Lowest => out.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
        SortOrder::Latest => out.reverse(),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(id: &str, title: &str, amount: f64, category: Category) -> Expense {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Expense::new(id, date, title, amount, category)
    }

    fn ids(items: &[Expense]) -> Vec<&str> {
        items.iter().map(|e| e.id.as_str()).collect()
    }

    fn sample() -> Vec<Expense> {
        vec![
            item("a", "Milk", 100.0, Category::Food),
            item("b", "Soap", 200.0, Category::Household),
            item("c", "Coffee", 100.0, Category::Food),
            item("d", "Dinner with team", 300.0, Category::Social),
        ]
    }

    #[test]
    fn test_latest_reverses_insertion_order() {
        let out = select(&sample(), &ViewParams::new());
        assert_eq!(ids(&out), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_highest_is_stable_on_ties() {
        let out = select(&sample(), &ViewParams::new().with_sort(SortOrder::Highest));
        assert_eq!(ids(&out), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_lowest_is_stable_on_ties() {
        let out = select(&sample(), &ViewParams::new().with_sort(SortOrder::Lowest));
        assert_eq!(ids(&out), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_category_and_search_are_anded() {
        let items = sample();
        let params = ViewParams::new()
            .with_category(Category::Food)
            .with_search("CO")
            .with_sort(SortOrder::Lowest);
        assert_eq!(ids(&select(&items, &params)), vec!["c"]);

        let params = ViewParams::new().with_category(Category::Household).with_search("milk");
        assert!(select(&items, &params).is_empty());
    }

    #[test]
    fn test_select_does_not_mutate_input() {
        let items = sample();
        let before = items.clone();
        let _ = select(&items, &ViewParams::new().with_sort(SortOrder::Highest));
        assert_eq!(items, before);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("Highest".parse::<SortOrder>().unwrap(), SortOrder::Highest);
        assert!("newest".parse::<SortOrder>().is_err());
    }
}
