//! Ledger — the owned, insertion-ordered expense list and its mutation commands.
//!
//! Input is validated here, before anything reaches the list:
//! - titles are trimmed and must be non-empty
//! - amounts must be finite (negative and zero are allowed: refunds, corrections)
//!
//! Ids are UUID v4 strings and dates come from the supplied [`Clock`], so the
//! aggregation side only ever sees well-formed records.

use crate::clock::Clock;
use crate::expense::{Category, Expense};
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
    #[error("expense `{0}` not found")]
    NotFound(String),
}

/// Parse a user-typed amount such as "1,200", "¥980" or "-300".
pub fn parse_amount(input: &str) -> Result<f64, LedgerError> {
    let trimmed = input.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(r) => ("-", r.trim_start()),
        None => ("", trimmed),
    };
    let rest = rest.trim_start_matches(['¥', '$', '€', '£']);
    let cleaned: String = rest.chars().filter(|c| *c != ',' && *c != '_').collect();
    if cleaned.is_empty() {
        return Err(LedgerError::InvalidAmount(input.to_string()));
    }

    let value: f64 = format!("{sign}{cleaned}")
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(input.to_string()))?;
    check_amount(value)
}

fn check_amount(amount: f64) -> Result<f64, LedgerError> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(LedgerError::InvalidAmount(amount.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    items: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-loaded collection (e.g. from the store).
    pub fn from_items(items: Vec<Expense>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Expense] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.items.iter().find(|e| e.id == id)
    }

    /// Append a new record dated `clock.today()` with a fresh id.
    pub fn add(
        &mut self,
        title: &str,
        amount: f64,
        category: Category,
        clock: &dyn Clock,
    ) -> Result<&Expense, LedgerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LedgerError::EmptyTitle);
        }
        let amount = check_amount(amount)?;

        let expense = Expense::new(
            Uuid::new_v4().to_string(),
            clock.today(),
            title,
            amount,
            category,
        );
        tracing::debug!(id = %expense.id, date = %expense.date, amount, "added expense");
        self.items.push(expense);
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn update_amount(&mut self, id: &str, amount: f64) -> Result<(), LedgerError> {
        let amount = check_amount(amount)?;
        let expense = self
            .items
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        tracing::debug!(id, old = expense.amount, new = amount, "updated amount");
        expense.amount = amount;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Expense, LedgerError> {
        let pos = self
            .items
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        tracing::debug!(id, "deleted expense");
        Ok(self.items.remove(pos))
    }

    /// Remove everything. Returns how many records were dropped.
    pub fn clear_all(&mut self) -> usize {
        let n = self.items.len();
        self.items.clear();
        tracing::debug!(removed = n, "cleared all expenses");
        n
    }

    /// Remove every record dated `date`, keeping the order of the rest.
    pub fn clear_by_date(&mut self, date: NaiveDate) -> usize {
        let before = self.items.len();
        self.items.retain(|e| e.date != date);
        let removed = before - self.items.len();
        tracing::debug!(%date, removed, "cleared expenses by date");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(21, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_add_assigns_id_and_today() {
        let mut ledger = Ledger::new();
        let e = ledger.add("  milk ", 100.0, Category::Food, &clock()).unwrap().clone();
        assert_eq!(e.title, "milk");
        assert_eq!(e.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert!(Uuid::parse_str(&e.id).is_ok());

        let f = ledger.add("soap", 200.0, Category::Household, &clock()).unwrap().clone();
        assert_ne!(e.id, f.id);
        assert_eq!(ledger.items()[1].id, f.id);
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.add("   ", 1.0, Category::Food, &clock()).unwrap_err(),
            LedgerError::EmptyTitle
        );
        assert!(matches!(
            ledger.add("x", f64::NAN, Category::Food, &clock()),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            ledger.add("x", f64::INFINITY, Category::Food, &clock()),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_negative_amount_is_accepted() {
        let mut ledger = Ledger::new();
        ledger.add("refund", -300.0, Category::Other, &clock()).unwrap();
        assert_eq!(ledger.items()[0].amount, -300.0);
    }

    #[test]
    fn test_update_and_delete() {
        let mut ledger = Ledger::new();
        let id = ledger.add("coffee", 350.0, Category::Food, &clock()).unwrap().id.clone();

        ledger.update_amount(&id, 400.0).unwrap();
        assert_eq!(ledger.get(&id).unwrap().amount, 400.0);

        assert!(matches!(ledger.update_amount(&id, f64::NAN), Err(LedgerError::InvalidAmount(_))));
        assert_eq!(
            ledger.update_amount("nope", 1.0).unwrap_err(),
            LedgerError::NotFound("nope".to_string())
        );

        let removed = ledger.delete(&id).unwrap();
        assert_eq!(removed.title, "coffee");
        assert!(ledger.delete(&id).is_err());
    }

    #[test]
    fn test_clear_by_date_keeps_order_of_rest() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut ledger = Ledger::from_items(vec![
            Expense::new("a", d1, "a", 1.0, Category::Food),
            Expense::new("b", d2, "b", 2.0, Category::Food),
            Expense::new("c", d1, "c", 3.0, Category::Food),
            Expense::new("d", d2, "d", 4.0, Category::Food),
        ]);
        assert_eq!(ledger.clear_by_date(d1), 2);
        let ids: Vec<&str> = ledger.items().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d"]);
        assert_eq!(ledger.clear_all(), 2);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,200").unwrap(), 1200.0);
        assert_eq!(parse_amount(" ¥980 ").unwrap(), 980.0);
        assert_eq!(parse_amount("-300").unwrap(), -300.0);
        assert_eq!(parse_amount("-$12.50").unwrap(), -12.5);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }
}
