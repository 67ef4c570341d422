//! Persistence encoding: the whole collection as one JSON array.
//!
//! Loading is forgiving. Missing, blank or unparseable text becomes an empty
//! list, and duplicate ids after the first are dropped, so a damaged file can
//! never take the app down.

use crate::expense::Expense;
use std::collections::HashSet;

pub fn encode(items: &[Expense]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(items)
}

/// Strict decode. Errors on anything that is not a well-formed record array.
pub fn decode(text: &str) -> Result<Vec<Expense>, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn decode_or_empty(text: Option<&str>) -> Vec<Expense> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Vec::new();
    };

    let items = match decode(text) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!("stored expenses are unreadable, starting empty: {err}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let total = items.len();
    let unique: Vec<Expense> = items
        .into_iter()
        .filter(|e| seen.insert(e.id.clone()))
        .collect();
    if unique.len() != total {
        tracing::warn!(dropped = total - unique.len(), "dropped records with duplicate ids");
    }
    unique
}
