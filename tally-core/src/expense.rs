//! Expense record types

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One logged purchase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    /// Unique identifier, never reused
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Day the entry was logged (YYYY-MM-DD, local time)
    pub date: NaiveDate,
    /// Item or shop name
    pub title: String,
    /// Always finite; sign is not restricted
    pub amount: f64,
    pub category: Category,
}

// Older or hand-written files may carry numeric ids.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
    })
}

/// Closed set of expense categories shared by the add path, filters and storage
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "food", alias = "Food")]
    Food,
    #[serde(rename = "household", alias = "Household")]
    Household,
    #[serde(rename = "social", alias = "Social")]
    Social,
    #[serde(rename = "other", alias = "Other")]
    Other,
    #[default]
    #[serde(rename = "uncategorized", alias = "Uncategorized")]
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Household,
        Category::Social,
        Category::Other,
        Category::Uncategorized,
    ];

    /// Stable lowercase name, identical to the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Household => "household",
            Category::Social => "social",
            Category::Other => "other",
            Category::Uncategorized => "uncategorized",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Household => "Household",
            Category::Social => "Social",
            Category::Other => "Other",
            Category::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
                format!("unknown category '{needle}' (expected one of: {})", names.join(", "))
            })
    }
}

impl Expense {
    /// Create a new Expense
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        title: impl Into<String>,
        amount: f64,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            title: title.into(),
            amount,
            category,
        }
    }

    /// Case-insensitive substring match against the title.
    /// An empty keyword matches everything.
    pub fn title_contains(&self, keyword: &str) -> bool {
        keyword.is_empty() || self.title.to_lowercase().contains(&keyword.to_lowercase())
    }
}
