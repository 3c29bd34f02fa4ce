use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Cents;

/// Expense identifiers are small positive integers assigned monotonically
/// by the ledger. They are never reused, even after deletion.
pub type ExpenseId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Groceries,
    Transport,
    Entertainment,
    Food,
    Utilities,
    Shopping,
    Healthcare,
    Rent,
    Savings,
    Subscriptions,
    Miscellaneous,
    Other,
}

impl Category {
    /// All valid categories, in display order.
    pub const ALL: [Category; 12] = [
        Category::Groceries,
        Category::Transport,
        Category::Entertainment,
        Category::Food,
        Category::Utilities,
        Category::Shopping,
        Category::Healthcare,
        Category::Rent,
        Category::Savings,
        Category::Subscriptions,
        Category::Miscellaneous,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Food => "Food",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Rent => "Rent",
            Category::Savings => "Savings",
            Category::Subscriptions => "Subscriptions",
            Category::Miscellaneous => "Miscellaneous",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groceries" => Ok(Category::Groceries),
            "transport" => Ok(Category::Transport),
            "entertainment" => Ok(Category::Entertainment),
            "food" => Ok(Category::Food),
            "utilities" => Ok(Category::Utilities),
            "shopping" => Ok(Category::Shopping),
            "healthcare" => Ok(Category::Healthcare),
            "rent" => Ok(Category::Rent),
            "savings" => Ok(Category::Savings),
            "subscriptions" => Ok(Category::Subscriptions),
            "miscellaneous" => Ok(Category::Miscellaneous),
            "other" => Ok(Category::Other),
            _ => Err(ParseCategoryError),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError;

impl std::fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown category")
    }
}

impl std::error::Error for ParseCategoryError {}

/// One expense entry in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub category: Category,
    pub amount_cents: Cents,
    pub date: NaiveDate,
    pub note: String,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        category: Category,
        amount_cents: Cents,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category,
            amount_cents,
            date,
            note: note.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for cat in Category::ALL {
            let s = cat.as_str();
            let parsed: Category = s.parse().unwrap();
            assert_eq!(cat, parsed);
        }
    }

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!("groceries".parse::<Category>(), Ok(Category::Groceries));
        assert_eq!("RENT".parse::<Category>(), Ok(Category::Rent));
        assert_eq!(" Food ".parse::<Category>(), Ok(Category::Food));
    }

    #[test]
    fn test_category_parse_unknown() {
        assert!("gadgets".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }
}
