//! Ledger transaction and category label types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A classification label.
///
/// Keyword rules produce one of the built-in labels below; a learned model may
/// produce any label it was trained on, so this stays an open string type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub const FOOD: &'static str = "Food";
    pub const TRAVEL: &'static str = "Travel";
    pub const SHOPPING: &'static str = "Shopping";
    pub const BILLS: &'static str = "Bills";
    pub const SUBSCRIPTIONS: &'static str = "Subscriptions";
    pub const GROCERIES: &'static str = "Groceries";
    pub const INCOME: &'static str = "Income";
    pub const OTHERS: &'static str = "Others";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The universal fallback label
    pub fn others() -> Self {
        Self::new(Self::OTHERS)
    }

    pub fn income() -> Self {
        Self::new(Self::INCOME)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_others(&self) -> bool {
        self.0 == Self::OTHERS
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// One ledger row after normalization and categorization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Date text as it appeared in the input, if the ledger had a date column
    pub date: Option<String>,
    /// Free-text description
    pub description: String,
    /// Positive = income, negative = expense; always finite
    pub amount: f64,
    /// Assigned label
    pub category: Category,
}

impl Transaction {
    pub fn new(
        date: Option<String>,
        description: impl Into<String>,
        amount: f64,
        category: Category,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category,
        }
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}
