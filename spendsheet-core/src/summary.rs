//! Per-category expense totals and overall income/expense figures.

use crate::transaction::{Category, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Total spent in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    /// Sum of absolute expense amounts
    pub total: f64,
}

/// Aggregated view of a ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// One entry per category seen among expenses, in first-seen order
    pub categories: Vec<CategoryTotal>,
    pub total_income: f64,
    pub total_expense: f64,
}

impl Summary {
    pub fn net_balance(&self) -> f64 {
        self.total_income - self.total_expense
    }

    /// True when no expense rows contributed to the breakdown
    pub fn has_no_expenses(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn total_for(&self, category: &str) -> Option<f64> {
        self.categories
            .iter()
            .find(|c| c.category.as_str() == category)
            .map(|c| c.total)
    }
}

/// Aggregate categorized transactions.
///
/// Zero-amount rows count as neither income nor expense.
pub fn aggregate(txns: &[Transaction]) -> Summary {
    let mut summary = Summary::default();
    let mut index: HashMap<&Category, usize> = HashMap::new();

    for txn in txns {
        if txn.is_income() {
            summary.total_income += txn.amount;
        } else if txn.is_expense() {
            let abs = txn.abs_amount();
            summary.total_expense += abs;
            match index.get(&txn.category) {
                Some(&i) => summary.categories[i].total += abs,
                None => {
                    index.insert(&txn.category, summary.categories.len());
                    summary.categories.push(CategoryTotal {
                        category: txn.category.clone(),
                        total: abs,
                    });
                }
            }
        }
    }

    summary
}
