//! Derived summary figures computed from fetched transactions.
//!
//! Summaries are recomputed on demand and never persisted or cached.

use serde::{Deserialize, Serialize};

/// Aggregate income, expense and balance figures for a set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// The sum of all income amounts, in minor currency units.
    pub total_income: u64,
    /// The sum of all expense amounts, in minor currency units.
    pub total_expenses: u64,
    /// `total_income - total_expenses`. Negative when spending exceeds income.
    pub balance: i64,
    /// How many transactions were included.
    pub count: usize,
}

/// The share of one category within a summary of a single transaction kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category label.
    pub category: String,
    /// The summed amount for this category, in minor currency units.
    pub amount: u64,
    /// How many transactions fell into this category.
    pub count: usize,
    /// This category's share of the summed total, in percent. Zero when the
    /// total is zero.
    pub percentage: f64,
}
