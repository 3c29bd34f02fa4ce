use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Category, Cents, Expense};

/// Fixed monthly spending limit checked by `budget_check`: 5000.00.
pub const DEFAULT_MONTHLY_BUDGET: Cents = 500_000;

/// Composite key grouping records by calendar month and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The prior calendar month. January rolls back to December of the
    /// previous year.
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Group all records by category, summing amounts.
pub fn category_totals(records: &[Expense]) -> HashMap<Category, Cents> {
    let mut totals: HashMap<Category, Cents> = HashMap::new();
    for expense in records {
        *totals.entry(expense.category).or_insert(0) += expense.amount_cents;
    }
    totals
}

/// Group all records by month+year, summing amounts.
pub fn monthly_totals(records: &[Expense]) -> HashMap<MonthKey, Cents> {
    let mut totals: HashMap<MonthKey, Cents> = HashMap::new();
    for expense in records {
        *totals.entry(MonthKey::of(expense.date)).or_insert(0) += expense.amount_cents;
    }
    totals
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increased,
    Decreased,
    Unchanged,
}

/// One month's total compared against the prior calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTrend {
    pub month: MonthKey,
    pub total: Cents,
    pub prior_total: Cents,
    pub trend: Trend,
}

/// Classify each month present in the totals against the prior calendar
/// month, in ascending month order. A month with no recorded predecessor
/// compares against zero.
pub fn month_over_month(totals: &HashMap<MonthKey, Cents>) -> Vec<MonthTrend> {
    let mut months: Vec<MonthKey> = totals.keys().copied().collect();
    months.sort();

    months
        .into_iter()
        .map(|month| {
            let total = totals[&month];
            let prior_total = totals.get(&month.prev()).copied().unwrap_or(0);
            let trend = if total > prior_total {
                Trend::Increased
            } else if total < prior_total {
                Trend::Decreased
            } else {
                Trend::Unchanged
            };
            MonthTrend {
                month,
                total,
                prior_total,
                trend,
            }
        })
        .collect()
}

/// Sum of amounts for records dated in the given month.
pub fn month_total(records: &[Expense], month: MonthKey) -> Cents {
    records
        .iter()
        .filter(|e| MonthKey::of(e.date) == month)
        .map(|e| e.amount_cents)
        .sum()
}

/// Outcome of checking the current month's spending against a fixed limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub month: MonthKey,
    pub spent: Cents,
    pub limit: Cents,
}

impl BudgetReport {
    pub fn exceeded(&self) -> bool {
        self.spent > self.limit
    }

    pub fn remaining(&self) -> Cents {
        self.limit - self.spent
    }
}

/// Sum spending for the month containing `today` and compare it against
/// the limit. `today` is injected so the wall clock stays at the caller.
pub fn budget_check(records: &[Expense], limit: Cents, today: NaiveDate) -> BudgetReport {
    let month = MonthKey::of(today);
    BudgetReport {
        month,
        spent: month_total(records, month),
        limit,
    }
}
