use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::domain::{
    budget_check, category_totals, month_over_month, monthly_totals, parse_cents, Category, Cents,
    Expense, ExpenseId, Ledger, DEFAULT_MONTHLY_BUDGET,
};
use crate::storage::Repository;

use super::{AppError, BudgetStatus, CategoryReport, CategorySummary, MonthlyReport};

/// Application service providing the operations any front end calls:
/// add, update, delete, list, category report, monthly report, budget
/// check, export. Owns the ledger and its backing file; every mutation
/// rewrites the file in full.
pub struct LedgerService {
    repo: Repository,
    ledger: Ledger,
}

impl LedgerService {
    /// Open the ledger at the given path. A missing or corrupt data file
    /// is recoverable: the ledger starts empty with the id counter at 1.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let repo = Repository::new(path);
        let ledger = match repo.load() {
            Ok(records) => Ledger::from_records(records),
            Err(_) => Ledger::new(),
        };
        Self { repo, ledger }
    }

    pub fn data_path(&self) -> &Path {
        self.repo.path()
    }

    // ========================
    // Mutations
    // ========================

    /// Record a new expense. `date` is an optional `YYYY-MM-DD` string and
    /// defaults to today when the front end supplies none. Validation
    /// failures leave the ledger untouched.
    pub fn add_expense(
        &mut self,
        category: &str,
        amount: &str,
        note: &str,
        date: Option<&str>,
    ) -> Result<Expense, AppError> {
        let category = parse_category(category)?;
        let amount_cents = parse_amount(amount)?;
        let date = match date {
            Some(input) => parse_date(input)?,
            None => today(),
        };

        let expense = self.ledger.add(category, amount_cents, date, note);
        self.persist()?;
        Ok(expense)
    }

    /// Overwrite category/amount/note of an existing expense and reset its
    /// date to today. Returns Ok(None) when no record has the id; that is
    /// a "not found" outcome, not an error, and nothing is persisted.
    pub fn update_expense(
        &mut self,
        id: ExpenseId,
        category: &str,
        amount: &str,
        note: &str,
    ) -> Result<Option<Expense>, AppError> {
        let category = parse_category(category)?;
        let amount_cents = parse_amount(amount)?;

        let Some(expense) = self
            .ledger
            .update(id, category, amount_cents, note, today())
            .cloned()
        else {
            return Ok(None);
        };

        self.persist()?;
        Ok(Some(expense))
    }

    /// Remove the expense with the given id. Persists unconditionally and
    /// returns whether anything was removed.
    pub fn delete_expense(&mut self, id: ExpenseId) -> Result<bool, AppError> {
        let removed = self.ledger.remove(id);
        self.persist()?;
        Ok(removed)
    }

    // ========================
    // Queries
    // ========================

    /// All expenses in insertion order.
    pub fn list_expenses(&self) -> &[Expense] {
        self.ledger.records()
    }

    /// Per-category totals, largest first.
    pub fn category_report(&self) -> CategoryReport {
        let records = self.ledger.records();
        let totals = category_totals(records);
        let total: Cents = totals.values().sum();

        let mut categories: Vec<CategorySummary> = totals
            .into_iter()
            .map(|(category, cat_total)| {
                let count = records.iter().filter(|e| e.category == category).count() as i64;
                let percentage = if total > 0 {
                    cat_total as f64 / total as f64 * 100.0
                } else {
                    0.0
                };
                CategorySummary {
                    category,
                    total: cat_total,
                    count,
                    percentage,
                }
            })
            .collect();
        categories.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then(a.category.as_str().cmp(b.category.as_str()))
        });

        CategoryReport { categories, total }
    }

    /// Per-month totals with month-over-month classification.
    pub fn monthly_report(&self) -> MonthlyReport {
        let totals = monthly_totals(self.ledger.records());
        MonthlyReport {
            months: month_over_month(&totals),
        }
    }

    /// Current-month spending against the fixed monthly budget.
    pub fn budget_status(&self) -> BudgetStatus {
        budget_check(self.ledger.records(), DEFAULT_MONTHLY_BUDGET, today()).into()
    }

    fn persist(&self) -> Result<(), AppError> {
        // Write failure is reported to the caller; the in-memory effect of
        // the operation is deliberately not rolled back.
        self.repo.save(self.ledger.records())?;
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_category(input: &str) -> Result<Category, AppError> {
    input
        .parse()
        .map_err(|_| AppError::InvalidCategory(input.to_string()))
}

fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(input.to_string()))
}

fn parse_amount(input: &str) -> Result<Cents, AppError> {
    let cents = parse_cents(input).map_err(|_| AppError::InvalidAmount(input.to_string()))?;
    if cents < 0 {
        return Err(AppError::InvalidAmount(format!(
            "{} (amount must be non-negative)",
            input
        )));
    }
    Ok(cents)
}
