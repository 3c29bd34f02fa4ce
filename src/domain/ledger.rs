use chrono::NaiveDate;

use super::{Category, Cents, Expense, ExpenseId};

/// The in-memory ordered collection of expense records plus the next-id
/// counter. Owned exclusively by whoever handles requests; there is no
/// shared or global state.
///
/// Identifiers are assigned monotonically and never reused, so after any
/// sequence of add/update/delete operations the remaining ids are pairwise
/// distinct.
#[derive(Debug, Clone)]
pub struct Ledger {
    records: Vec<Expense>,
    next_id: ExpenseId,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger. The first assigned identifier is 1.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a ledger from persisted records, keeping file order.
    /// The next identifier is one greater than the maximum seen.
    pub fn from_records(records: Vec<Expense>) -> Self {
        let next_id = records.iter().map(|e| e.id + 1).max().unwrap_or(1);
        Self { records, next_id }
    }

    /// Append a new expense, assigning the next identifier.
    pub fn add(
        &mut self,
        category: Category,
        amount_cents: Cents,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Expense {
        let expense = Expense::new(self.next_id, category, amount_cents, date, note);
        self.next_id += 1;
        self.records.push(expense.clone());
        expense
    }

    /// Overwrite category/amount/note of the record with the given id and
    /// reset its date. Returns None if no record has that id.
    pub fn update(
        &mut self,
        id: ExpenseId,
        category: Category,
        amount_cents: Cents,
        note: impl Into<String>,
        date: NaiveDate,
    ) -> Option<&Expense> {
        let expense = self.records.iter_mut().find(|e| e.id == id)?;
        expense.category = category;
        expense.amount_cents = amount_cents;
        expense.note = note.into();
        expense.date = date;
        Some(expense)
    }

    /// Remove all records with the given id (zero or one expected).
    /// Returns true if anything was removed.
    pub fn remove(&mut self, id: ExpenseId) -> bool {
        let before = self.records.len();
        self.records.retain(|e| e.id != id);
        self.records.len() != before
    }

    /// Current records in insertion order.
    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
