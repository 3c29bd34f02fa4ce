use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::domain::{format_cents, parse_cents, Category, Expense, ExpenseId};

/// Repository persisting the whole ledger to a flat CSV file.
///
/// One record per line, five fields, no header:
/// `id,category,amount,date,note` with the date in `YYYY-MM-DD` form.
/// Notes are quoted per RFC 4180 when they contain the delimiter, so a
/// comma in free text survives a round trip. Every save rewrites the file
/// from scratch; there is no incremental append.
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all records in file order. A missing file is not an error:
    /// it yields an empty ledger.
    pub fn load(&self) -> Result<Vec<Expense>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(file);

        let mut expenses = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record =
                record.with_context(|| format!("Failed to read record on line {}", line + 1))?;
            let expense = parse_record(&record)
                .with_context(|| format!("Malformed expense record on line {}", line + 1))?;
            expenses.push(expense);
        }
        Ok(expenses)
    }

    /// Rewrite the file from scratch, one line per record in the given
    /// order. In-memory state is the caller's concern and is never rolled
    /// back on failure here.
    pub fn save(&self, expenses: &[Expense]) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        for expense in expenses {
            write_expense(&mut writer, expense)?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        Ok(())
    }
}

/// Write one expense as a 5-field CSV record.
pub fn write_expense<W: Write>(writer: &mut csv::Writer<W>, expense: &Expense) -> Result<()> {
    writer
        .write_record([
            expense.id.to_string().as_str(),
            expense.category.as_str(),
            &format_cents(expense.amount_cents),
            &expense.date.format("%Y-%m-%d").to_string(),
            &expense.note,
        ])
        .context("Failed to write expense record")?;
    Ok(())
}

fn parse_record(record: &StringRecord) -> Result<Expense> {
    if record.len() != 5 {
        anyhow::bail!("expected 5 fields, got {}", record.len());
    }

    let id: ExpenseId = record[0]
        .trim()
        .parse()
        .with_context(|| format!("invalid id '{}'", &record[0]))?;
    let category: Category = record[1]
        .parse()
        .with_context(|| format!("invalid category '{}'", &record[1]))?;
    let amount_cents = parse_cents(&record[2])
        .with_context(|| format!("invalid amount '{}'", &record[2]))?;
    if amount_cents < 0 {
        anyhow::bail!("negative amount '{}'", &record[2]);
    }
    let date = NaiveDate::parse_from_str(record[3].trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}'", &record[3]))?;

    Ok(Expense::new(id, category, amount_cents, date, &record[4]))
}
