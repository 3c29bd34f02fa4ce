use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::Expense;
use crate::storage::write_expense;

/// Full-ledger snapshot for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub expenses: Vec<Expense>,
}

/// Exporter for converting ledger data to external formats.
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export expenses as headered CSV. Output depends only on the ledger
    /// contents, so exporting twice without a mutation in between yields
    /// byte-identical results.
    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let expenses = self.service.list_expenses();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "category", "amount", "date", "note"])?;

        let mut count = 0;
        for expense in expenses {
            write_expense(&mut csv_writer, expense)?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full ledger as a versioned JSON snapshot.
    pub fn export_snapshot_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            expenses: self.service.list_expenses().to_vec(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded_service() -> (LedgerService, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut service = LedgerService::open(dir.path().join("expenses.csv"));
        service.add_expense("Groceries", "35.00", "market", None).unwrap();
        service.add_expense("Rent", "800", "", None).unwrap();
        (service, dir)
    }

    #[test]
    fn test_csv_export_has_header_and_rows() {
        let (service, _dir) = seeded_service();
        let mut buf = Vec::new();
        let count = Exporter::new(&service).export_expenses_csv(&mut buf).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,category,amount,date,note"));
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn test_csv_export_is_idempotent() {
        let (service, _dir) = seeded_service();
        let exporter = Exporter::new(&service);

        let mut first = Vec::new();
        exporter.export_expenses_csv(&mut first).unwrap();
        let mut second = Vec::new();
        exporter.export_expenses_csv(&mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_snapshot_roundtrips() {
        let (service, _dir) = seeded_service();
        let mut buf = Vec::new();
        let snapshot = Exporter::new(&service).export_snapshot_json(&mut buf).unwrap();

        let parsed: LedgerSnapshot = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.expenses, snapshot.expenses);
        assert_eq!(parsed.version, env!("CARGO_PKG_VERSION"));
    }
}
