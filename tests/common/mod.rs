// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use chrono::NaiveDate;
use spendlog::application::LedgerService;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test service backed by a temporary data file.
pub fn test_service() -> (LedgerService, PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("expenses.csv");
    let service = LedgerService::open(&path);
    (service, path, temp_dir)
}

/// Helper to parse a date string into a NaiveDate.
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: a small standard set of expenses.
pub struct StandardExpenses;

impl StandardExpenses {
    /// Three expenses across two categories in January 2024.
    pub fn seed_basic(service: &mut LedgerService) {
        service
            .add_expense("Groceries", "100.00", "market", Some("2024-01-05"))
            .unwrap();
        service
            .add_expense("Rent", "50.00", "", Some("2024-01-10"))
            .unwrap();
        service
            .add_expense("Groceries", "25.00", "corner shop", Some("2024-01-20"))
            .unwrap();
    }
}
