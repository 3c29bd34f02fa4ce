mod common;

use std::collections::HashSet;

use common::{test_service, StandardExpenses};
use spendlog::application::{AppError, LedgerService};
use spendlog::domain::{Category, ExpenseId};
use spendlog::io::Exporter;

#[test]
fn test_add_persists_and_reloads_in_order() {
    let (mut service, path, _temp) = test_service();
    StandardExpenses::seed_basic(&mut service);

    let before = service.list_expenses().to_vec();
    drop(service);

    let reloaded = LedgerService::open(&path);
    assert_eq!(reloaded.list_expenses(), before.as_slice());
}

#[test]
fn test_ids_unique_and_never_reused_across_reload() {
    let (mut service, path, _temp) = test_service();
    StandardExpenses::seed_basic(&mut service);

    assert!(service.delete_expense(2).unwrap());
    drop(service);

    // After reload the counter resumes past the highest id ever assigned.
    let mut service = LedgerService::open(&path);
    let added = service
        .add_expense("Other", "1.00", "", Some("2024-02-01"))
        .unwrap();
    assert_eq!(added.id, 4);

    let ids: HashSet<ExpenseId> = service.list_expenses().iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), service.list_expenses().len());
}

#[test]
fn test_update_overwrites_fields_and_resets_date() {
    let (mut service, _path, _temp) = test_service();
    StandardExpenses::seed_basic(&mut service);

    let today = chrono::Local::now().date_naive();
    let updated = service
        .update_expense(1, "Healthcare", "42.00", "pharmacy")
        .unwrap()
        .unwrap();

    assert_eq!(updated.category, Category::Healthcare);
    assert_eq!(updated.amount_cents, 4200);
    assert_eq!(updated.note, "pharmacy");
    assert_eq!(updated.date, today);
}

#[test]
fn test_update_nonexistent_id_reports_not_found() {
    let (mut service, _path, _temp) = test_service();
    StandardExpenses::seed_basic(&mut service);
    let before = service.list_expenses().to_vec();

    let outcome = service.update_expense(99, "Food", "1.00", "").unwrap();
    assert!(outcome.is_none());
    assert_eq!(service.list_expenses(), before.as_slice());
}

#[test]
fn test_delete_nonexistent_id_leaves_sequence_unchanged() {
    let (mut service, _path, _temp) = test_service();
    StandardExpenses::seed_basic(&mut service);
    let before = service.list_expenses().to_vec();

    let removed = service.delete_expense(99).unwrap();
    assert!(!removed);
    assert_eq!(service.list_expenses(), before.as_slice());
}

#[test]
fn test_note_with_commas_roundtrips_through_storage() {
    let (mut service, path, _temp) = test_service();
    service
        .add_expense(
            "Food",
            "18.75",
            "dinner, drinks, and a tip",
            Some("2024-03-09"),
        )
        .unwrap();

    let reloaded = LedgerService::open(&path);
    assert_eq!(reloaded.list_expenses().len(), 1);
    assert_eq!(reloaded.list_expenses()[0].note, "dinner, drinks, and a tip");
}

#[test]
fn test_export_is_idempotent() {
    let (mut service, _path, _temp) = test_service();
    StandardExpenses::seed_basic(&mut service);

    let exporter = Exporter::new(&service);
    let mut first = Vec::new();
    exporter.export_expenses_csv(&mut first).unwrap();
    let mut second = Vec::new();
    exporter.export_expenses_csv(&mut second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_data_file_rewritten_on_every_mutation() {
    let (mut service, path, _temp) = test_service();
    service
        .add_expense("Rent", "800", "", Some("2024-01-01"))
        .unwrap();
    let after_add = std::fs::read_to_string(&path).unwrap();
    assert_eq!(after_add.lines().count(), 1);

    service.delete_expense(1).unwrap();
    let after_delete = std::fs::read_to_string(&path).unwrap();
    assert!(after_delete.is_empty());
}

#[test]
fn test_invalid_input_applies_no_partial_mutation() {
    let (mut service, path, _temp) = test_service();
    StandardExpenses::seed_basic(&mut service);
    let before = std::fs::read_to_string(&path).unwrap();

    let err = service.add_expense("NotACategory", "10.00", "", None).unwrap_err();
    assert!(matches!(err, AppError::InvalidCategory(_)));

    let err = service.add_expense("Food", "ten", "", None).unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    assert_eq!(service.list_expenses().len(), 3);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_missing_file_starts_fresh_with_id_one() {
    let (mut service, _path, _temp) = test_service();
    assert!(service.list_expenses().is_empty());

    let added = service
        .add_expense("Groceries", "5.00", "", Some("2024-01-01"))
        .unwrap();
    assert_eq!(added.id, 1);
}
