mod repository;

pub use repository::{write_expense, Repository};

/// Default data file, resolved relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "expenses.csv";
