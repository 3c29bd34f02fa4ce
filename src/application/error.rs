use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
