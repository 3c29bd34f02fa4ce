mod error;
mod reporting;
mod service;

pub use error::AppError;
pub use reporting::*;
pub use service::LedgerService;
