mod export;

pub use export::{Exporter, LedgerSnapshot};
