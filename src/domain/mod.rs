mod expense;
mod ledger;
mod money;
mod reports;

pub use expense::*;
pub use ledger::*;
pub use money::*;
pub use reports::*;
