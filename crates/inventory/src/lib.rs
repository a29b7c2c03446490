mod command;
mod ledger;
mod query;

pub use command::*;
pub use ledger::{Change, LedgerEntry};
pub use query::*;
