mod errors;
mod ledger_service;

pub use errors::{ErrorKind, LedgerError};
pub use ledger_service::LedgerService;
