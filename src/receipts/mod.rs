mod errors;
mod vault;

pub use errors::ReceiptError;
pub use vault::{ReceiptLocation, ReceiptVault, StoredReceipt, ALLOWED_EXTENSIONS, MAX_RECEIPT_BYTES};
