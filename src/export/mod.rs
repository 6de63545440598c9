mod csv_export;
mod errors;
mod record;

pub use csv_export::{read_csv, to_csv_bytes, write_csv, EXPORT_HEADER};
pub use errors::ExportError;
pub use record::ExportRecord;
