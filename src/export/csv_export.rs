use std::io::{Read, Write};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use tracing::debug;

use crate::export::{ExportError, ExportRecord};
use crate::models::Transaction;

pub const EXPORT_HEADER: [&str; 9] = [
    "ID",
    "OwnerID",
    "Amount",
    "Type",
    "Category",
    "Description",
    "TransactionDate",
    "CreatedAt",
    "ReceiptPath"
];

/// Writes the header and one row per transaction, preserving the input order.
///
/// The header is written even when there are no transactions. Fields holding a comma, a quote or
/// a line break are quoted by the CSV writer.
pub fn write_csv<W: Write>(output: W, transactions: &[Transaction]) -> Result<(), ExportError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(EXPORT_HEADER)?;

    for transaction in transactions {
        writer.serialize(ExportRecord::from(transaction))?;
    }

    writer.flush()?;

    debug!("Exported [{}] transactions", transactions.len());

    Ok(())
}

pub fn to_csv_bytes(transactions: &[Transaction]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, transactions)?;

    Ok(buffer)
}

/// Parses a document produced by [`write_csv`] back into rows, in file order.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<ExportRecord>, ExportError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_reader(input);

    let headers = reader.headers()?.clone();

    if headers.iter().ne(EXPORT_HEADER) {
        return Err(ExportError::UnexpectedHeader(headers.iter().collect::<Vec<_>>().join(",")))
    }

    let mut records = Vec::new();

    for result in reader.deserialize::<ExportRecord>() {
        records.push(result?);
    }

    Ok(records)
}
