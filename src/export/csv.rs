//! CSV export
//!
//! Writes transactions in the bulk interchange schema: the same header the
//! importer requires and amounts converted back to major units, so an export
//! can be re-imported verbatim.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;
use crate::storage::Storage;

/// Export all transactions to interchange CSV
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: &mut W) -> LedgerResult<()> {
    let transactions = storage.transactions.load()?;
    write_transactions_csv(&transactions, writer)
}

/// Write a transaction slice as interchange CSV
pub fn write_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
) -> LedgerResult<()> {
    writeln!(writer, "date,type,category,description,amount")
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    for txn in transactions {
        writeln!(
            writer,
            "{},{},{},{},{:.2}",
            txn.date.format("%Y-%m-%d"),
            txn.kind,
            escape_csv(&txn.category),
            escape_csv(&txn.description),
            txn.amount.to_major()
        )
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Quote a field when it would break the CSV row
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
