//! JSON export
//!
//! Two machine-readable surfaces: the raw transaction list and the composed
//! monthly report, both with amounts in major units and months as "YYYY-MM"
//! strings.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{money, Money, Transaction, TransactionKind};
use crate::reports::MonthlyReport;
use crate::storage::Storage;

/// One transaction in the JSON export schema
#[derive(Debug, Clone, Serialize)]
pub struct JsonTransaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    #[serde(serialize_with = "money::serialize_major")]
    pub amount: Money,
}

impl From<&Transaction> for JsonTransaction {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.date,
            kind: txn.kind,
            category: txn.category.clone(),
            description: txn.description.clone(),
            amount: txn.amount,
        }
    }
}

/// Export all transactions as a JSON array
pub fn export_transactions_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let transactions = storage.transactions.load()?;
    let rows: Vec<JsonTransaction> = transactions.iter().map(JsonTransaction::from).collect();

    write_json(writer, &rows, pretty)
}

/// Export a composed monthly report as JSON
pub fn export_report_json<W: Write>(
    report: &MonthlyReport,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    write_json(writer, report, pretty)
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T, pretty: bool) -> LedgerResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, value)
    } else {
        serde_json::to_writer(writer, value)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}
