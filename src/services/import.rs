//! CSV import service
//!
//! Imports transactions from the bulk interchange schema: header exactly
//! `date,type,category,description,amount` with amounts in major currency
//! units, converted ×100 into the internal minor-unit integers.
//!
//! Every row is classified into exactly one of {valid-new, duplicate,
//! invalid}. A row is a duplicate when its rendered record line is textually
//! identical to a line already in storage; only valid-new rows are persisted,
//! and all three counts are reported. A parse failure never aborts the run.

use chrono::NaiveDate;
use csv::{Reader, StringRecord};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionKind};
use crate::storage::records::{render_transaction_line, DATE_FORMAT};
use crate::storage::Storage;

/// The required interchange header
pub const EXPECTED_HEADER: [&str; 5] = ["date", "type", "category", "description", "amount"];

/// Classification of one import row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    /// New record, persisted
    ValidNew,
    /// Textually identical to an existing stored line, skipped
    Duplicate,
    /// Failed validation, skipped
    Invalid(String),
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Number of rows persisted
    pub imported: usize,
    /// Number of duplicate rows skipped
    pub duplicates: usize,
    /// Number of invalid rows skipped
    pub invalid: usize,
    /// Error detail per invalid row (1-based data row number)
    pub row_errors: Vec<(usize, String)>,
}

impl ImportSummary {
    /// Total rows examined
    pub fn total_rows(&self) -> usize {
        self.imported + self.duplicates + self.invalid
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import transactions from a CSV reader
    ///
    /// Classifies every row independently; only valid-new rows are appended
    /// to storage.
    pub fn import_csv<R: std::io::Read>(&self, reader: R) -> LedgerResult<ImportSummary> {
        let mut csv_reader = Reader::from_reader(reader);

        // An unreadable header surfaces as LedgerError::Import via From
        let headers = csv_reader.headers()?;
        validate_header(headers)?;

        // Duplicate detection runs against the pre-import snapshot, matching
        // the stored lines textually.
        let existing: std::collections::HashSet<String> =
            self.storage.transactions.raw_lines()?.into_iter().collect();

        let mut summary = ImportSummary::default();

        for (idx, record) in csv_reader.records().enumerate() {
            let row_number = idx + 1;
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    summary.invalid += 1;
                    summary
                        .row_errors
                        .push((row_number, format!("unreadable row: {}", e)));
                    continue;
                }
            };

            match parse_row(&record) {
                Ok(txn) => {
                    let line = render_transaction_line(&txn);
                    if existing.contains(&line) {
                        summary.duplicates += 1;
                    } else {
                        self.storage.transactions.append_raw(&line)?;
                        summary.imported += 1;
                    }
                }
                Err(reason) => {
                    summary.invalid += 1;
                    summary.row_errors.push((row_number, reason));
                }
            }
        }

        Ok(summary)
    }
}

/// Check the interchange header field-for-field
fn validate_header(headers: &StringRecord) -> LedgerResult<()> {
    let found: Vec<&str> = headers.iter().map(|h| h.trim()).collect();
    if found != EXPECTED_HEADER {
        return Err(LedgerError::Import(format!(
            "Invalid CSV header {:?}, expected {:?}",
            found, EXPECTED_HEADER
        )));
    }
    Ok(())
}

/// Parse and validate one data row into a transaction
fn parse_row(record: &StringRecord) -> Result<Transaction, String> {
    if record.len() != 5 {
        return Err(format!("expected 5 fields, found {}", record.len()));
    }

    let date_str = record.get(0).unwrap_or("").trim();
    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|_| format!("invalid date '{}'", date_str))?;

    let kind_str = record.get(1).unwrap_or("").trim().to_lowercase();
    let kind = TransactionKind::parse(&kind_str)
        .ok_or_else(|| format!("invalid type '{}'", kind_str))?;

    let category = record.get(2).unwrap_or("").trim().to_string();
    if category.is_empty() {
        return Err("category must not be empty".into());
    }
    let description = record.get(3).unwrap_or("").trim().to_string();

    // The stored record format has no escaping; fields that would corrupt
    // the line are invalid rather than silently mangled.
    for (field, value) in [("category", &category), ("description", &description)] {
        if value.contains(',') || value.contains('\n') || value.contains('\r') {
            return Err(format!("{} must not contain commas or line breaks", field));
        }
    }

    // Boundary conversion: major units × 100
    let amount_str = record.get(4).unwrap_or("").trim();
    let amount =
        Money::parse_major(amount_str).map_err(|_| format!("invalid amount '{}'", amount_str))?;
    if !amount.is_positive() {
        return Err(format!("amount must be positive, got '{}'", amount_str));
    }

    Ok(Transaction::new(date, kind, category, description, amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerPaths;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> Storage {
        Storage::new(LedgerPaths::with_base_dir(dir.path().to_path_buf()))
    }

    const CSV: &str = "\
date,type,category,description,amount
2024-05-01,expense,Food,Lunch,500.00
2024-05-02,income,Salary,Pay,2000.00
not-a-date,expense,Food,Bad,1.00
2024-05-03,expense,,Missing category,1.00
";

    #[test]
    fn test_import_classifies_rows() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        let summary = ImportService::new(&storage)
            .import_csv(CSV.as_bytes())
            .unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.duplicates, 0);
        assert_eq!(summary.invalid, 2);
        assert_eq!(summary.total_rows(), 4);
        assert_eq!(summary.row_errors.len(), 2);

        // Amounts are converted into minor units
        let loaded = storage.transactions.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].amount.minor(), 50000);
        assert_eq!(loaded[1].amount.minor(), 200000);
    }

    #[test]
    fn test_import_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        let service = ImportService::new(&storage);

        let first = service.import_csv(CSV.as_bytes()).unwrap();
        assert_eq!(first.imported, 2);

        let second = service.import_csv(CSV.as_bytes()).unwrap();
        assert_eq!(second.imported, 0);
        assert_eq!(second.duplicates, 2);
        assert_eq!(second.invalid, 2);

        // Record count unchanged by the second pass
        assert_eq!(storage.transactions.load().unwrap().len(), 2);
    }

    #[test]
    fn test_import_rejects_malformed_amounts() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        // A sign embedded in the fraction must classify as invalid, not
        // persist as a mangled amount
        let csv = "date,type,category,description,amount\n\
                   2024-05-01,expense,Food,Lunch,10.-5\n\
                   2024-05-01,expense,Food,Lunch,9223372036854775807\n";
        let summary = ImportService::new(&storage)
            .import_csv(csv.as_bytes())
            .unwrap();

        assert_eq!(summary.imported, 0);
        assert_eq!(summary.invalid, 2);
        assert!(storage.transactions.load().unwrap().is_empty());
    }

    #[test]
    fn test_import_rejects_wrong_header() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        let bad = "when,type,category,description,amount\n2024-05-01,expense,Food,Lunch,5.00\n";
        let err = ImportService::new(&storage)
            .import_csv(bad.as_bytes())
            .unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
    }

    #[test]
    fn test_unreadable_header_maps_to_import_error() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        // Invalid UTF-8 in the header position
        let bytes: &[u8] = &[0xff, 0xfe, b'a', b'\n'];
        let err = ImportService::new(&storage).import_csv(bytes).unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
    }

    #[test]
    fn test_import_rejects_embedded_comma_via_quoting() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        // Quoted CSV field carries a comma the stored format cannot hold
        let csv = "date,type,category,description,amount\n2024-05-01,expense,Food,\"Lunch, downtown\",5.00\n";
        let summary = ImportService::new(&storage)
            .import_csv(csv.as_bytes())
            .unwrap();

        assert_eq!(summary.imported, 0);
        assert_eq!(summary.invalid, 1);
    }
}
