//! Import, export, and validation CLI commands

use std::fs::File;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_transactions_csv, export_transactions_json};
use crate::services::ImportService;
use crate::storage::{validate_storage, Storage};

/// Output format for the transaction export
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Import transactions from an interchange CSV file
pub fn handle_import(storage: &Storage, file: PathBuf) -> LedgerResult<()> {
    let reader = File::open(&file)
        .map_err(|e| LedgerError::Import(format!("Failed to open {}: {}", file.display(), e)))?;

    let summary = ImportService::new(storage).import_csv(reader)?;

    println!(
        "Import finished: {} imported, {} duplicates, {} invalid ({} rows)",
        summary.imported,
        summary.duplicates,
        summary.invalid,
        summary.total_rows(),
    );
    for (row, reason) in &summary.row_errors {
        println!("  row {}: {}", row, reason);
    }
    Ok(())
}

/// Export all transactions to a file or stdout
pub fn handle_export(
    storage: &Storage,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    match output {
        Some(path) => {
            let mut file = File::create(&path).map_err(|e| {
                LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            write_export(storage, format, &mut file)?;
            println!("Exported transactions to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_export(storage, format, &mut stdout)?;
        }
    }
    Ok(())
}

fn write_export<W: std::io::Write>(
    storage: &Storage,
    format: ExportFormat,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        ExportFormat::Csv => export_transactions_csv(storage, writer),
        ExportFormat::Json => export_transactions_json(storage, writer, true),
    }
}

/// Run a strict validation pass and print every defect with its line number
pub fn handle_validate(storage: &Storage) -> LedgerResult<()> {
    let report = validate_storage(storage)?;

    if report.is_clean() {
        println!("All record files are clean.");
        return Ok(());
    }

    for file in &report.files {
        if file.issues.is_empty() {
            continue;
        }
        println!("{}:", file.file);
        for issue in &file.issues {
            println!("  line {}: {}", issue.line_number, issue.defect);
        }
    }
    println!("{} issue(s) found.", report.issue_count());
    Ok(())
}
