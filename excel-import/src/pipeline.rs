//! Sequential import pipeline: read, transform, upsert, report failures

use std::path::Path;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::excel::{export_errors, read_sheet, report_url};
use crate::store::upsert_row;
use crate::types::{ImportConfig, ImportResult, ImportSummary, Record, ReportConfig, RowOutcome};

/// Run one import: read every row, transform it, persist it, and report
/// rows that failed
///
/// `transform` maps a raw row to the field set stored in `config.table`;
/// supply one per import type. Rows are processed strictly in file order, one
/// at a time, so when the same match-key value appears twice the last row
/// wins. A failing row never aborts the batch: its raw (pre-transform) values
/// are collected and written to an error-report workbook under
/// `report.error_dir`, and the result carries the report's path and download
/// link.
///
/// Reader errors abort the run with no partial import. A failure writing the
/// error report is returned as an error even though the import itself already
/// completed; the rows that persisted stay persisted.
pub async fn run_import<F>(
    pool: &SqlitePool,
    path: impl AsRef<Path>,
    config: &ImportConfig,
    report: &ReportConfig,
    transform: F,
) -> Result<ImportResult>
where
    F: Fn(&Record) -> Result<Record>,
{
    let path = path.as_ref();
    let rows = read_sheet(path)?;

    let mut summary = ImportSummary::default();
    let mut failed: Vec<Record> = Vec::new();

    for (row_idx, raw) in rows.enumerate() {
        // Sheet line number: 1-based, after the header row
        let line = row_idx + 2;
        let outcome = match transform(&raw) {
            Ok(transformed) => match upsert_row(pool, config, &transformed).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::warn!("Row {}: failed to persist: {:#}", line, e);
                    RowOutcome::Failed
                }
            },
            Err(e) => {
                log::warn!("Row {}: transform failed: {:#}", line, e);
                RowOutcome::Failed
            }
        };
        summary.record(outcome);
        if outcome == RowOutcome::Failed {
            failed.push(raw);
        }
    }

    log::info!(
        "Import of {} into {}: {} created, {} updated, {} skipped, {} failed",
        path.display(),
        config.table,
        summary.created,
        summary.updated,
        summary.skipped,
        summary.failed
    );

    if failed.is_empty() {
        return Ok(ImportResult::Success { summary });
    }

    let report_path = export_errors(&failed, report).with_context(|| {
        format!(
            "Import finished with {} failed rows but the error report could not be written",
            failed.len()
        )
    })?;
    let report_url = report_url(&report_path, report);

    Ok(ImportResult::Failure {
        summary,
        report_path,
        report_url,
    })
}
