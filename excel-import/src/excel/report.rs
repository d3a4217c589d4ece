//! Write failed raw rows to an error-report workbook

use std::path::{Path, PathBuf};

use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use uuid::Uuid;

use crate::types::{CellValue, Record, ReportConfig};

/// Error producing the error-report workbook
#[derive(Debug)]
pub enum ReportError {
    /// Called with an empty failed-row set (caller contract violation)
    NoFailedRows,
    /// The report directory could not be created or written to
    DirectoryNotWritable { dir: PathBuf, message: String },
    /// The workbook itself could not be built
    Workbook { message: String },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::NoFailedRows => write!(f, "no failed rows to export"),
            ReportError::DirectoryNotWritable { dir, message } => {
                write!(
                    f,
                    "cannot write error report to {}: {}",
                    dir.display(),
                    message
                )
            }
            ReportError::Workbook { message } => {
                write!(f, "failed to build error report: {}", message)
            }
        }
    }
}

impl std::error::Error for ReportError {}

impl From<XlsxError> for ReportError {
    fn from(e: XlsxError) -> Self {
        ReportError::Workbook {
            message: e.to_string(),
        }
    }
}

/// Export failed raw rows to a new workbook under the configured directory
///
/// The header row is the ordered union of all failed rows' headers; rows
/// missing a header get a blank cell. The file name carries a per-run unique
/// token. Returns the path of the written workbook.
pub fn export_errors(failed: &[Record], config: &ReportConfig) -> Result<PathBuf, ReportError> {
    if failed.is_empty() {
        return Err(ReportError::NoFailedRows);
    }

    let headers = union_headers(failed);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("errors")?;

    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }

    for (row_idx, record) in failed.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        for (col_idx, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(header) {
                write_cell(worksheet, row, col_idx as u16, value, &datetime_format)?;
            }
        }
    }

    std::fs::create_dir_all(&config.error_dir).map_err(|e| ReportError::DirectoryNotWritable {
        dir: config.error_dir.clone(),
        message: e.to_string(),
    })?;

    let file_name = format!(
        "errors_{}_{}.xlsx",
        Utc::now().format("%Y%m%d%H%M%S"),
        &Uuid::new_v4().simple().to_string()[..8]
    );
    let path = config.error_dir.join(file_name);

    workbook
        .save(&path)
        .map_err(|e| ReportError::DirectoryNotWritable {
            dir: config.error_dir.clone(),
            message: e.to_string(),
        })?;

    Ok(path)
}

/// Build the download link for a report file from the configured URL prefix
pub fn report_url(path: &Path, config: &ReportConfig) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if config.url_prefix.is_empty() {
        file_name
    } else {
        format!("{}/{}", config.url_prefix.trim_end_matches('/'), file_name)
    }
}

/// Ordered union of all records' headers, first occurrence wins
fn union_headers(records: &[Record]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for record in records {
        for header in record.headers() {
            if !headers.iter().any(|h| h == header) {
                headers.push(header.to_string());
            }
        }
    }
    headers
}

/// Largest integer magnitude an Excel number cell (f64) stores exactly
const MAX_EXACT_CELL_INT: u64 = 1 << 53;

fn write_cell(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    datetime_format: &Format,
) -> Result<(), XlsxError> {
    match value {
        CellValue::Null => { /* leave cell empty */ }
        CellValue::String(s) => {
            ws.write_string(row, col, s)?;
        }
        CellValue::Int(i) => {
            // Past f64's exact range, keep the digits as text
            if i.unsigned_abs() <= MAX_EXACT_CELL_INT {
                ws.write_number(row, col, *i as f64)?;
            } else {
                ws.write_string(row, col, i.to_string())?;
            }
        }
        CellValue::Float(f) => {
            ws.write_number(row, col, *f)?;
        }
        CellValue::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
        CellValue::DateTime(dt) => {
            let naive = dt.naive_utc();
            ws.write_datetime_with_format(row, col, &naive, datetime_format)?;
        }
    }
    Ok(())
}
