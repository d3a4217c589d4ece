//! Read spreadsheet rows as header-keyed records

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};

use crate::types::{CellValue, Record};

/// Error opening or parsing a spreadsheet file
#[derive(Debug)]
pub enum ReadError {
    /// The file does not exist
    NotFound { path: PathBuf },
    /// The workbook parsed but contains no sheets
    NoSheets { path: PathBuf },
    /// The file could not be parsed as tabular data
    Malformed { path: PathBuf, message: String },
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::NotFound { path } => {
                write!(f, "file not found: {}", path.display())
            }
            ReadError::NoSheets { path } => {
                write!(f, "spreadsheet has no sheets: {}", path.display())
            }
            ReadError::Malformed { path, message } => {
                write!(
                    f,
                    "not a readable spreadsheet: {}: {}",
                    path.display(),
                    message
                )
            }
        }
    }
}

impl std::error::Error for ReadError {}

/// Rows of one sheet, yielded lazily in file order
///
/// Each row is zipped positionally against the header row: short rows are
/// padded with empty values, cells beyond the header width are dropped.
pub struct SheetRows {
    headers: Vec<String>,
    rows: std::vec::IntoIter<Vec<Data>>,
}

impl SheetRows {
    /// Header row of the sheet, trimmed, in column order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for SheetRows {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let row = self.rows.next()?;
        let columns = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = row.get(i).map(cell_value).unwrap_or(CellValue::Null);
                (header.clone(), value)
            })
            .collect();
        Some(Record::from_pairs(columns))
    }
}

/// Read the first sheet of an `.xlsx` or legacy `.xls` file
///
/// Row 1 is the header row; data rows follow up to the last non-empty row.
pub fn read_sheet(path: impl AsRef<Path>) -> Result<SheetRows, ReadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| ReadError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ReadError::NoSheets {
            path: path.to_path_buf(),
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ReadError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows().map(|r| r.to_vec()).collect::<Vec<_>>();
    if rows.is_empty() {
        return Ok(SheetRows {
            headers: Vec::new(),
            rows: Vec::new().into_iter(),
        });
    }

    let headers: Vec<String> = rows
        .remove(0)
        .iter()
        .map(|cell| cell_value(cell).to_cell_string().trim().to_string())
        .collect();

    Ok(SheetRows {
        headers,
        rows: rows.into_iter(),
    })
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::DateTime(naive.and_utc()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match chrono::DateTime::parse_from_rfc3339(s) {
            Ok(dt) => CellValue::DateTime(dt.with_timezone(&chrono::Utc)),
            Err(_) => CellValue::String(s.clone()),
        },
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(_) => CellValue::Null,
    }
}
