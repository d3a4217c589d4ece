//! Bulk-import spreadsheet rows into SQLite
//!
//! Reads `.xlsx`/`.xls` files row by row, maps each raw row through a
//! caller-supplied transform, and inserts or updates rows in a target table.
//! Rows that fail to persist are collected and written back out as an
//! error-report workbook the caller can expose for download.
//!
//! ```rust,ignore
//! use excel_import::{ImportConfig, ReportConfig, run_import};
//!
//! let config = ImportConfig::upsert_into("contacts", "email");
//! let report = ReportConfig::new("storage/import-errors");
//! let result = run_import(&pool, "contacts.xlsx", &config, &report, |raw| {
//!     Ok(raw.clone())
//! })
//! .await?;
//! ```

pub mod excel;
pub mod pipeline;
pub mod store;
pub mod types;

pub use excel::{ReadError, ReportError, SheetRows, export_errors, read_sheet, report_url};
pub use pipeline::run_import;
pub use store::upsert_row;
pub use types::*;
