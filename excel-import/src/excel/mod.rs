//! Spreadsheet reading and error-report writing

pub mod reader;
pub mod report;

pub use reader::{ReadError, SheetRows, read_sheet};
pub use report::{ReportError, export_errors, report_url};
