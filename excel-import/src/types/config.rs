//! Caller-supplied configuration for one import run

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for a single import run, passed explicitly by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Target table to write rows into
    pub table: String,
    /// Update existing rows instead of always inserting
    pub overwrite: bool,
    /// Column used to find an existing row when `overwrite` is set
    pub match_field: Option<String>,
}

impl ImportConfig {
    /// Insert-only config for a table
    pub fn insert_into(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            overwrite: false,
            match_field: None,
        }
    }

    /// Upsert config matching existing rows on `match_field`
    pub fn upsert_into(table: impl Into<String>, match_field: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            overwrite: true,
            match_field: Some(match_field.into()),
        }
    }
}

/// Where error-report workbooks are written and how their links are exposed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory that receives generated error reports (created if absent)
    pub error_dir: PathBuf,
    /// URL prefix prepended to the report file name for download links
    pub url_prefix: String,
}

impl ReportConfig {
    /// Report config with no URL prefix (links are bare file names)
    pub fn new(error_dir: impl Into<PathBuf>) -> Self {
        Self {
            error_dir: error_dir.into(),
            url_prefix: String::new(),
        }
    }
}
