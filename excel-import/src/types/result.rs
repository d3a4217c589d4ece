//! Per-row outcomes and the terminal result of an import run

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What happened to a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOutcome {
    /// A new row was inserted
    Created,
    /// An existing row was matched and updated
    Updated,
    /// All transformed values were empty; treated as a blank sheet line
    Skipped,
    /// Transform or persistence failed; the raw row goes to the error report
    Failed,
}

/// Counts per outcome for one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ImportSummary {
    /// Tally one row outcome
    pub fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Created => self.created += 1,
            RowOutcome::Updated => self.updated += 1,
            RowOutcome::Skipped => self.skipped += 1,
            RowOutcome::Failed => self.failed += 1,
        }
    }

    /// Rows written to the store (created + updated)
    pub fn persisted(&self) -> usize {
        self.created + self.updated
    }
}

/// Terminal result of one import run
#[derive(Debug, Clone, PartialEq)]
pub enum ImportResult {
    /// Every row persisted or was a blank line
    Success { summary: ImportSummary },
    /// One or more rows failed; their raw values are in the error report
    Failure {
        summary: ImportSummary,
        /// Path of the generated error-report workbook
        report_path: PathBuf,
        /// Download link built from the configured URL prefix
        report_url: String,
    },
}

impl ImportResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportResult::Success { .. })
    }

    pub fn summary(&self) -> &ImportSummary {
        match self {
            ImportResult::Success { summary } => summary,
            ImportResult::Failure { summary, .. } => summary,
        }
    }
}
