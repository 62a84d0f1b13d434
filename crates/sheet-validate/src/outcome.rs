//! Validation results.

use std::collections::BTreeSet;

use serde::Serialize;

use sheet_model::{RowIssue, TransformedRecord};

/// Knobs for [`crate::validate_and_transform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidateOptions {
    /// File row number of the first data row (row 1 holds the headers).
    pub first_data_row: usize,
    /// Drop all-empty rows without an issue instead of reporting `EmptyRow`.
    /// Row numbers still count them.
    pub skip_blank_rows: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            first_data_row: 2,
            skip_blank_rows: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationOutcome {
    /// Rows that produced no errors, in input order.
    pub records: Vec<TransformedRecord>,
    pub errors: Vec<RowIssue>,
    pub warnings: Vec<RowIssue>,
    /// Number of data rows examined, not counting skipped blank rows.
    pub total_rows: usize,
    /// All-empty rows dropped under [`ValidateOptions::skip_blank_rows`].
    pub skipped_rows: usize,
}

impl ValidationOutcome {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// File row numbers with at least one error.
    pub fn rejected_rows(&self) -> BTreeSet<usize> {
        self.errors.iter().map(|issue| issue.row_index).collect()
    }

    /// Issues of both severities for one row, errors first.
    pub fn issues_for_row(&self, row_index: usize) -> Vec<&RowIssue> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter(|issue| issue.row_index == row_index)
            .collect()
    }

    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary {
            total_rows: self.total_rows,
            skipped_rows: self.skipped_rows,
            valid_rows: self.records.len(),
            rejected_rows: self.rejected_rows().len(),
            errors: self.error_count(),
            warnings: self.warning_count(),
        }
    }
}

/// Aggregate counts for a preview screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub total_rows: usize,
    pub skipped_rows: usize,
    pub valid_rows: usize,
    pub rejected_rows: usize,
    pub errors: usize,
    pub warnings: usize,
}
