use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use sheet_map::{ConfidenceInfo, MatchStatistics, confidence_level};
use sheet_model::{ColumnMatch, RowIssue, TransformedRecord};
use sheet_validate::{ImportDecision, ValidationOutcome, ValidationSummary};

#[derive(Debug, Serialize)]
pub struct ColumnReport {
    #[serde(flatten)]
    pub column: ColumnMatch,
    /// Present only for matched columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<ConfidenceInfo>,
}

impl From<ColumnMatch> for ColumnReport {
    fn from(column: ColumnMatch) -> Self {
        let level = column
            .is_matched()
            .then(|| confidence_level(column.confidence));
        Self { column, level }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub profile: String,
    pub file: PathBuf,
    pub columns: Vec<ColumnReport>,
    pub statistics: MatchStatistics,
    /// Fields claimed by more than one column.
    pub duplicates: BTreeMap<String, Vec<usize>>,
}

#[derive(Debug, Serialize)]
pub struct ValidateReport {
    pub mapping: MatchReport,
    pub summary: ValidationSummary,
    pub decision: ImportDecision,
    pub errors: Vec<RowIssue>,
    pub warnings: Vec<RowIssue>,
    pub records: Vec<TransformedRecord>,
}

impl ValidateReport {
    pub fn new(mapping: MatchReport, outcome: ValidationOutcome, decision: ImportDecision) -> Self {
        Self {
            mapping,
            summary: outcome.summary(),
            decision,
            errors: outcome.errors,
            warnings: outcome.warnings,
            records: outcome.records,
        }
    }

    pub fn is_blocked(&self) -> bool {
        !self.decision.allowed
    }
}
