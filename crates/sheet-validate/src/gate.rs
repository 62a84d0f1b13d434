//! Commit decision over a validated batch.

use std::fmt;

use serde::Serialize;

use sheet_model::{CanonicalField, IssueKind};

use crate::outcome::ValidationOutcome;

/// How a batch with some bad rows is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPolicy {
    /// Any error blocks the whole batch.
    #[default]
    AllOrNothing,
    /// Valid rows are imported; rows with errors are skipped.
    Partial,
}

/// Why a batch was blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum GateReason {
    UnmappedRequiredField { key: String, label: String },
    RowErrors { rows: usize, errors: usize },
    NoRecords,
}

impl GateReason {
    /// Issue taxonomy tag for reasons that correspond to one.
    pub fn kind(&self) -> Option<IssueKind> {
        match self {
            GateReason::UnmappedRequiredField { .. } => Some(IssueKind::UnmappedRequiredField),
            GateReason::RowErrors { .. } | GateReason::NoRecords => None,
        }
    }
}

impl fmt::Display for GateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateReason::UnmappedRequiredField { label, .. } => {
                write!(f, "required field '{label}' is not mapped to any column")
            }
            GateReason::RowErrors { rows, errors } => {
                write!(f, "{errors} error(s) in {rows} row(s)")
            }
            GateReason::NoRecords => write!(f, "no valid rows to import"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportDecision {
    pub allowed: bool,
    /// Records that would be written if the import proceeds.
    pub importable_rows: usize,
    /// Rows with at least one error.
    pub rejected_rows: usize,
    pub reasons: Vec<GateReason>,
}

/// Decide whether a validated batch may be committed.
///
/// Unmapped required fields always block. Under [`ImportPolicy::AllOrNothing`]
/// any row error blocks; under [`ImportPolicy::Partial`] the batch goes through
/// as long as at least one record survived.
pub fn gate_import(
    missing_required: &[&CanonicalField],
    outcome: &ValidationOutcome,
    policy: ImportPolicy,
) -> ImportDecision {
    let rejected_rows = outcome.rejected_rows().len();
    let mut reasons: Vec<GateReason> = missing_required
        .iter()
        .map(|field| GateReason::UnmappedRequiredField {
            key: field.key.clone(),
            label: field.label.clone(),
        })
        .collect();

    if outcome.has_errors() && policy == ImportPolicy::AllOrNothing {
        reasons.push(GateReason::RowErrors {
            rows: rejected_rows,
            errors: outcome.error_count(),
        });
    }
    if outcome.records.is_empty() {
        reasons.push(GateReason::NoRecords);
    }

    let allowed = reasons.is_empty();
    ImportDecision {
        allowed,
        importable_rows: if allowed { outcome.records.len() } else { 0 },
        rejected_rows,
        reasons,
    }
}
