//! Row- and cell-scoped issues produced during validation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Blocks the row from import.
    Error,
    /// Import proceeds with a caveat.
    Warning,
}

impl IssueSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// What went wrong, independent of the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    // Batch level
    /// A required field has no mapped column.
    UnmappedRequiredField,

    // Row level
    /// Every cell of the row is empty.
    EmptyRow,
    /// A cross-field rule failed.
    RuleViolation,

    // Cell level
    /// Required field with an empty cell.
    RequiredEmpty,
    /// Value cannot be read as the field's type.
    TypeMismatch,
    /// Value is not one of the field's options.
    EnumInvalid,
    /// Text is shorter than the field's minimum length.
    TooShort,
    /// Number violates the field's lower bound.
    OutOfRange,
    /// Value was converted to the field's type.
    TypeCoerced,
    /// Option matched after case/spacing normalization, or fallback applied.
    EnumNormalized,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::UnmappedRequiredField => "unmapped_required_field",
            IssueKind::EmptyRow => "empty_row",
            IssueKind::RuleViolation => "rule_violation",
            IssueKind::RequiredEmpty => "required_empty",
            IssueKind::TypeMismatch => "type_mismatch",
            IssueKind::EnumInvalid => "enum_invalid",
            IssueKind::TooShort => "too_short",
            IssueKind::OutOfRange => "out_of_range",
            IssueKind::TypeCoerced => "type_coerced",
            IssueKind::EnumNormalized => "enum_normalized",
        }
    }

    /// Severity used when the kind does not carry its own.
    pub fn default_severity(&self) -> IssueSeverity {
        match self {
            IssueKind::TypeCoerced | IssueKind::EnumNormalized => IssueSeverity::Warning,
            _ => IssueSeverity::Error,
        }
    }
}

/// One problem found while validating a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    /// File-relative row number, as a user sees it when opening the source file.
    pub row_index: usize,
    /// Spreadsheet column the issue came from; `None` for row-level issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_header: Option<String>,
    /// Canonical field key, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub severity: IssueSeverity,
    pub kind: IssueKind,
    pub message: String,
    /// Display form of the offending value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RowIssue {
    /// A cell-scoped issue with the kind's default severity.
    pub fn cell(
        row_index: usize,
        source_header: &str,
        field: &str,
        kind: IssueKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            source_header: Some(source_header.to_string()),
            field: Some(field.to_string()),
            severity: kind.default_severity(),
            kind,
            message: message.into(),
            value: None,
        }
    }

    /// A row-level issue (no source column).
    pub fn row(row_index: usize, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            row_index,
            source_header: None,
            field: None,
            severity: kind.default_severity(),
            kind,
            message: message.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: IssueSeverity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}
