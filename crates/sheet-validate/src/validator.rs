//! Row validation and transformation.

use std::collections::BTreeSet;

use tracing::{debug, info, info_span};

use sheet_model::{
    CanonicalField, CellValue, ColumnMatch, FieldCatalog, FieldType, FieldValue, IssueKind,
    RawRow, RowIssue, RowRule, TransformedRecord,
};

use crate::coerce::{
    CoerceError, Coerced, coerce_boolean, coerce_date, coerce_email, coerce_number, coerce_phone,
    match_option,
};
use crate::error::ValidateError;
use crate::outcome::{ValidateOptions, ValidationOutcome};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A mapping resolved against the catalog.
struct ActiveColumn<'a> {
    column_index: usize,
    header: &'a str,
    field: &'a CanonicalField,
}

/// Validate mapped rows and build typed records.
///
/// Only mappings with a chosen field take part. Rows with at least one error
/// are left out of `records`, but all of their issues are reported. The only
/// `Err` is a mapping that names a field the catalog does not define.
pub fn validate_and_transform(
    rows: &[RawRow],
    mappings: &[ColumnMatch],
    catalog: &FieldCatalog,
    options: &ValidateOptions,
) -> Result<ValidationOutcome, ValidateError> {
    let span = info_span!("validate", rows = rows.len(), fields = catalog.len());
    let _guard = span.enter();

    let columns = resolve_columns(mappings, catalog)?;
    let mut outcome = ValidationOutcome::default();

    for (offset, row) in rows.iter().enumerate() {
        let row_index = offset + options.first_data_row;
        if options.skip_blank_rows && row.iter().all(CellValue::is_empty) {
            outcome.skipped_rows += 1;
            continue;
        }
        outcome.total_rows += 1;
        let checked = check_row(row_index, row, &columns, catalog);
        let accepted = !checked.issues.iter().any(RowIssue::is_error);
        for issue in checked.issues {
            if issue.is_error() {
                outcome.errors.push(issue);
            } else {
                outcome.warnings.push(issue);
            }
        }
        if accepted {
            outcome.records.push(checked.record);
        } else {
            debug!(row_index, "row rejected");
        }
    }

    info!(
        total_rows = outcome.total_rows,
        skipped_rows = outcome.skipped_rows,
        records = outcome.records.len(),
        errors = outcome.errors.len(),
        warnings = outcome.warnings.len(),
        "validation complete"
    );
    Ok(outcome)
}

fn resolve_columns<'a>(
    mappings: &'a [ColumnMatch],
    catalog: &'a FieldCatalog,
) -> Result<Vec<ActiveColumn<'a>>, ValidateError> {
    let mut columns = Vec::new();
    for mapping in mappings {
        let Some(key) = mapping.matched_field() else {
            continue;
        };
        let field = catalog
            .get(key)
            .ok_or_else(|| ValidateError::UnknownField {
                key: key.to_string(),
                header: mapping.source_header.clone(),
            })?;
        columns.push(ActiveColumn {
            column_index: mapping.column_index,
            header: &mapping.source_header,
            field,
        });
    }
    Ok(columns)
}

struct CheckedRow {
    record: TransformedRecord,
    issues: Vec<RowIssue>,
}

fn check_row(
    row_index: usize,
    row: &RawRow,
    columns: &[ActiveColumn<'_>],
    catalog: &FieldCatalog,
) -> CheckedRow {
    let mut record = TransformedRecord::new(row_index);
    let mut issues = Vec::new();

    if row.iter().all(CellValue::is_empty) {
        issues.push(RowIssue::row(row_index, IssueKind::EmptyRow, "row is empty"));
        return CheckedRow { record, issues };
    }

    // Fields with a non-empty cell in at least one mapped column.
    let mut filled: BTreeSet<&str> = BTreeSet::new();
    for column in columns {
        let cell = row.get(column.column_index).unwrap_or(&EMPTY_CELL);
        if cell.is_empty() {
            continue;
        }
        filled.insert(column.field.key.as_str());
        let mut cell_check = CellCheck {
            row_index,
            column,
            cell,
            issues: &mut issues,
        };
        if let Some(value) = cell_check.run() {
            record.insert(column.field.key.clone(), value);
        }
    }

    let mut reported: BTreeSet<&str> = BTreeSet::new();
    for column in columns {
        let field = column.field;
        if field.required
            && !filled.contains(field.key.as_str())
            && reported.insert(field.key.as_str())
        {
            issues.push(RowIssue::cell(
                row_index,
                column.header,
                &field.key,
                IssueKind::RequiredEmpty,
                format!("{} is required", field.label),
            ));
        }
    }

    check_rules(row_index, &record, catalog, &mut issues);

    if !issues.iter().any(RowIssue::is_error) {
        apply_defaults(&mut record, catalog);
    }
    CheckedRow { record, issues }
}

/// Type, option and bound checks for one non-empty cell.
struct CellCheck<'r, 'c> {
    row_index: usize,
    column: &'r ActiveColumn<'c>,
    cell: &'r CellValue,
    issues: &'r mut Vec<RowIssue>,
}

impl CellCheck<'_, '_> {
    fn run(&mut self) -> Option<FieldValue> {
        let field = self.column.field;
        if field.is_enumeration() {
            return self.check_option();
        }
        let value = match field.field_type {
            FieldType::Number => {
                let coerced = self.accept(coerce_number(self.cell, field.numeric_format()))?;
                self.check_bound(coerced);
                FieldValue::Number(coerced)
            }
            FieldType::Boolean => FieldValue::Bool(self.accept(coerce_boolean(self.cell))?),
            FieldType::Date => FieldValue::Date(self.accept(coerce_date(self.cell))?),
            FieldType::Email => FieldValue::Text(self.accept(coerce_email(self.cell))?),
            FieldType::Phone => FieldValue::Text(self.accept(coerce_phone(self.cell))?),
            FieldType::String => {
                let text = self.cell.display();
                self.check_length(&text);
                FieldValue::Text(text)
            }
        };
        Some(value)
    }

    /// Record the coercion's issue, if any, and hand back the value.
    fn accept<T: std::fmt::Display>(&mut self, result: Result<Coerced<T>, CoerceError>) -> Option<T> {
        match result {
            Ok(coerced) => {
                if coerced.adjusted {
                    let message = format!(
                        "{} was read as {}",
                        self.column.field.label, coerced.value
                    );
                    self.push(IssueKind::TypeCoerced, message);
                }
                Some(coerced.value)
            }
            Err(error) => {
                let message = format!("{}: {}", self.column.field.label, error.message);
                self.push(IssueKind::TypeMismatch, message);
                None
            }
        }
    }

    fn check_option(&mut self) -> Option<FieldValue> {
        let field = self.column.field;
        let raw = match self.cell {
            CellValue::Text(text) => text.clone(),
            other => other.display(),
        };
        if let Some(coerced) = match_option(&raw, &field.options) {
            if coerced.adjusted {
                let message = format!("{} was read as {}", field.label, coerced.value);
                self.push(IssueKind::EnumNormalized, message);
            }
            return Some(FieldValue::Text(coerced.value.to_string()));
        }
        let allowed: Vec<&str> = field.options.iter().map(|o| o.value.as_str()).collect();
        if let Some(fallback) = &field.fallback {
            let message = format!(
                "{} is not one of {}; using {fallback}",
                field.label,
                allowed.join(", ")
            );
            self.push(IssueKind::EnumNormalized, message);
            return Some(FieldValue::Text(fallback.clone()));
        }
        let message = format!("{} must be one of {}", field.label, allowed.join(", "));
        self.push(IssueKind::EnumInvalid, message);
        None
    }

    fn check_bound(&mut self, number: f64) {
        let field = self.column.field;
        let Some(bound) = field.min else {
            return;
        };
        if bound.admits(number) {
            return;
        }
        let relation = if bound.inclusive {
            "at least"
        } else {
            "greater than"
        };
        let message = format!("{} must be {relation} {}", field.label, bound.value);
        let issue = self
            .issue(IssueKind::OutOfRange, message)
            .with_severity(bound.severity);
        self.issues.push(issue);
    }

    fn check_length(&mut self, text: &str) {
        let field = self.column.field;
        if let Some(min_length) = field.min_length
            && text.chars().count() < min_length
        {
            let message = format!(
                "{} must be at least {min_length} characters",
                field.label
            );
            self.push(IssueKind::TooShort, message);
        }
    }

    fn issue(&self, kind: IssueKind, message: String) -> RowIssue {
        RowIssue::cell(
            self.row_index,
            self.column.header,
            &self.column.field.key,
            kind,
            message,
        )
        .with_value(self.cell.display())
    }

    fn push(&mut self, kind: IssueKind, message: String) {
        let issue = self.issue(kind, message);
        self.issues.push(issue);
    }
}

fn check_rules(
    row_index: usize,
    record: &TransformedRecord,
    catalog: &FieldCatalog,
    issues: &mut Vec<RowIssue>,
) {
    for rule in catalog.rules() {
        match rule {
            RowRule::NotGreaterThan {
                lower,
                upper,
                message,
            } => {
                let low = record.get(lower).and_then(FieldValue::as_number);
                let high = record.get(upper).and_then(FieldValue::as_number);
                if let (Some(low), Some(high)) = (low, high)
                    && low > high
                {
                    let message = message.clone().unwrap_or_else(|| {
                        format!(
                            "{} must not exceed {}",
                            label_of(catalog, lower),
                            label_of(catalog, upper)
                        )
                    });
                    issues.push(
                        RowIssue::row(row_index, IssueKind::RuleViolation, message)
                            .with_field(lower.clone()),
                    );
                }
            }
        }
    }
}

fn label_of<'c>(catalog: &'c FieldCatalog, key: &'c str) -> &'c str {
    catalog.get(key).map_or(key, |field| field.label.as_str())
}

fn apply_defaults(record: &mut TransformedRecord, catalog: &FieldCatalog) {
    for field in catalog {
        if record.contains(&field.key) {
            continue;
        }
        if let Some(default) = &field.default_value {
            record.insert(field.key.clone(), default_value(field.field_type, default));
        }
    }
}

fn default_value(field_type: FieldType, raw: &str) -> FieldValue {
    match field_type {
        FieldType::Number => raw
            .trim()
            .parse::<f64>()
            .map_or_else(|_| FieldValue::Text(raw.to_string()), FieldValue::Number),
        FieldType::Boolean => coerce_boolean(&CellValue::from(raw))
            .map_or_else(|_| FieldValue::Text(raw.to_string()), |c| FieldValue::Bool(c.value)),
        _ => FieldValue::Text(raw.to_string()),
    }
}
