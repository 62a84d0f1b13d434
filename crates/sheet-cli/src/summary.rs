use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sheet_map::ConfidenceLevel;
use sheet_model::{ImportProfile, IssueSeverity, RowIssue};

use crate::types::{ColumnReport, MatchReport, ValidateReport};

pub fn print_fields(profile: &ImportProfile) {
    println!("Profile: {}", profile.name);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Options"),
        header_cell("Default"),
        header_cell("Synonyms"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 6, CellAlignment::Right);
    for field in &profile.catalog {
        let options = field
            .options
            .iter()
            .map(|option| option.value.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&field.key)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&field.label),
            Cell::new(field.field_type),
            if field.required {
                Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                dim_cell("-")
            },
            text_or_dash(&options),
            text_or_dash(field.default_value.as_deref().unwrap_or_default()),
            Cell::new(profile.synonyms.get(&field.key).len()),
        ]);
    }
    println!("{table}");
    for rule in profile.catalog.rules() {
        let [lower, upper] = rule.fields();
        println!("Rule: {lower} <= {upper}");
    }
}

pub fn print_match_summary(report: &MatchReport) {
    println!("Profile: {}", report.profile);
    println!("File: {}", report.file.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Header"),
        header_cell("Field"),
        header_cell("Confidence"),
        header_cell("Level"),
        header_cell("Suggestions"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for column in &report.columns {
        table.add_row(column_row(column));
    }
    println!("{table}");

    let stats = &report.statistics;
    println!(
        "Matched {}/{} headers (high {}, medium {}, low {})",
        stats.matched,
        stats.total,
        stats.high_confidence,
        stats.medium_confidence,
        stats.low_confidence
    );
    if !stats.missing_required.is_empty() {
        println!("Missing required: {}", stats.missing_required.join(", "));
    }
    for (field, columns) in &report.duplicates {
        let positions = columns
            .iter()
            .map(|index| (index + 1).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("Mapped more than once: {field} (columns {positions})");
    }
}

pub fn print_validation_summary(report: &ValidateReport) {
    print_match_summary(&report.mapping);

    let summary = &report.summary;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Skipped"),
        header_cell("Valid"),
        header_cell("Rejected"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_table_style(&mut table);
    for index in 0..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.total_rows).add_attribute(Attribute::Bold),
        dim_cell(summary.skipped_rows),
        Cell::new(summary.valid_rows),
        count_cell(summary.rejected_rows, Color::Red),
        count_cell(summary.errors, Color::Red),
        count_cell(summary.warnings, Color::Yellow),
    ]);
    println!();
    println!("{table}");

    print_issue_table(report);

    println!();
    if report.decision.allowed {
        println!(
            "Import allowed: {} record(s), {} row(s) skipped",
            report.decision.importable_rows, report.decision.rejected_rows
        );
    } else {
        println!("Import blocked:");
        for reason in &report.decision.reasons {
            println!("- {reason}");
        }
    }
}

fn print_issue_table(report: &ValidateReport) {
    if report.errors.is_empty() && report.warnings.is_empty() {
        return;
    }
    let mut issues: Vec<&RowIssue> = report.errors.iter().chain(&report.warnings).collect();
    issues.sort_by_key(|issue| (issue.row_index, issue.severity));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Severity"),
        header_cell("Header"),
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Message"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            Cell::new(issue.row_index),
            severity_cell(issue.severity),
            text_or_dash(issue.source_header.as_deref().unwrap_or_default()),
            text_or_dash(issue.field.as_deref().unwrap_or_default()),
            Cell::new(issue.kind.as_str()),
            Cell::new(&issue.message),
            text_or_dash(issue.value.as_deref().unwrap_or_default()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn column_row(report: &ColumnReport) -> Vec<Cell> {
    let column = &report.column;
    let suggestions = column
        .suggestions
        .iter()
        .map(|candidate| format!("{} ({:.2})", candidate.field, candidate.confidence))
        .collect::<Vec<_>>()
        .join(", ");
    let (field, confidence, level) = match (column.matched_field(), report.level) {
        (Some(field), Some(info)) => (
            Cell::new(field),
            Cell::new(format!("{:.2}", column.confidence)),
            level_cell(info.level),
        ),
        _ => (
            Cell::new("unmapped").fg(Color::Red),
            dim_cell(format!("{:.2}", column.confidence)),
            dim_cell("-"),
        ),
    };
    vec![
        Cell::new(column.column_index + 1),
        Cell::new(&column.source_header),
        field,
        confidence,
        level,
        text_or_dash(&suggestions),
    ]
}

fn level_cell(level: ConfidenceLevel) -> Cell {
    let color = match level {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Red,
    };
    Cell::new(level.label()).fg(color)
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn text_or_dash(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
