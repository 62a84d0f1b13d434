//! CSV input for the command-line shell.
//!
//! The first record holds the headers. Every later record is a data row, so
//! data row `n` (zero-based) sits on file row `n + 2`.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::debug;

use sheet_model::{CellValue, RawRow};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvSheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Trim, drop a byte-order mark and collapse inner whitespace.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cells keep their spacing; the validator decides what padding means.
fn to_cell(raw: &str) -> CellValue {
    CellValue::from(raw.trim_matches('\u{feff}'))
}

pub fn read_csv_sheet(path: &Path) -> Result<CsvSheet> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let sheet = read_records(reader).with_context(|| format!("read csv: {}", path.display()))?;
    debug!(
        path = %path.display(),
        columns = sheet.headers.len(),
        rows = sheet.rows.len(),
        "loaded csv"
    );
    Ok(sheet)
}

/// Parse CSV text already in memory.
pub fn parse_csv_sheet(text: &str) -> Result<CsvSheet> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    read_records(reader)
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> Result<CsvSheet> {
    let mut records = reader.records();
    let Some(first) = records.next() else {
        return Ok(CsvSheet::default());
    };
    let headers: Vec<String> = first
        .context("read header record")?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for (offset, record) in records.enumerate() {
        let record = record.with_context(|| format!("read data row {}", offset + 2))?;
        rows.push(record.iter().map(to_cell).collect());
    }
    Ok(CsvSheet { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("\u{feff}السعر  بالريال "), "السعر بالريال");
        assert_eq!(normalize_header("   "), "");
    }
}
