//! Shaping typed records back into display rows.

use serde::Serialize;

use sheet_model::{FieldCatalog, TransformedRecord};

use crate::error::ValidateError;

/// Label-headed rows ready for a writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Lay out records under field labels.
///
/// `keys` selects and orders the columns; `None` uses catalog order. Missing
/// values become empty strings.
pub fn export_rows(
    records: &[TransformedRecord],
    catalog: &FieldCatalog,
    keys: Option<&[&str]>,
) -> Result<ExportTable, ValidateError> {
    let fields = match keys {
        Some(keys) => keys
            .iter()
            .map(|key| {
                catalog
                    .get(key)
                    .ok_or_else(|| ValidateError::UnknownExportField {
                        key: (*key).to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => catalog.iter().collect(),
    };

    let headers = fields.iter().map(|field| field.label.clone()).collect();
    let rows = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|field| {
                    record
                        .get(&field.key)
                        .map(ToString::to_string)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();
    Ok(ExportTable { headers, rows })
}
