//! Blank import templates derived from a catalog.

use serde::Serialize;

use sheet_model::FieldCatalog;

/// Header row plus one example row, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSheet {
    pub headers: Vec<String>,
    pub example: Vec<String>,
}

impl TemplateSheet {
    /// Rows ready for a CSV writer: headers first, then the example.
    pub fn rows(&self) -> [&[String]; 2] {
        [&self.headers, &self.example]
    }
}

/// Build a template whose headers are the field labels.
pub fn build_template(catalog: &FieldCatalog) -> TemplateSheet {
    let mut headers = Vec::with_capacity(catalog.len());
    let mut example = Vec::with_capacity(catalog.len());
    for field in catalog {
        headers.push(field.label.clone());
        example.push(
            field
                .example
                .clone()
                .or_else(|| field.default_value.clone())
                .unwrap_or_default(),
        );
    }
    TemplateSheet { headers, example }
}
