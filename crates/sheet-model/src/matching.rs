//! Header-to-field reconciliation results.

use serde::{Deserialize, Serialize};

/// A ranked alternative field for a header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCandidate {
    pub field: String,
    pub confidence: f64,
}

/// The reconciliation result for one spreadsheet header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMatch {
    /// Raw header text as it appeared in the file.
    pub source_header: String,
    /// Zero-based position of the header in the source file.
    pub column_index: usize,
    /// Chosen field key; `None` when nothing met the confidence floor.
    pub matched_field: Option<String>,
    /// Score behind the chosen field, or the best score found when unmatched.
    pub confidence: f64,
    /// Alternatives ordered by descending confidence.
    #[serde(default)]
    pub suggestions: Vec<FieldCandidate>,
}

impl ColumnMatch {
    pub fn is_matched(&self) -> bool {
        self.matched_field.is_some()
    }

    pub fn matched_field(&self) -> Option<&str> {
        self.matched_field.as_deref()
    }

    /// Record a manual pick. Manual picks carry full confidence.
    pub fn override_field(&mut self, field: impl Into<String>) {
        let field = field.into();
        self.suggestions.retain(|candidate| candidate.field != field);
        self.matched_field = Some(field);
        self.confidence = 1.0;
    }

    /// Mark the column as deliberately unmapped.
    pub fn clear(&mut self) {
        self.matched_field = None;
        self.confidence = 0.0;
    }
}
