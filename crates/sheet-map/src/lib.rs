//! Fuzzy reconciliation of spreadsheet headers against a field catalog.
//!
//! The [`ColumnMatcher`] scores every header against every field's synonym
//! list with a normalized Levenshtein similarity. Results can then be reviewed
//! and corrected through a [`MappingSession`] before rows are validated.

#![deny(unsafe_code)]

pub mod completeness;
pub mod confidence;
pub mod error;
pub mod matcher;
pub mod session;
pub mod similarity;

pub use completeness::{
    MatchStatistics, find_match_for_field, find_missing_required_fields, match_statistics,
    match_statistics_with,
};
pub use confidence::{ConfidenceInfo, ConfidenceLevel, ConfidenceThresholds, confidence_level};
pub use error::MappingError;
pub use matcher::{ColumnMatcher, MatchOptions, match_columns};
pub use session::{FieldMappingStatus, MappingSession};
pub use similarity::{normalize_header, similarity};
