//! Error types for mapping operations.

use thiserror::Error;

/// Errors from mapping session edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Field key not present in the catalog.
    #[error("Field not found: {0}")]
    UnknownField(String),
    /// No match exists for the header position.
    #[error("No header at column {0}")]
    HeaderNotFound(usize),
    /// No match exists with this header text.
    #[error("Header not found: {0}")]
    UnknownHeader(String),
}
