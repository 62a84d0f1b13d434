use thiserror::Error;

/// Errors raised while assembling catalogs and profiles.
///
/// These describe broken configuration, never bad spreadsheet data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("field key must not be empty")]
    EmptyKey,
    #[error("duplicate field key: {key}")]
    DuplicateField { key: String },
    #[error("synonyms given for unknown field: {key}")]
    UnknownSynonymField { key: String },
    #[error("required field '{key}' has no synonyms and can never be matched")]
    RequiredWithoutSynonyms { key: String },
    #[error("rule references unknown field: {key}")]
    UnknownRuleField { key: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
