use thiserror::Error;

/// Contract violations by the caller. Bad cell data never produces these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    #[error("column '{header}' is mapped to unknown field '{key}'")]
    UnknownField { key: String, header: String },

    #[error("cannot export unknown field '{key}'")]
    UnknownExportField { key: String },
}
