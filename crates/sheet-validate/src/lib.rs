//! Validation and transformation of mapped spreadsheet rows.
//!
//! [`validate_and_transform`] checks each row against the catalog, coerces
//! cells into typed values and collects errors and warnings per cell. A row
//! with any error is excluded from the records; [`gate_import`] then decides
//! whether the batch as a whole may be committed.

#![deny(unsafe_code)]

pub mod coerce;
pub mod error;
pub mod export;
pub mod gate;
pub mod outcome;
pub mod validator;

pub use error::ValidateError;
pub use export::{ExportTable, export_rows};
pub use gate::{GateReason, ImportDecision, ImportPolicy, gate_import};
pub use outcome::{ValidateOptions, ValidationOutcome, ValidationSummary};
pub use validator::validate_and_transform;
