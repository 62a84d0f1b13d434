#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod field;
pub mod issue;
pub mod matching;
pub mod record;
pub mod value;

pub use catalog::{FieldCatalog, ImportProfile, RowRule, SynonymDictionary};
pub use error::{ModelError, Result};
pub use field::{CanonicalField, EnumOption, FieldType, NumericBound, NumericFormat};
pub use issue::{IssueKind, IssueSeverity, RowIssue};
pub use matching::{ColumnMatch, FieldCandidate};
pub use record::TransformedRecord;
pub use value::{CellValue, FieldValue, RawRow};
