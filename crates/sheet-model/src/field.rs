//! Canonical field definitions.
//!
//! A [`CanonicalField`] describes one column the target schema accepts,
//! together with the rules the validator applies to its cells.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::issue::IssueSeverity;

static DEFAULT_NUMERIC_FORMAT: LazyLock<NumericFormat> = LazyLock::new(NumericFormat::default);

/// Declared data type of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Email,
    Phone,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    /// Parse a type name as it appears in profile files (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "text" => Ok(FieldType::String),
            "number" | "numeric" => Ok(FieldType::Number),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            "date" => Ok(FieldType::Date),
            "email" => Ok(FieldType::Email),
            "phone" => Ok(FieldType::Phone),
            _ => Err(format!("Unknown field type: {}", s)),
        }
    }
}

/// One allowed value of an enumeration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    /// Canonical value stored in the transformed record.
    pub value: String,
    /// Alternate spellings accepted verbatim (other languages, display names).
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl EnumOption {
    pub fn new(value: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            value: value.into(),
            aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
        }
    }

    /// All accepted spellings, canonical value first.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.value.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Grammar used to coerce formatted numeric text such as `"1,200 SAR"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericFormat {
    /// Characters dropped as digit-group separators.
    pub thousands_separators: Vec<char>,
    /// Character treated as the decimal point.
    pub decimal_separator: char,
    /// Currency or unit tokens removed before parsing (ASCII case-insensitive).
    pub currency_tokens: Vec<String>,
    /// Whether Arabic-Indic digits (`٠`-`٩`) are accepted.
    pub accept_arabic_digits: bool,
}

impl Default for NumericFormat {
    fn default() -> Self {
        Self {
            thousands_separators: vec![',', '\u{066C}', '\u{00A0}', ' '],
            decimal_separator: '.',
            currency_tokens: ["SAR", "ر.س", "ريال", "\u{FDFC}", "$", "USD"]
                .iter()
                .map(|token| (*token).to_string())
                .collect(),
            accept_arabic_digits: true,
        }
    }
}

/// Lower bound applied to a number field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericBound {
    pub value: f64,
    /// `true` for `>=`, `false` for a strict `>`.
    #[serde(default)]
    pub inclusive: bool,
    /// Severity of the issue raised when the bound is violated.
    #[serde(default = "default_bound_severity")]
    pub severity: IssueSeverity,
}

fn default_bound_severity() -> IssueSeverity {
    IssueSeverity::Error
}

impl NumericBound {
    /// Strictly greater than `value`.
    pub fn above(value: f64, severity: IssueSeverity) -> Self {
        Self {
            value,
            inclusive: false,
            severity,
        }
    }

    /// Greater than or equal to `value`.
    pub fn at_least(value: f64, severity: IssueSeverity) -> Self {
        Self {
            value,
            inclusive: true,
            severity,
        }
    }

    pub fn admits(&self, number: f64) -> bool {
        if self.inclusive {
            number >= self.value
        } else {
            number > self.value
        }
    }
}

/// One column the target schema accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalField {
    /// Stable identifier (e.g. `price`).
    pub key: String,
    /// Human-readable name shown to users.
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// A batch is invalid when a required field has no mapping.
    #[serde(default)]
    pub required: bool,
    /// Fixed option set; empty means free-form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<EnumOption>,
    /// Option value substituted (with a warning) for unknown enumeration values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_format: Option<NumericFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<NumericBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Value written into a record when the field has no value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Sample value used in import templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl CanonicalField {
    pub fn new(key: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            field_type,
            required: false,
            options: Vec::new(),
            fallback: None,
            numeric_format: None,
            min: None,
            min_length: None,
            default_value: None,
            example: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<EnumOption>) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, value: impl Into<String>) -> Self {
        self.fallback = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_numeric_format(mut self, format: NumericFormat) -> Self {
        self.numeric_format = Some(format);
        self
    }

    #[must_use]
    pub fn with_min(mut self, bound: NumericBound) -> Self {
        self.min = Some(bound);
        self
    }

    #[must_use]
    pub fn with_min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_example(mut self, value: impl Into<String>) -> Self {
        self.example = Some(value.into());
        self
    }

    /// True if values are constrained to [`Self::options`].
    pub fn is_enumeration(&self) -> bool {
        !self.options.is_empty()
    }

    /// The coercion grammar for this field, falling back to the default grammar.
    pub fn numeric_format(&self) -> &NumericFormat {
        self.numeric_format
            .as_ref()
            .unwrap_or(&DEFAULT_NUMERIC_FORMAT)
    }
}
