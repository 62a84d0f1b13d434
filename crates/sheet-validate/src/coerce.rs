//! Cell coercion into typed field values.
//!
//! Each function reads one cell and returns the typed value plus whether the
//! text had to be rewritten to get there. Rewrites surface as warnings; a
//! [`CoerceError`] surfaces as an error on the cell.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use sheet_model::{CellValue, EnumOption, NumericFormat};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

/// Saudi mobile numbers in international form.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+9665\d{8}$").expect("Invalid phone regex"));

/// ISO format first; the rest are accepted with a warning.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

const TRUE_WORDS: &[&str] = &["true", "yes", "y", "1", "نعم"];
const FALSE_WORDS: &[&str] = &["false", "no", "n", "0", "لا"];

/// Arabic decimal separator.
const ARABIC_DECIMAL: char = '\u{066B}';

#[derive(Debug, Clone, PartialEq)]
pub struct Coerced<T> {
    pub value: T,
    /// True when the cell had to be rewritten to read as `value`.
    pub adjusted: bool,
}

impl<T> Coerced<T> {
    fn clean(value: T) -> Self {
        Self {
            value,
            adjusted: false,
        }
    }

    fn adjusted(value: T) -> Self {
        Self {
            value,
            adjusted: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoerceError {
    pub message: String,
}

impl CoerceError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type CoerceResult<T> = Result<Coerced<T>, CoerceError>;

pub fn coerce_number(cell: &CellValue, format: &NumericFormat) -> CoerceResult<f64> {
    match cell {
        CellValue::Number(number) if number.is_finite() => Ok(Coerced::clean(*number)),
        CellValue::Number(_) => Err(CoerceError::new("number is not finite")),
        CellValue::Text(text) => {
            let trimmed = text.trim();
            if uses_plain_decimal_point(format)
                && let Ok(number) = trimmed.parse::<f64>()
            {
                return finite(number).map(Coerced::clean);
            }
            let normalized = normalize_numeric_text(trimmed, format);
            match normalized.parse::<f64>() {
                Ok(number) if normalized == trimmed => finite(number).map(Coerced::clean),
                Ok(number) => finite(number).map(Coerced::adjusted),
                Err(_) => Err(CoerceError::new(format!("'{trimmed}' is not a number"))),
            }
        }
        CellValue::Bool(_) => Err(CoerceError::new("expected a number, found a boolean")),
        CellValue::Date(_) => Err(CoerceError::new("expected a number, found a date")),
        CellValue::Empty => Err(CoerceError::new("expected a number, found nothing")),
    }
}

/// Whether Rust's own float syntax agrees with the format.
fn uses_plain_decimal_point(format: &NumericFormat) -> bool {
    format.decimal_separator == '.' && !format.thousands_separators.contains(&'.')
}

fn finite(number: f64) -> Result<f64, CoerceError> {
    if number.is_finite() {
        Ok(number)
    } else {
        Err(CoerceError::new("number is not finite"))
    }
}

/// Apply the format's grammar: drop currency tokens and digit-group separators,
/// fold Arabic-Indic digits, and use `.` as the decimal point.
pub fn normalize_numeric_text(text: &str, format: &NumericFormat) -> String {
    let mut stripped = text.to_string();
    for token in &format.currency_tokens {
        stripped = strip_token(&stripped, token);
    }

    let mut normalized = String::with_capacity(stripped.len());
    for ch in stripped.trim().chars() {
        if ch == format.decimal_separator || ch == ARABIC_DECIMAL {
            normalized.push('.');
        } else if format.thousands_separators.contains(&ch) {
            continue;
        } else if let Some(digit) = arabic_digit(ch).filter(|_| format.accept_arabic_digits) {
            normalized.push(digit);
        } else {
            normalized.push(ch);
        }
    }
    normalized.trim().to_string()
}

/// Remove every ASCII case-insensitive occurrence of `token`.
fn strip_token(text: &str, token: &str) -> String {
    if token.is_empty() {
        return text.to_string();
    }
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let haystack = text.to_ascii_lowercase();
    let needle = token.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, _) in haystack.match_indices(&needle) {
        out.push_str(&text[last..start]);
        last = start + needle.len();
    }
    out.push_str(&text[last..]);
    out
}

fn arabic_digit(ch: char) -> Option<char> {
    match ch {
        '\u{0660}'..='\u{0669}' => char::from_digit(ch as u32 - 0x0660, 10),
        '\u{06F0}'..='\u{06F9}' => char::from_digit(ch as u32 - 0x06F0, 10),
        _ => None,
    }
}

pub fn coerce_boolean(cell: &CellValue) -> CoerceResult<bool> {
    match cell {
        CellValue::Bool(flag) => Ok(Coerced::clean(*flag)),
        CellValue::Number(number) if *number == 1.0 => Ok(Coerced::clean(true)),
        CellValue::Number(number) if *number == 0.0 => Ok(Coerced::clean(false)),
        CellValue::Text(text) => {
            let word = text.trim().to_lowercase();
            if TRUE_WORDS.contains(&word.as_str()) {
                Ok(Coerced::clean(true))
            } else if FALSE_WORDS.contains(&word.as_str()) {
                Ok(Coerced::clean(false))
            } else {
                Err(CoerceError::new(format!(
                    "'{}' is not a yes/no value",
                    text.trim()
                )))
            }
        }
        other => Err(CoerceError::new(format!(
            "'{}' is not a yes/no value",
            other.display()
        ))),
    }
}

pub fn coerce_date(cell: &CellValue) -> CoerceResult<NaiveDate> {
    match cell {
        CellValue::Date(date) => Ok(Coerced::clean(*date)),
        CellValue::Text(text) => {
            let trimmed = text.trim();
            DATE_FORMATS
                .iter()
                .enumerate()
                .find_map(|(index, format)| {
                    NaiveDate::parse_from_str(trimmed, format)
                        .ok()
                        .map(|date| Coerced {
                            value: date,
                            adjusted: index > 0,
                        })
                })
                .ok_or_else(|| CoerceError::new(format!("'{trimmed}' is not a date")))
        }
        other => Err(CoerceError::new(format!(
            "'{}' is not a date",
            other.display()
        ))),
    }
}

/// Lowercased address; adjusted when the case changed.
pub fn coerce_email(cell: &CellValue) -> CoerceResult<String> {
    let CellValue::Text(text) = cell else {
        return Err(CoerceError::new(format!(
            "'{}' is not an email address",
            cell.display()
        )));
    };
    let trimmed = text.trim();
    let lowered = trimmed.to_lowercase();
    if !EMAIL_REGEX.is_match(&lowered) {
        return Err(CoerceError::new(format!(
            "'{trimmed}' is not an email address"
        )));
    }
    if lowered == trimmed {
        Ok(Coerced::clean(lowered))
    } else {
        Ok(Coerced::adjusted(lowered))
    }
}

/// Normalize a Saudi mobile number to `+9665XXXXXXXX`.
pub fn normalize_phone(raw: &str) -> String {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '-' | '(' | ')'))
        .map(|ch| arabic_digit(ch).unwrap_or(ch))
        .collect();
    if let Some(rest) = compact.strip_prefix('0')
        && rest.starts_with('5')
    {
        return format!("+966{rest}");
    }
    if compact.starts_with('5') && compact.chars().count() == 9 {
        return format!("+966{compact}");
    }
    compact
}

pub fn coerce_phone(cell: &CellValue) -> CoerceResult<String> {
    let raw = match cell {
        CellValue::Text(text) => text.trim().to_string(),
        CellValue::Number(number) if number.is_finite() && number.fract() == 0.0 => {
            format!("{number:.0}")
        }
        other => {
            return Err(CoerceError::new(format!(
                "'{}' is not a phone number",
                other.display()
            )));
        }
    };
    let normalized = normalize_phone(&raw);
    if !PHONE_REGEX.is_match(&normalized) {
        return Err(CoerceError::new(format!(
            "'{raw}' is not a valid mobile number (expected +9665XXXXXXXX)"
        )));
    }
    if normalized == raw {
        Ok(Coerced::clean(normalized))
    } else {
        Ok(Coerced::adjusted(normalized))
    }
}

/// Resolve a cell against an option set.
///
/// Exact spellings are clean. Matches that only differ in case or spacing
/// come back adjusted. `None` means no option matched.
pub fn match_option<'o>(raw: &str, options: &'o [EnumOption]) -> Option<Coerced<&'o str>> {
    if let Some(option) = options
        .iter()
        .find(|option| option.spellings().any(|spelling| spelling == raw))
    {
        return Some(Coerced::clean(option.value.as_str()));
    }
    let folded = fold_option_text(raw);
    options
        .iter()
        .find(|option| {
            option
                .spellings()
                .any(|spelling| fold_option_text(spelling) == folded)
        })
        .map(|option| Coerced::adjusted(option.value.as_str()))
}

fn fold_option_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
