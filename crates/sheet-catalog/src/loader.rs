//! TOML profile files.
//!
//! A profile file lists fields as `[[fields]]` tables. Each table carries the
//! field definition plus an optional `synonyms` array:
//!
//! ```toml
//! name = "office-listings"
//!
//! [[fields]]
//! key = "price"
//! label = "Price"
//! type = "number"
//! required = true
//! synonyms = ["Price", "السعر"]
//! min = { value = 0, severity = "error" }
//!
//! [[rules]]
//! kind = "not_greater_than"
//! lower = "budget_min"
//! upper = "budget_max"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use sheet_model::{
    CanonicalField, FieldCatalog, FieldType, ImportProfile, RowRule, SynonymDictionary,
};

use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
struct ProfileFile {
    name: String,
    #[serde(default)]
    fields: Vec<FieldEntry>,
    #[serde(default)]
    rules: Vec<RowRule>,
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
    #[serde(flatten)]
    field: CanonicalField,
    #[serde(default)]
    synonyms: Vec<String>,
}

/// Load and check a profile from a TOML file.
pub fn load_profile(path: &Path) -> Result<ImportProfile, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::io(path, source))?;
    let profile = parse_profile(&text, path)?;
    debug!(
        profile = %profile.name,
        path = %path.display(),
        field_count = profile.catalog.len(),
        "loaded profile"
    );
    Ok(profile)
}

/// Parse a profile from TOML text that did not come from a file.
pub fn profile_from_str(text: &str) -> Result<ImportProfile, CatalogError> {
    parse_profile(text, Path::new("<memory>"))
}

fn parse_profile(text: &str, origin: &Path) -> Result<ImportProfile, CatalogError> {
    let file: ProfileFile = toml::from_str(text).map_err(|source| CatalogError::Toml {
        path: PathBuf::from(origin),
        source,
    })?;
    if file.name.trim().is_empty() {
        return Err(CatalogError::invalid("profile name must not be empty"));
    }
    if file.fields.is_empty() {
        return Err(CatalogError::invalid(format!(
            "profile '{}' defines no fields",
            file.name
        )));
    }

    let mut synonyms = SynonymDictionary::new();
    let mut fields = Vec::with_capacity(file.fields.len());
    for entry in file.fields {
        if !entry.synonyms.is_empty() {
            synonyms.insert(entry.field.key.clone(), entry.synonyms);
        }
        fields.push(entry.field);
    }
    let catalog = FieldCatalog::new(fields)?.with_rules(file.rules)?;
    let profile = ImportProfile::new(file.name, catalog, synonyms)?;
    check_profile(&profile)?;
    Ok(profile)
}

/// Consistency checks that the model types cannot express on their own.
pub fn check_profile(profile: &ImportProfile) -> Result<(), CatalogError> {
    for field in &profile.catalog {
        if field.is_enumeration() && field.field_type != FieldType::String {
            return Err(CatalogError::invalid(format!(
                "field '{}' has options but type {}",
                field.key, field.field_type
            )));
        }
        if let Some(fallback) = &field.fallback
            && !field.options.iter().any(|option| &option.value == fallback)
        {
            return Err(CatalogError::invalid(format!(
                "fallback '{fallback}' of field '{}' is not one of its options",
                field.key
            )));
        }
        if field.min.is_some() && field.field_type != FieldType::Number {
            return Err(CatalogError::invalid(format!(
                "field '{}' has a numeric bound but type {}",
                field.key, field.field_type
            )));
        }
    }
    for rule in profile.catalog.rules() {
        for key in rule.fields() {
            let is_number = profile
                .catalog
                .get(key)
                .is_some_and(|field| field.field_type == FieldType::Number);
            if !is_number {
                return Err(CatalogError::invalid(format!(
                    "rule field '{key}' must be a number field"
                )));
            }
        }
    }
    Ok(())
}
