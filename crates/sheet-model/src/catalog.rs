//! Field catalogs, synonym dictionaries and import profiles.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::CanonicalField;

/// Cross-field constraint evaluated on a row's typed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowRule {
    /// `lower` must not exceed `upper` when both are present.
    NotGreaterThan {
        lower: String,
        upper: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl RowRule {
    pub fn fields(&self) -> [&str; 2] {
        match self {
            RowRule::NotGreaterThan { lower, upper, .. } => [lower.as_str(), upper.as_str()],
        }
    }
}

/// Ordered list of canonical fields with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldCatalog {
    fields: Vec<CanonicalField>,
    rules: Vec<RowRule>,
}

impl FieldCatalog {
    /// Build a catalog, rejecting empty or duplicate keys.
    pub fn new(fields: Vec<CanonicalField>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for field in &fields {
            if field.key.trim().is_empty() {
                return Err(ModelError::EmptyKey);
            }
            if !seen.insert(field.key.as_str()) {
                return Err(ModelError::DuplicateField {
                    key: field.key.clone(),
                });
            }
        }
        Ok(Self {
            fields,
            rules: Vec::new(),
        })
    }

    /// Attach cross-field rules. Every referenced key must exist.
    pub fn with_rules(mut self, rules: Vec<RowRule>) -> Result<Self> {
        for rule in &rules {
            for key in rule.fields() {
                if !self.contains(key) {
                    return Err(ModelError::UnknownRuleField {
                        key: key.to_string(),
                    });
                }
            }
        }
        self.rules = rules;
        Ok(self)
    }

    pub fn fields(&self) -> &[CanonicalField] {
        &self.fields
    }

    pub fn rules(&self) -> &[RowRule] {
        &self.rules
    }

    pub fn get(&self, key: &str) -> Option<&CanonicalField> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalField> {
        self.fields.iter()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &CanonicalField> {
        self.fields.iter().filter(|field| field.required)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldCatalog {
    type Item = &'a CanonicalField;
    type IntoIter = std::slice::Iter<'a, CanonicalField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Accepted header spellings per field key.
///
/// Spelling order is preserved; the matcher stops scanning a field's list
/// at the first exact hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymDictionary {
    entries: BTreeMap<String, Vec<String>>,
}

impl SynonymDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append spellings for a field, skipping blanks and exact duplicates.
    pub fn insert<I, S>(&mut self, key: impl Into<String>, spellings: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.entries.entry(key.into()).or_default();
        for spelling in spellings {
            let spelling = spelling.into();
            if spelling.trim().is_empty() || list.contains(&spelling) {
                continue;
            }
            list.push(spelling);
        }
    }

    #[must_use]
    pub fn with<I, S>(mut self, key: impl Into<String>, spellings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, spellings);
        self
    }

    /// Spellings for a field key; empty when the key has no entry.
    pub fn get(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A field catalog paired with the synonym dictionary used to match it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportProfile {
    pub name: String,
    pub catalog: FieldCatalog,
    pub synonyms: SynonymDictionary,
}

impl ImportProfile {
    /// Pair a catalog with its synonyms.
    ///
    /// Every synonym key must name a field, and every required field needs at
    /// least one synonym.
    pub fn new(
        name: impl Into<String>,
        catalog: FieldCatalog,
        synonyms: SynonymDictionary,
    ) -> Result<Self> {
        if let Some(key) = synonyms.keys().find(|key| !catalog.contains(key)) {
            return Err(ModelError::UnknownSynonymField {
                key: key.to_string(),
            });
        }
        if let Some(field) = catalog
            .required_fields()
            .find(|field| synonyms.get(&field.key).is_empty())
        {
            return Err(ModelError::RequiredWithoutSynonyms {
                key: field.key.clone(),
            });
        }
        Ok(Self {
            name: name.into(),
            catalog,
            synonyms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    fn field(key: &str) -> CanonicalField {
        CanonicalField::new(key, key.to_uppercase(), FieldType::String)
    }

    #[test]
    fn rejects_duplicate_keys() {
        let error = FieldCatalog::new(vec![field("title"), field("title")]).unwrap_err();
        assert_eq!(
            error,
            ModelError::DuplicateField {
                key: "title".to_string()
            }
        );
    }

    #[test]
    fn rejects_rules_on_unknown_fields() {
        let catalog = FieldCatalog::new(vec![field("budget_min")]).unwrap();
        let error = catalog
            .with_rules(vec![RowRule::NotGreaterThan {
                lower: "budget_min".to_string(),
                upper: "budget_max".to_string(),
                message: None,
            }])
            .unwrap_err();
        assert!(matches!(error, ModelError::UnknownRuleField { key } if key == "budget_max"));
    }

    #[test]
    fn synonym_insert_skips_blanks_and_duplicates() {
        let synonyms = SynonymDictionary::new().with("title", ["Title", "", "Title", "Name"]);
        assert_eq!(synonyms.get("title"), ["Title", "Name"]);
        assert!(synonyms.get("price").is_empty());
    }

    #[test]
    fn profile_rejects_orphan_synonyms() {
        let catalog = FieldCatalog::new(vec![field("title")]).unwrap();
        let synonyms = SynonymDictionary::new().with("price", ["Price"]);
        let error = ImportProfile::new("test", catalog, synonyms).unwrap_err();
        assert!(matches!(error, ModelError::UnknownSynonymField { .. }));
    }

    #[test]
    fn profile_rejects_required_fields_without_synonyms() {
        let catalog = FieldCatalog::new(vec![field("title").required(), field("notes")]).unwrap();
        let error = ImportProfile::new("test", catalog.clone(), SynonymDictionary::new())
            .unwrap_err();
        assert_eq!(
            error,
            ModelError::RequiredWithoutSynonyms {
                key: "title".to_string()
            }
        );

        let synonyms = SynonymDictionary::new().with("title", ["Title"]);
        assert!(ImportProfile::new("test", catalog, synonyms).is_ok());
    }
}
