//! Mapping state for interactive review.
//!
//! A [`MappingSession`] owns the match set produced by the matcher and lets a
//! reviewer replace or clear individual picks before validation.

use std::collections::BTreeMap;

use serde::Serialize;

use sheet_model::{CanonicalField, ColumnMatch, ImportProfile};

use crate::completeness::{MatchStatistics, find_missing_required_fields, match_statistics};
use crate::error::MappingError;
use crate::matcher::{ColumnMatcher, MatchOptions};

/// Mapping status of one canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "confidence", rename_all = "lowercase")]
pub enum FieldMappingStatus {
    Mapped(f64),
    Unmapped,
}

#[derive(Debug, Clone)]
pub struct MappingSession<'p> {
    profile: &'p ImportProfile,
    matches: Vec<ColumnMatch>,
}

impl<'p> MappingSession<'p> {
    pub fn new(profile: &'p ImportProfile, matches: Vec<ColumnMatch>) -> Self {
        Self { profile, matches }
    }

    /// Run the matcher over `headers` and start a session from its output.
    pub fn from_headers<S: AsRef<str>>(
        profile: &'p ImportProfile,
        headers: &[S],
        options: MatchOptions,
    ) -> Self {
        let matches = ColumnMatcher::for_profile(profile, options).match_columns(headers);
        Self::new(profile, matches)
    }

    pub fn profile(&self) -> &ImportProfile {
        self.profile
    }

    pub fn matches(&self) -> &[ColumnMatch] {
        &self.matches
    }

    /// Accept a manual mapping for the header at `column_index`.
    ///
    /// Other columns already mapped to `field_key` are left alone; see
    /// [`Self::duplicate_targets`].
    pub fn assign(&mut self, column_index: usize, field_key: &str) -> Result<(), MappingError> {
        if !self.profile.catalog.contains(field_key) {
            return Err(MappingError::UnknownField(field_key.to_string()));
        }
        let column = self.column_mut(column_index)?;
        column.override_field(field_key);
        Ok(())
    }

    /// Assign by header text instead of position. Comparison ignores padding.
    pub fn assign_header(&mut self, header: &str, field_key: &str) -> Result<usize, MappingError> {
        let column_index = self.column_for_header(header)?;
        self.assign(column_index, field_key)?;
        Ok(column_index)
    }

    /// Mark the header at `column_index` as deliberately unmapped.
    pub fn clear(&mut self, column_index: usize) -> Result<(), MappingError> {
        self.column_mut(column_index)?.clear();
        Ok(())
    }

    pub fn clear_header(&mut self, header: &str) -> Result<usize, MappingError> {
        let column_index = self.column_for_header(header)?;
        self.clear(column_index)?;
        Ok(column_index)
    }

    pub fn status(&self, field_key: &str) -> FieldMappingStatus {
        self.matches
            .iter()
            .find(|column| column.matched_field() == Some(field_key))
            .map_or(FieldMappingStatus::Unmapped, |column| {
                FieldMappingStatus::Mapped(column.confidence)
            })
    }

    /// Fields targeted by more than one column, with the column positions.
    pub fn duplicate_targets(&self) -> BTreeMap<String, Vec<usize>> {
        let mut targets: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for column in &self.matches {
            if let Some(field) = column.matched_field() {
                targets
                    .entry(field.to_string())
                    .or_default()
                    .push(column.column_index);
            }
        }
        targets.retain(|_, columns| columns.len() > 1);
        targets
    }

    pub fn missing_required(&self) -> Vec<&CanonicalField> {
        find_missing_required_fields(&self.matches, &self.profile.catalog)
    }

    pub fn statistics(&self) -> MatchStatistics {
        match_statistics(&self.matches, &self.profile.catalog)
    }

    pub fn into_matches(self) -> Vec<ColumnMatch> {
        self.matches
    }

    fn column_for_header(&self, header: &str) -> Result<usize, MappingError> {
        self.matches
            .iter()
            .find(|column| column.source_header.trim() == header.trim())
            .map(|column| column.column_index)
            .ok_or_else(|| MappingError::UnknownHeader(header.to_string()))
    }

    fn column_mut(&mut self, column_index: usize) -> Result<&mut ColumnMatch, MappingError> {
        self.matches
            .iter_mut()
            .find(|column| column.column_index == column_index)
            .ok_or(MappingError::HeaderNotFound(column_index))
    }
}
