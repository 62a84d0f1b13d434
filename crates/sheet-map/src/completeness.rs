//! Mapping completeness checks over a match set.

use std::collections::BTreeSet;

use serde::Serialize;

use sheet_model::{CanonicalField, ColumnMatch, FieldCatalog};

use crate::confidence::{ConfidenceLevel, ConfidenceThresholds};

/// Aggregate counts for a preview screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchStatistics {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
    /// Labels of required fields that no column maps to.
    pub missing_required: Vec<String>,
}

impl MatchStatistics {
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

/// Required fields that no match targets, in catalog order.
pub fn find_missing_required_fields<'c>(
    matches: &[ColumnMatch],
    catalog: &'c FieldCatalog,
) -> Vec<&'c CanonicalField> {
    let mapped: BTreeSet<&str> = matches.iter().filter_map(ColumnMatch::matched_field).collect();
    catalog
        .required_fields()
        .filter(|field| !mapped.contains(field.key.as_str()))
        .collect()
}

/// First match whose chosen field is `key`.
pub fn find_match_for_field<'m>(key: &str, matches: &'m [ColumnMatch]) -> Option<&'m ColumnMatch> {
    matches
        .iter()
        .find(|candidate| candidate.matched_field() == Some(key))
}

pub fn match_statistics(matches: &[ColumnMatch], catalog: &FieldCatalog) -> MatchStatistics {
    match_statistics_with(matches, catalog, &ConfidenceThresholds::default())
}

/// Statistics with custom tier thresholds. Only matched columns are tiered.
pub fn match_statistics_with(
    matches: &[ColumnMatch],
    catalog: &FieldCatalog,
    thresholds: &ConfidenceThresholds,
) -> MatchStatistics {
    let mut stats = MatchStatistics {
        total: matches.len(),
        ..MatchStatistics::default()
    };
    for column in matches.iter().filter(|column| column.is_matched()) {
        stats.matched += 1;
        match thresholds.categorize(column.confidence) {
            ConfidenceLevel::High => stats.high_confidence += 1,
            ConfidenceLevel::Medium => stats.medium_confidence += 1,
            ConfidenceLevel::Low => stats.low_confidence += 1,
        }
    }
    stats.unmatched = stats.total - stats.matched;
    stats.missing_required = find_missing_required_fields(matches, catalog)
        .into_iter()
        .map(|field| field.label.clone())
        .collect();
    stats
}
