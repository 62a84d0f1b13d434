//! Header-to-field reconciliation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sheet_model::{
    CanonicalField, ColumnMatch, FieldCandidate, FieldCatalog, ImportProfile, SynonymDictionary,
};

use crate::similarity::similarity;

/// Tunable knobs for [`ColumnMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Minimum score for a header to be matched.
    pub min_confidence: f64,
    /// Minimum score for alternatives listed next to a matched header.
    pub suggestion_floor: f64,
    /// Minimum score for alternatives listed next to an unmatched header.
    pub unmatched_suggestion_floor: f64,
    pub max_suggestions: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.7,
            suggestion_floor: 0.5,
            unmatched_suggestion_floor: 0.3,
            max_suggestions: 3,
        }
    }
}

/// Scores headers against every field of a catalog.
#[derive(Debug, Clone)]
pub struct ColumnMatcher<'a> {
    catalog: &'a FieldCatalog,
    synonyms: &'a SynonymDictionary,
    options: MatchOptions,
}

impl<'a> ColumnMatcher<'a> {
    pub fn new(
        catalog: &'a FieldCatalog,
        synonyms: &'a SynonymDictionary,
        options: MatchOptions,
    ) -> Self {
        Self {
            catalog,
            synonyms,
            options,
        }
    }

    pub fn for_profile(profile: &'a ImportProfile, options: MatchOptions) -> Self {
        Self::new(&profile.catalog, &profile.synonyms, options)
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Best score of a header against one field's synonyms and key.
    pub fn score_field(&self, header: &str, field: &CanonicalField) -> f64 {
        let mut best = 0.0_f64;
        for spelling in self.synonyms.get(&field.key) {
            let score = similarity(header, spelling);
            if score > best {
                best = score;
            }
            if score >= 1.0 {
                break;
            }
        }
        best.max(similarity(header, &field.key))
    }

    /// All fields ranked by score, highest first. Ties keep catalog order.
    pub fn rank(&self, header: &str) -> Vec<FieldCandidate> {
        let mut candidates: Vec<FieldCandidate> = self
            .catalog
            .iter()
            .map(|field| FieldCandidate {
                field: field.key.clone(),
                confidence: self.score_field(header, field),
            })
            .collect();
        // `sort_by` is stable.
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        candidates
    }

    /// Reconcile one header at the given column position.
    pub fn match_header(&self, column_index: usize, header: &str) -> ColumnMatch {
        let candidates = self.rank(header);
        let top = candidates.first().map_or(0.0, |candidate| candidate.confidence);

        let (matched_field, suggestions) = if !candidates.is_empty()
            && top >= self.options.min_confidence
        {
            let suggestions = self.suggestions(&candidates[1..], self.options.suggestion_floor);
            (Some(candidates[0].field.clone()), suggestions)
        } else {
            let suggestions =
                self.suggestions(&candidates, self.options.unmatched_suggestion_floor);
            (None, suggestions)
        };

        debug!(
            column_index,
            header,
            matched = matched_field.as_deref().unwrap_or("-"),
            confidence = top,
            suggestion_count = suggestions.len(),
            "scored header"
        );

        ColumnMatch {
            source_header: header.to_string(),
            column_index,
            matched_field,
            confidence: top,
            suggestions,
        }
    }

    /// One match per non-empty header, in input order.
    pub fn match_columns<S: AsRef<str>>(&self, headers: &[S]) -> Vec<ColumnMatch> {
        let matches: Vec<ColumnMatch> = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.as_ref().trim().is_empty())
            .map(|(index, header)| self.match_header(index, header.as_ref()))
            .collect();

        info!(
            header_count = headers.len(),
            column_count = matches.len(),
            matched = matches.iter().filter(|m| m.is_matched()).count(),
            "matched headers"
        );
        matches
    }

    fn suggestions(&self, candidates: &[FieldCandidate], floor: f64) -> Vec<FieldCandidate> {
        candidates
            .iter()
            .take(self.options.max_suggestions)
            .filter(|candidate| candidate.confidence >= floor)
            .cloned()
            .collect()
    }
}

/// Reconcile headers against a profile.
pub fn match_columns<S: AsRef<str>>(
    headers: &[S],
    profile: &ImportProfile,
    options: &MatchOptions,
) -> Vec<ColumnMatch> {
    ColumnMatcher::for_profile(profile, *options).match_columns(headers)
}
