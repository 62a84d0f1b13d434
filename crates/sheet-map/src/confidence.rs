//! Confidence tiers for presenting match quality.

use serde::Serialize;

/// Confidence level categories for mapping quality assessment.
///
/// - `High`: near-certain matches that can be used without review
/// - `Medium`: good matches that should be verified
/// - `Low`: weak matches requiring manual confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Returns a human-readable description of the confidence level.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "confirmed - high match",
            Self::Medium => "probable - should review",
            Self::Low => "uncertain - needs verification",
        }
    }

    /// Badge color used by preview screens.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::High => "green",
            Self::Medium => "yellow",
            Self::Low => "red",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Tier boundaries. Lower edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceThresholds {
    /// Minimum confidence for high-quality matches (default: 0.9).
    pub high: f64,
    /// Minimum confidence for medium-quality matches (default: 0.7).
    pub medium: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.9,
            medium: 0.7,
        }
    }
}

impl ConfidenceThresholds {
    /// Categorizes a confidence score. Scores below `medium` are `Low`.
    #[must_use]
    pub fn categorize(&self, confidence: f64) -> ConfidenceLevel {
        if confidence >= self.high {
            ConfidenceLevel::High
        } else if confidence >= self.medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfidenceInfo {
    pub level: ConfidenceLevel,
    pub color: &'static str,
    pub description: &'static str,
}

impl From<ConfidenceLevel> for ConfidenceInfo {
    fn from(level: ConfidenceLevel) -> Self {
        Self {
            level,
            color: level.color(),
            description: level.description(),
        }
    }
}

/// Tier a score with the default thresholds.
pub fn confidence_level(confidence: f64) -> ConfidenceInfo {
    ConfidenceThresholds::default().categorize(confidence).into()
}
