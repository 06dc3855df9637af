//! Label and recommendation tier enums for Solace.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Binary class predicted by the classifier.
///
/// Class 1 means the respondent is likely to seek mental health treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    NotLikely,
    Likely,
}

impl Label {
    /// Decision rule shared by every classifier: class 1 iff `p > 0.5`.
    ///
    /// A tie goes to class 0, as an argmax over `[1 - p, p]` picks the first
    /// maximum.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.5 {
            Self::Likely
        } else {
            Self::NotLikely
        }
    }

    /// Numeric class as returned in `{"prediction": <int>}`.
    #[must_use]
    pub const fn as_class(self) -> u8 {
        match self {
            Self::NotLikely => 0,
            Self::Likely => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotLikely => "not_likely",
            Self::Likely => "likely",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecommendationTier
// ---------------------------------------------------------------------------

/// Rule-based bucket of the positive-class probability.
///
/// ```text
/// >= 75%  proactive_consultation
/// >= 50%  increased_support
///  else   stable_environment
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    ProactiveConsultation,
    IncreasedSupport,
    StableEnvironment,
}

impl RecommendationTier {
    /// Lower bound (inclusive, in percent) of the proactive consultation tier.
    pub const PROACTIVE_THRESHOLD: f64 = 75.0;
    /// Lower bound (inclusive, in percent) of the increased support tier.
    pub const SUPPORT_THRESHOLD: f64 = 50.0;

    /// Bucket a probability expressed in percent (0–100).
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent >= Self::PROACTIVE_THRESHOLD {
            Self::ProactiveConsultation
        } else if percent >= Self::SUPPORT_THRESHOLD {
            Self::IncreasedSupport
        } else {
            Self::StableEnvironment
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProactiveConsultation => "proactive_consultation",
            Self::IncreasedSupport => "increased_support",
            Self::StableEnvironment => "stable_environment",
        }
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EncodingProfile
// ---------------------------------------------------------------------------

/// Built-in encoding schema selected by configuration.
///
/// `basic` covers the seven fields of the original survey endpoint;
/// `enriched` adds care options, wellness program, consequence answers and the
/// engineered features (`log_age`, `support_score`, `high_risk_workplace`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingProfile {
    #[default]
    Basic,
    Enriched,
}

impl EncodingProfile {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Enriched => "enriched",
        }
    }
}

impl fmt::Display for EncodingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
