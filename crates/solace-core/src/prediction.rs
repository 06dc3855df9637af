//! Classifier output.

use serde::{Deserialize, Serialize};

use crate::enums::{Label, RecommendationTier};
use crate::errors::CoreError;

/// A binary label plus the positive-class probability in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    pub probability: f64,
}

impl Prediction {
    /// Build a prediction from a positive-class probability using the 0.5 rule.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidProbability`] if `probability` is not a
    /// finite value in `[0, 1]`.
    pub fn from_probability(probability: f64) -> Result<Self, CoreError> {
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(CoreError::InvalidProbability(probability));
        }
        Ok(Self {
            label: Label::from_probability(probability),
            probability,
        })
    }

    /// Positive-class probability as a percentage (0–100).
    #[must_use]
    pub fn probability_percent(&self) -> f64 {
        self.probability * 100.0
    }

    #[must_use]
    pub fn tier(&self) -> RecommendationTier {
        RecommendationTier::from_percent(self.probability_percent())
    }
}
