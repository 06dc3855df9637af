//! Logistic regression over the aligned feature row.

use serde::{Deserialize, Serialize};

use crate::classifier::{Classifier, check_row};
use crate::error::{ArtifactError, ModelError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    /// # Errors
    ///
    /// Returns [`ArtifactError::InvalidModel`] for an empty coefficient vector
    /// or any non-finite parameter.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.coefficients.is_empty() {
            return Err(ArtifactError::InvalidModel(
                "logistic regression has no coefficients".into(),
            ));
        }
        if let Some((index, value)) = self
            .coefficients
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(ArtifactError::InvalidModel(format!(
                "non-finite coefficient at index {index}: {value}"
            )));
        }
        if !self.intercept.is_finite() {
            return Err(ArtifactError::InvalidModel(format!(
                "non-finite intercept: {}",
                self.intercept
            )));
        }
        Ok(())
    }

    fn decision(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_row(self.coefficients.len(), features)?;
        Ok(sigmoid(self.decision(features)))
    }
}

/// Logistic function, split by sign so `exp` never overflows.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
