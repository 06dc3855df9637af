use std::fmt;

use solace_core::Label;

use crate::error::ModelError;

/// A loaded binary classifier answering one row at a time.
///
/// Implementations are immutable after loading, so a single instance is
/// shared across every request thread.
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Artifact kind, as written in the model's `"kind"` tag.
    fn kind(&self) -> &'static str;

    /// Number of columns a row must have.
    fn n_features(&self) -> usize;

    /// Positive-class probability for one row.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DimensionMismatch`] for a row of the wrong width
    /// and [`ModelError::NonFiniteInput`] for NaN or infinite values.
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Class label using the `p > 0.5` rule.
    ///
    /// # Errors
    ///
    /// Same as [`Self::predict_proba`].
    fn predict(&self, features: &[f64]) -> Result<Label, ModelError> {
        self.predict_proba(features).map(Label::from_probability)
    }
}

/// Shared input check for every [`Classifier`] implementation.
pub(crate) fn check_row(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::DimensionMismatch {
            expected,
            got: features.len(),
        });
    }
    if let Some((index, value)) = features
        .iter()
        .copied()
        .enumerate()
        .find(|(_, value)| !value.is_finite())
    {
        return Err(ModelError::NonFiniteInput { index, value });
    }
    Ok(())
}
