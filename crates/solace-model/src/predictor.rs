//! The predictor: one aligned row in, one [`Prediction`] out.

use solace_core::Prediction;
use solace_encoder::{FeatureList, FeatureVector};

use crate::artifact::ModelArtifact;
use crate::classifier::Classifier;
use crate::error::{ArtifactError, ModelError};

/// A classifier checked against the feature list it will be fed.
#[derive(Debug)]
pub struct Predictor {
    classifier: Box<dyn Classifier>,
}

impl Predictor {
    /// Bind a model artifact to the feature list.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::FeatureNamesMismatch`] when the artifact
    /// records column names that differ from `features`, and
    /// [`ArtifactError::FeatureCountMismatch`] when the widths differ.
    pub fn new(artifact: ModelArtifact, features: &FeatureList) -> Result<Self, ArtifactError> {
        if let Some(names) = &artifact.feature_names
            && let Some((position, (model, expected))) = names
                .iter()
                .zip(features.columns())
                .enumerate()
                .find(|(_, (model, expected))| model != expected)
        {
            return Err(ArtifactError::FeatureNamesMismatch {
                position,
                model: model.clone(),
                features: expected.clone(),
            });
        }
        Self::with_classifier(artifact.into_classifier(), features)
    }

    /// Bind an already built classifier to the feature list.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::FeatureCountMismatch`] when the widths differ.
    pub fn with_classifier(
        classifier: Box<dyn Classifier>,
        features: &FeatureList,
    ) -> Result<Self, ArtifactError> {
        if classifier.n_features() != features.len() {
            return Err(ArtifactError::FeatureCountMismatch {
                model: classifier.n_features(),
                features: features.len(),
            });
        }
        tracing::info!(
            kind = classifier.kind(),
            n_features = classifier.n_features(),
            "classifier ready"
        );
        Ok(Self { classifier })
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.classifier.kind()
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.classifier.n_features()
    }

    /// Run inference on a single row.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DimensionMismatch`] if the row width is not the
    /// model's, or any error the classifier raises.
    pub fn predict(&self, vector: &FeatureVector) -> Result<Prediction, ModelError> {
        let probability = self.classifier.predict_proba(vector.values())?;
        let prediction = Prediction::from_probability(probability)?;
        tracing::debug!(
            kind = self.classifier.kind(),
            probability,
            label = %prediction.label,
            "prediction"
        );
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_core::Label;
    use solace_encoder::EncodedRow;

    fn features(columns: &[&str]) -> FeatureList {
        FeatureList::new(columns.iter().map(|c| (*c).to_string()).collect()).unwrap()
    }

    fn artifact(json: &str) -> ModelArtifact {
        ModelArtifact::from_json(json).expect("valid artifact")
    }

    #[test]
    fn predicts_aligned_row() {
        let list = features(&["a", "b"]);
        let predictor = Predictor::new(
            artifact(r#"{"kind": "logistic_regression", "coefficients": [2.0, -1.0], "intercept": 0.0}"#),
            &list,
        )
        .expect("widths match");

        let mut row = EncodedRow::new();
        row.set("a", 1.0);
        let prediction = predictor.predict(&list.align(&row).vector).unwrap();
        assert_eq!(prediction.label, Label::Likely);
        assert!(prediction.probability > 0.8);
    }

    #[test]
    fn rejects_width_mismatch_at_construction() {
        let err = Predictor::new(
            artifact(r#"{"kind": "logistic_regression", "coefficients": [1.0], "intercept": 0.0}"#),
            &features(&["a", "b"]),
        )
        .expect_err("width mismatch");
        assert!(matches!(
            err,
            ArtifactError::FeatureCountMismatch {
                model: 1,
                features: 2
            }
        ));
    }

    #[test]
    fn rejects_reordered_feature_names() {
        let err = Predictor::new(
            artifact(
                r#"{"kind": "logistic_regression", "coefficients": [1.0, 1.0], "intercept": 0.0, "feature_names": ["b", "a"]}"#,
            ),
            &features(&["a", "b"]),
        )
        .expect_err("order differs");
        assert!(matches!(
            err,
            ArtifactError::FeatureNamesMismatch { position: 0, .. }
        ));
    }

    #[test]
    fn wrong_width_row_is_a_dimension_mismatch() {
        let predictor = Predictor::new(
            artifact(r#"{"kind": "logistic_regression", "coefficients": [1.0, 1.0], "intercept": 0.0}"#),
            &features(&["a", "b"]),
        )
        .unwrap();
        let other = features(&["a", "b", "c"]);
        let err = predictor
            .predict(&other.align(&EncodedRow::new()).vector)
            .expect_err("three columns");
        assert!(matches!(
            err,
            ModelError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        ));
    }
}
