//! Model artifact file: `{"kind": ..., ...}` JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::error::ArtifactError;
use crate::forest::RandomForest;
use crate::logistic::LogisticRegression;

/// Model parameters, tagged by `"kind"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    RandomForest(RandomForest),
    LogisticRegression(LogisticRegression),
}

/// A parsed and structurally validated model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(flatten)]
    pub model: ModelSpec,
    /// Training column order, when the exporter recorded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl ModelArtifact {
    /// Parse and validate an artifact from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Json`] for malformed JSON or an unknown kind,
    /// and [`ArtifactError::InvalidModel`] for unsound parameters.
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let artifact: Self = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Load an artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Io`] / [`ArtifactError::Parse`] naming `path`,
    /// or [`ArtifactError::InvalidModel`].
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Self =
            serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        artifact.validate()?;
        tracing::debug!(path = %path.display(), kind = artifact.kind(), "model artifact loaded");
        Ok(artifact)
    }

    /// # Errors
    ///
    /// Returns [`ArtifactError::InvalidModel`] describing the first problem.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match &self.model {
            ModelSpec::RandomForest(forest) => forest.validate()?,
            ModelSpec::LogisticRegression(logistic) => logistic.validate()?,
        }
        if let Some(names) = &self.feature_names
            && names.len() != self.n_features()
        {
            return Err(ArtifactError::InvalidModel(format!(
                "feature_names has {} entries but the model expects {} features",
                names.len(),
                self.n_features()
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.classifier().kind()
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.classifier().n_features()
    }

    fn classifier(&self) -> &dyn Classifier {
        match &self.model {
            ModelSpec::RandomForest(forest) => forest,
            ModelSpec::LogisticRegression(logistic) => logistic,
        }
    }

    /// Move the parameters behind the [`Classifier`] trait.
    #[must_use]
    pub fn into_classifier(self) -> Box<dyn Classifier> {
        match self.model {
            ModelSpec::RandomForest(forest) => Box::new(forest),
            ModelSpec::LogisticRegression(logistic) => Box::new(logistic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LOGISTIC: &str = r#"{
        "kind": "logistic_regression",
        "coefficients": [0.5, -0.5],
        "intercept": 0.1,
        "feature_names": ["a", "b"]
    }"#;

    #[test]
    fn dispatches_on_kind() {
        let artifact = ModelArtifact::from_json(LOGISTIC).expect("valid");
        assert_eq!(artifact.kind(), "logistic_regression");
        assert_eq!(artifact.n_features(), 2);
        assert_eq!(
            artifact.feature_names.as_deref(),
            Some(&["a".to_string(), "b".to_string()][..])
        );

        let forest = ModelArtifact::from_json(
            r#"{"kind": "random_forest", "n_features": 1, "trees": [{"nodes": [{"leaf": 0.4}]}]}"#,
        )
        .expect("valid");
        assert_eq!(forest.kind(), "random_forest");
        assert!(forest.feature_names.is_none());
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = ModelArtifact::from_json(r#"{"kind": "gradient_boosting", "trees": []}"#)
            .expect_err("unknown kind");
        assert!(matches!(err, ArtifactError::Json(_)));
    }

    #[test]
    fn rejects_feature_names_of_wrong_length() {
        let json = r#"{"kind": "logistic_regression", "coefficients": [1.0], "intercept": 0.0, "feature_names": ["a", "b"]}"#;
        let err = ModelArtifact::from_json(json).expect_err("length mismatch");
        assert!(matches!(err, ArtifactError::InvalidModel(_)));
    }

    #[test]
    fn load_names_the_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("model.json");
        let err = ModelArtifact::load(&missing).expect_err("missing file");
        assert!(err.to_string().contains("model.json"));

        std::fs::write(&missing, "not json").unwrap();
        let err = ModelArtifact::load(&missing).expect_err("garbage");
        assert!(matches!(err, ArtifactError::Parse { .. }));

        std::fs::write(&missing, LOGISTIC).unwrap();
        assert!(ModelArtifact::load(&missing).is_ok());
    }
}
