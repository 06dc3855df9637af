//! Model artifact locations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_model_path() -> PathBuf {
    PathBuf::from("artifacts/model.json")
}

fn default_feature_list_path() -> PathBuf {
    PathBuf::from("artifacts/feature_list.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtifactsConfig {
    /// Serialized classifier (random forest or logistic regression JSON).
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Ordered feature-column list the model was trained on.
    #[serde(default = "default_feature_list_path")]
    pub feature_list_path: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            feature_list_path: default_feature_list_path(),
        }
    }
}
