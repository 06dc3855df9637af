//! Model error types.

use std::path::PathBuf;

use solace_core::CoreError;

/// Errors raised while loading or validating a model artifact.
///
/// All of them are start-up failures: a service never runs with a model that
/// produced one of these.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("cannot read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally unsound model (bad indices, non-finite numbers, ...).
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// The model expects a different number of columns than the feature list.
    #[error("model expects {model} features but the feature list has {features}")]
    FeatureCountMismatch { model: usize, features: usize },

    /// The model's embedded column names disagree with the feature list.
    #[error("model feature_names differ from the feature list at position {position}: model has '{model}', feature list has '{features}'")]
    FeatureNamesMismatch {
        position: usize,
        model: String,
        features: String,
    },
}

/// Errors raised by a single inference call.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Wrong number of columns for the loaded model.
    #[error("feature dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("non-finite feature at index {index}: {value}")]
    NonFiniteInput { index: usize, value: f64 },

    /// A tree walk left the node table. Only reachable for unvalidated models.
    #[error("corrupt tree {tree}: node {node} does not exist")]
    CorruptTree { tree: usize, node: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}
