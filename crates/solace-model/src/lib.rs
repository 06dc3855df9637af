//! # solace-model
//!
//! Pre-trained binary classifiers loaded from JSON artifacts.
//!
//! Two model kinds are understood, selected by the artifact's `"kind"` tag:
//!
//! - `random_forest`: averaged decision trees (`x[i] <= t` goes left),
//! - `logistic_regression`: `sigmoid(intercept + w . x)`.
//!
//! Artifacts are validated on load and bound to the feature list by
//! [`Predictor::new`], so a service that started is known to have a model
//! matching its encoder. Inference is synchronous and allocation-free; call it
//! directly from request worker threads.

mod artifact;
mod classifier;
pub mod error;
mod forest;
mod logistic;
mod predictor;

pub use artifact::{ModelArtifact, ModelSpec};
pub use classifier::Classifier;
pub use error::{ArtifactError, ModelError};
pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use logistic::LogisticRegression;
pub use predictor::Predictor;
