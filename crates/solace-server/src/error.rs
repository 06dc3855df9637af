//! Server and service error types.

use solace_config::ConfigError;
use solace_encoder::EncodeError;
use solace_model::{ArtifactError, ModelError};

/// Start-up failures: configuration, artifacts, binding.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("encoder setup failed: {0}")]
    Encoder(#[from] EncodeError),

    #[error("failed to load model: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("failed to bind {address}: {reason}")]
    Bind { address: String, reason: String },
}

/// Failure of a single prediction.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The record could not be encoded; the caller sent something unusable.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Inference failed on a well-formed row.
    #[error(transparent)]
    Model(#[from] ModelError),
}
