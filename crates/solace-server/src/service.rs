//! Encoder + predictor wiring, built once at start-up.

use std::sync::Arc;

use solace_config::{PresentationConfig, SolaceConfig};
use solace_core::{Prediction, RawInput};
use solace_encoder::{EncodingReport, EncodingSchema, FeatureEncoder, FeatureList};
use solace_model::{ModelArtifact, Predictor};

use crate::error::{PredictError, ServerError};

/// Everything a request needs, immutable after construction.
///
/// Shared across worker threads behind an `Arc`.
#[derive(Debug)]
pub struct PredictionService {
    encoder: FeatureEncoder,
    predictor: Predictor,
    presentation: PresentationConfig,
}

impl PredictionService {
    #[must_use]
    pub const fn new(
        encoder: FeatureEncoder,
        predictor: Predictor,
        presentation: PresentationConfig,
    ) -> Self {
        Self {
            encoder,
            predictor,
            presentation,
        }
    }

    /// Load the feature list, schema and model named by `config`.
    ///
    /// # Errors
    ///
    /// Any missing or malformed artifact, or a model that does not match the
    /// feature list, is returned as a [`ServerError`] naming the cause.
    pub fn from_config(config: &SolaceConfig) -> Result<Self, ServerError> {
        let encoder = Self::load_encoder(config)?;
        let artifact = ModelArtifact::load(&config.artifacts.model_path)?;
        let predictor = Predictor::new(artifact, encoder.features())?;

        tracing::info!(
            schema = %encoder.schema().name,
            strict = encoder.is_strict(),
            model = predictor.kind(),
            columns = encoder.features().len(),
            "prediction service ready"
        );

        Ok(Self::new(
            encoder,
            predictor,
            config.presentation.clone(),
        ))
    }

    /// Build only the encoder: feature list plus the configured schema.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Encoder`] if the feature list or a custom
    /// schema cannot be loaded.
    pub fn load_encoder(config: &SolaceConfig) -> Result<FeatureEncoder, ServerError> {
        let features = FeatureList::from_file(&config.artifacts.feature_list_path)?;
        let schema = match &config.encoding.schema_path {
            Some(path) => EncodingSchema::from_file(path)?,
            None => EncodingSchema::for_profile(config.encoding.profile),
        };
        Ok(FeatureEncoder::new(
            schema,
            Arc::new(features),
            config.encoding.strict,
        )?)
    }

    #[must_use]
    pub const fn schema(&self) -> &EncodingSchema {
        self.encoder.schema()
    }

    #[must_use]
    pub const fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    #[must_use]
    pub const fn presentation(&self) -> &PresentationConfig {
        &self.presentation
    }

    /// Encode a record and run inference on it.
    ///
    /// # Errors
    ///
    /// [`PredictError::Encode`] for records the encoder rejects,
    /// [`PredictError::Model`] if inference fails.
    pub fn predict(&self, input: &RawInput) -> Result<Prediction, PredictError> {
        let vector = self.encoder.encode(input)?;
        Ok(self.predictor.predict(&vector)?)
    }

    /// Encode a record and keep the alignment diagnostics.
    ///
    /// # Errors
    ///
    /// See [`FeatureEncoder::encode_with_report`].
    pub fn encode(&self, input: &RawInput) -> Result<EncodingReport, PredictError> {
        Ok(self.encoder.encode_with_report(input)?)
    }
}
