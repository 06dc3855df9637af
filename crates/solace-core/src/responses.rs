//! Response types returned as JSON by the HTTP endpoint and the `solace` CLI.

use serde::{Deserialize, Serialize};

use crate::enums::{Label, RecommendationTier};

/// Response from `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictResponse {
    pub prediction: u8,
}

/// Response from `solace predict` and `solace ask`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionSummary {
    pub prediction: u8,
    pub label: Label,
    /// Positive-class probability in percent, rounded to two decimals.
    pub probability: f64,
    pub recommendation_tier: RecommendationTier,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// One entry of a request-validation error body.
///
/// Mirrors the `{"detail": [{"loc": [...], "msg": ..., "type": ...}]}` shape
/// clients of the endpoint already understand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}
