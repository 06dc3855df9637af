//! Encoding error types.

use std::path::PathBuf;

/// Errors that can occur while loading schemas or encoding a survey record.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A declared input field is absent from the record.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A value does not have the type the schema declares for the field.
    #[error("field '{field}' expects {expected}, got '{value}'")]
    InvalidType {
        field: String,
        expected: &'static str,
        value: String,
    },

    /// Strict mode: a categorical value outside the lookup table or options.
    #[error("unknown value '{value}' for field '{field}'")]
    UnknownCategory { field: String, value: String },

    /// Strict mode: encoded columns that the feature list would silently drop.
    #[error("encoded columns not in the feature list: {}", columns.join(", "))]
    UnexpectedColumns { columns: Vec<String> },

    /// A derived feature evaluated to NaN or infinity.
    #[error("derived feature '{column}' is not finite ({value})")]
    NonFinite { column: String, value: f64 },

    /// The encoding schema is structurally unusable.
    #[error("invalid encoding schema: {0}")]
    InvalidSchema(String),

    /// The feature-list artifact is structurally unusable.
    #[error("invalid feature list: {0}")]
    InvalidFeatureList(String),

    /// A schema or feature-list file could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A schema or feature-list file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
