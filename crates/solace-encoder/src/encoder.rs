//! The feature encoder: raw answers -> aligned numeric row.

use std::sync::Arc;

use serde::Serialize;
use solace_core::{FieldValue, RawInput};

use crate::error::EncodeError;
use crate::feature_list::{EncodedRow, FeatureList, FeatureVector};
use crate::schema::{DerivedFeature, EncodingSchema, FieldEncoding, FieldKind, SchemaField};

/// A categorical answer that matched neither the lookup table nor the options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownValue {
    pub field: String,
    pub value: String,
}

/// The aligned vector plus what alignment had to paper over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodingReport {
    pub vector: FeatureVector,
    /// Feature-list columns the encoded row did not produce (set to 0).
    pub zero_filled: Vec<String>,
    /// Encoded columns absent from the feature list (discarded).
    pub dropped: Vec<String>,
    /// Answers that degraded to 0-valued features.
    pub unknown: Vec<UnknownValue>,
}

/// Schema-driven encoder bound to a feature list.
///
/// Immutable once built; share it behind an `Arc` across request handlers.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: EncodingSchema,
    features: Arc<FeatureList>,
    strict: bool,
}

impl FeatureEncoder {
    /// Bind a schema to a feature list.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidSchema`] if the schema is unusable.
    pub fn new(
        schema: EncodingSchema,
        features: Arc<FeatureList>,
        strict: bool,
    ) -> Result<Self, EncodeError> {
        schema.validate()?;
        Ok(Self {
            schema,
            features,
            strict,
        })
    }

    #[must_use]
    pub const fn schema(&self) -> &EncodingSchema {
        &self.schema
    }

    #[must_use]
    pub fn features(&self) -> &FeatureList {
        &self.features
    }

    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Encode and align a record.
    ///
    /// # Errors
    ///
    /// See [`Self::encode_with_report`].
    pub fn encode(&self, input: &RawInput) -> Result<FeatureVector, EncodeError> {
        self.encode_with_report(input).map(|report| report.vector)
    }

    /// Encode and align a record, keeping the alignment diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::MissingField`] / [`EncodeError::InvalidType`] for
    /// records that do not fit the schema, [`EncodeError::NonFinite`] if a
    /// derived feature is not a number, and in strict mode
    /// [`EncodeError::UnknownCategory`] / [`EncodeError::UnexpectedColumns`].
    pub fn encode_with_report(&self, input: &RawInput) -> Result<EncodingReport, EncodeError> {
        let (row, unknown) = self.encode_row(input)?;

        if self.strict
            && let Some(first) = unknown.first()
        {
            return Err(EncodeError::UnknownCategory {
                field: first.field.clone(),
                value: first.value.clone(),
            });
        }

        let alignment = self.features.align(&row);

        if self.strict && !alignment.dropped.is_empty() {
            return Err(EncodeError::UnexpectedColumns {
                columns: alignment.dropped,
            });
        }

        if !unknown.is_empty() || !alignment.dropped.is_empty() {
            tracing::debug!(
                unknown = ?unknown,
                dropped = ?alignment.dropped,
                "encoded row degraded to zero-valued features"
            );
        }

        Ok(EncodingReport {
            vector: alignment.vector,
            zero_filled: alignment.zero_filled,
            dropped: alignment.dropped,
            unknown,
        })
    }

    /// Per-field transforms followed by derived features, before alignment.
    ///
    /// # Errors
    ///
    /// Same field-level errors as [`Self::encode_with_report`].
    pub fn encode_row(
        &self,
        input: &RawInput,
    ) -> Result<(EncodedRow, Vec<UnknownValue>), EncodeError> {
        let mut row = EncodedRow::new();
        let mut unknown = Vec::new();

        for field in self.schema.inputs.fields() {
            let value = input
                .get(&field.name)
                .ok_or_else(|| EncodeError::MissingField {
                    field: field.name.clone(),
                })?;
            encode_field(field, value, &mut row, &mut unknown)?;
        }

        for derived in &self.schema.derived {
            let value = derive(derived, input)?;
            if !value.is_finite() {
                return Err(EncodeError::NonFinite {
                    column: derived.column().to_string(),
                    value,
                });
            }
            row.set(derived.column(), value);
        }

        Ok((row, unknown))
    }
}

#[allow(clippy::cast_precision_loss)]
fn encode_field(
    field: &SchemaField,
    value: &FieldValue,
    row: &mut EncodedRow,
    unknown: &mut Vec<UnknownValue>,
) -> Result<(), EncodeError> {
    match (&field.input, &field.encoding) {
        (FieldKind::Integer { .. }, _) => {
            let number = integer_value(field, value)?;
            row.set(field.name.clone(), number as f64);
        }
        (FieldKind::Choice { .. }, FieldEncoding::Lookup { table }) => {
            let text = value.as_text();
            let mapped = table.get(&*text).copied().unwrap_or_else(|| {
                unknown.push(UnknownValue {
                    field: field.name.clone(),
                    value: text.to_string(),
                });
                0.0
            });
            row.set(field.name.clone(), mapped);
        }
        (FieldKind::Choice { options, .. }, _) => {
            let text = value.as_text();
            if !options.iter().any(|option| *option == text) {
                unknown.push(UnknownValue {
                    field: field.name.clone(),
                    value: text.to_string(),
                });
            }
            row.set(format!("{}_{}", field.name, text), 1.0);
        }
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn derive(feature: &DerivedFeature, input: &RawInput) -> Result<f64, EncodeError> {
    let text_of = |field: &str| -> Result<String, EncodeError> {
        input
            .get(field)
            .map(|value| value.as_text().into_owned())
            .ok_or_else(|| EncodeError::MissingField {
                field: field.to_string(),
            })
    };

    match feature {
        DerivedFeature::Log1p { source, .. } => {
            let value = input.get(source).ok_or_else(|| EncodeError::MissingField {
                field: source.clone(),
            })?;
            let age = value.as_integer().ok_or_else(|| EncodeError::InvalidType {
                field: source.clone(),
                expected: "an integer",
                value: value.to_string(),
            })?;
            Ok((age as f64).ln_1p())
        }
        DerivedFeature::WeightedSum { terms, .. } => {
            let mut total = 0.0;
            for term in terms {
                let answer = text_of(&term.field)?;
                total += term.weights.get(&answer).copied().unwrap_or(0.0);
            }
            Ok(total)
        }
        DerivedFeature::AllOf { conditions, .. } => {
            for condition in conditions {
                if text_of(&condition.field)? != condition.equals {
                    return Ok(0.0);
                }
            }
            Ok(1.0)
        }
    }
}

fn integer_value(field: &SchemaField, value: &FieldValue) -> Result<i64, EncodeError> {
    value.as_integer().ok_or_else(|| EncodeError::InvalidType {
        field: field.name.clone(),
        expected: "an integer",
        value: value.to_string(),
    })
}
