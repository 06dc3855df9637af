//! Declarative encoding schema.
//!
//! A schema lists the survey fields a profile accepts (with the widget hints
//! the form surfaces need) and how each field becomes numeric columns:
//!
//! - `passthrough`: integer copied under the field's own name (`Age`)
//! - `lookup`: categorical value mapped through a table, unknown values -> 0
//! - `one_hot`: one indicator column per value, named `{field}_{value}`
//!
//! Derived features are computed from the raw answers after the per-field
//! transforms and land in their own columns.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use solace_core::EncodingProfile;

use crate::error::EncodeError;
use crate::profiles;

/// Widget and type information for one input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Integer answer. `min`/`max` bound the form surfaces only.
    Integer { min: i64, max: i64, default: i64 },
    /// One value out of `options`. The default falls back to the first option.
    Choice {
        options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
}

/// How a field's value becomes numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldEncoding {
    Passthrough,
    Lookup { table: BTreeMap<String, f64> },
    OneHot,
}

/// One declared survey field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub input: FieldKind,
    pub encoding: FieldEncoding,
}

impl SchemaField {
    /// Human label, falling back to the field name.
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Default answer shown by the form surfaces.
    #[must_use]
    pub fn default_value(&self) -> String {
        match &self.input {
            FieldKind::Integer { default, .. } => default.to_string(),
            FieldKind::Choice { options, default } => default
                .clone()
                .or_else(|| options.first().cloned())
                .unwrap_or_default(),
        }
    }

    /// Declared options of a choice field; empty for integer fields.
    #[must_use]
    pub fn options(&self) -> &[String] {
        match &self.input {
            FieldKind::Choice { options, .. } => options,
            FieldKind::Integer { .. } => &[],
        }
    }
}

/// Per-answer weight table of a [`DerivedFeature::WeightedSum`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub field: String,
    pub weights: BTreeMap<String, f64>,
}

/// Equality test of a [`DerivedFeature::AllOf`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub equals: String,
}

/// Engineered column computed from raw answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DerivedFeature {
    /// `ln(source + 1)` of an integer field.
    Log1p { column: String, source: String },
    /// Sum of per-answer weights; answers missing from a table add 0.
    WeightedSum {
        column: String,
        terms: Vec<WeightedTerm>,
    },
    /// 1 when every condition holds, else 0.
    AllOf {
        column: String,
        conditions: Vec<Condition>,
    },
}

impl DerivedFeature {
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::Log1p { column, .. }
            | Self::WeightedSum { column, .. }
            | Self::AllOf { column, .. } => column,
        }
    }

    fn referenced_fields(&self) -> Vec<&str> {
        match self {
            Self::Log1p { source, .. } => vec![source.as_str()],
            Self::WeightedSum { terms, .. } => terms.iter().map(|t| t.field.as_str()).collect(),
            Self::AllOf { conditions, .. } => {
                conditions.iter().map(|c| c.field.as_str()).collect()
            }
        }
    }
}

/// The declared input fields of a profile, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSchema {
    fields: Vec<SchemaField>,
}

impl InputSchema {
    #[must_use]
    pub const fn new(fields: Vec<SchemaField>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A complete encoding schema: inputs plus derived features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingSchema {
    pub name: String,
    pub inputs: InputSchema,
    #[serde(default)]
    pub derived: Vec<DerivedFeature>,
}

impl EncodingSchema {
    /// Built-in schema for a configured profile.
    #[must_use]
    pub fn for_profile(profile: EncodingProfile) -> Self {
        match profile {
            EncodingProfile::Basic => profiles::basic(),
            EncodingProfile::Enriched => profiles::enriched(),
        }
    }

    /// Load and validate a custom schema from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Io`] / [`EncodeError::Parse`] if the file cannot
    /// be read or parsed, or [`EncodeError::InvalidSchema`] if it is
    /// structurally unusable.
    pub fn from_file(path: &Path) -> Result<Self, EncodeError> {
        let content = std::fs::read_to_string(path).map_err(|source| EncodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema: Self = serde_json::from_str(&content).map_err(|source| EncodeError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        schema.validate()?;
        Ok(schema)
    }

    /// Check the schema is structurally sound.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidSchema`] describing the first problem.
    pub fn validate(&self) -> Result<(), EncodeError> {
        let invalid = |msg: String| Err(EncodeError::InvalidSchema(msg));

        if self.inputs.fields.is_empty() {
            return invalid("schema declares no input fields".into());
        }

        let mut names = HashSet::new();
        for field in &self.inputs.fields {
            if field.name.trim().is_empty() {
                return invalid("field with an empty name".into());
            }
            if !names.insert(field.name.as_str()) {
                return invalid(format!("duplicate field '{}'", field.name));
            }

            match (&field.input, &field.encoding) {
                (FieldKind::Integer { min, max, default }, FieldEncoding::Passthrough) => {
                    if min > max {
                        return invalid(format!("field '{}': min {min} > max {max}", field.name));
                    }
                    if default < min || default > max {
                        return invalid(format!(
                            "field '{}': default {default} outside [{min}, {max}]",
                            field.name
                        ));
                    }
                }
                (FieldKind::Choice { options, default }, FieldEncoding::Lookup { .. })
                | (FieldKind::Choice { options, default }, FieldEncoding::OneHot) => {
                    if options.is_empty() {
                        return invalid(format!("field '{}' declares no options", field.name));
                    }
                    let unique: HashSet<&String> = options.iter().collect();
                    if unique.len() != options.len() {
                        return invalid(format!("field '{}' repeats an option", field.name));
                    }
                    if let Some(default) = default
                        && !options.contains(default)
                    {
                        return invalid(format!(
                            "field '{}': default '{default}' is not an option",
                            field.name
                        ));
                    }
                }
                (FieldKind::Integer { .. }, _) => {
                    return invalid(format!(
                        "integer field '{}' must use passthrough encoding",
                        field.name
                    ));
                }
                (FieldKind::Choice { .. }, FieldEncoding::Passthrough) => {
                    return invalid(format!(
                        "choice field '{}' cannot use passthrough encoding",
                        field.name
                    ));
                }
            }
        }

        for derived in &self.derived {
            if derived.column().trim().is_empty() {
                return invalid("derived feature with an empty column name".into());
            }
            for referenced in derived.referenced_fields() {
                let Some(field) = self.inputs.field(referenced) else {
                    return invalid(format!(
                        "derived feature '{}' references unknown field '{referenced}'",
                        derived.column()
                    ));
                };
                if matches!(derived, DerivedFeature::Log1p { .. })
                    && !matches!(field.input, FieldKind::Integer { .. })
                {
                    return invalid(format!(
                        "derived feature '{}' needs an integer source",
                        derived.column()
                    ));
                }
            }
        }

        Ok(())
    }
}
