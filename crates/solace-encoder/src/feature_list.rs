//! Feature-list artifact and column alignment.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::error::EncodeError;

/// Ordered column names the model was trained on.
///
/// Loaded once at start-up and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct FeatureList {
    columns: Arc<[String]>,
    positions: HashMap<String, usize>,
}

impl FeatureList {
    /// Build a feature list from column names.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidFeatureList`] if the list is empty,
    /// contains an empty name, or repeats a column.
    pub fn new(columns: Vec<String>) -> Result<Self, EncodeError> {
        if columns.is_empty() {
            return Err(EncodeError::InvalidFeatureList(
                "feature list is empty".into(),
            ));
        }

        let mut positions = HashMap::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            if column.is_empty() {
                return Err(EncodeError::InvalidFeatureList(format!(
                    "empty column name at position {index}"
                )));
            }
            if positions.insert(column.clone(), index).is_some() {
                return Err(EncodeError::InvalidFeatureList(format!(
                    "duplicate column '{column}'"
                )));
            }
        }

        Ok(Self {
            columns: columns.into(),
            positions,
        })
    }

    /// Load from a JSON array of column names.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Io`] / [`EncodeError::Parse`] if the file cannot
    /// be read or is not a JSON string array, or
    /// [`EncodeError::InvalidFeatureList`] if the list is unusable.
    pub fn from_file(path: &Path) -> Result<Self, EncodeError> {
        let content = std::fs::read_to_string(path).map_err(|source| EncodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let columns: Vec<String> =
            serde_json::from_str(&content).map_err(|source| EncodeError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(columns)
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    /// Reduce and reorder an encoded row to exactly this list's columns.
    ///
    /// Columns the row lacks are zero-filled; columns the list lacks are
    /// dropped. Both are reported so callers can log or reject them.
    #[must_use]
    pub fn align(&self, row: &EncodedRow) -> Alignment {
        let mut values = Vec::with_capacity(self.columns.len());
        let mut zero_filled = Vec::new();
        for column in self.columns.iter() {
            if let Some(value) = row.get(column) {
                values.push(value);
            } else {
                values.push(0.0);
                zero_filled.push(column.clone());
            }
        }

        let dropped = row
            .columns()
            .filter(|column| !self.contains(column))
            .map(str::to_string)
            .collect();

        Alignment {
            vector: FeatureVector {
                columns: Arc::clone(&self.columns),
                values,
            },
            zero_filled,
            dropped,
        }
    }
}

/// Encoded columns before alignment, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EncodedRow {
    values: BTreeMap<String, f64>,
}

impl EncodedRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: impl Into<String>, value: f64) {
        self.values.insert(column.into(), value);
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of [`FeatureList::align`].
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub vector: FeatureVector,
    pub zero_filled: Vec<String>,
    pub dropped: Vec<String>,
}

/// A single numeric row in feature-list order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Arc<[String]>,
    values: Vec<f64>,
}

impl FeatureVector {
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named column, if the feature list has it.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|index| self.values[index])
    }

    /// `(column, value)` pairs in feature-list order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, &value)?;
        }
        map.end()
    }
}
