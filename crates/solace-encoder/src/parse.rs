//! Typed parsing of raw answers against an [`InputSchema`].
//!
//! JSON bodies (HTTP endpoint) and `KEY=VALUE` text pairs (CLI, HTML form)
//! both end up as a [`RawInput`] holding only declared fields. Problems are
//! collected per field instead of stopping at the first one so request
//! validation can report all of them.

use std::fmt;

use serde_json::{Map, Value};
use solace_core::responses::ValidationIssue;
use solace_core::{FieldValue, RawInput};

use crate::schema::{FieldKind, InputSchema};

/// Why a field failed request validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Missing,
    NotAnInteger,
    NotAString,
    OutOfRange,
    UnknownField,
}

impl IssueKind {
    /// Machine-readable error type used in validation responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "value_error.missing",
            Self::NotAnInteger => "type_error.integer",
            Self::NotAString => "type_error.str",
            Self::OutOfRange => "value_error.number.not_in_range",
            Self::UnknownField => "value_error.extra",
        }
    }
}

/// One field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub kind: IssueKind,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &str, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            kind,
            message: message.into(),
        }
    }

    /// Convert to the `{"loc", "msg", "type"}` response entry.
    #[must_use]
    pub fn into_validation_issue(self, location: &str) -> ValidationIssue {
        ValidationIssue {
            loc: vec![location.to_string(), self.field],
            msg: self.message,
            kind: self.kind.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl InputSchema {
    /// Parse a JSON object body. Undeclared keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns every missing or wrongly typed declared field.
    pub fn parse_json(&self, body: &Map<String, Value>) -> Result<RawInput, Vec<FieldIssue>> {
        let mut input = RawInput::new();
        let mut issues = Vec::new();

        for field in self.fields() {
            let Some(value) = body.get(&field.name) else {
                issues.push(FieldIssue::new(&field.name, IssueKind::Missing, "field required"));
                continue;
            };

            match (&field.input, value) {
                (FieldKind::Integer { .. }, value) => match json_integer(value) {
                    Some(number) => input.insert(field.name.clone(), number),
                    None => issues.push(FieldIssue::new(
                        &field.name,
                        IssueKind::NotAnInteger,
                        "value is not a valid integer",
                    )),
                },
                (FieldKind::Choice { .. }, Value::String(text)) => {
                    input.insert(field.name.clone(), text.as_str());
                }
                (FieldKind::Choice { .. }, Value::Number(number)) => {
                    input.insert(field.name.clone(), number.to_string());
                }
                (FieldKind::Choice { .. }, _) => issues.push(FieldIssue::new(
                    &field.name,
                    IssueKind::NotAString,
                    "str type expected",
                )),
            }
        }

        if issues.is_empty() {
            Ok(input)
        } else {
            Err(issues)
        }
    }

    /// Parse `KEY=VALUE` text pairs. Later pairs win over earlier ones.
    ///
    /// # Errors
    ///
    /// Returns missing fields, unparsable integers and undeclared keys.
    pub fn parse_pairs(&self, pairs: &[(String, String)]) -> Result<RawInput, Vec<FieldIssue>> {
        let mut input = RawInput::new();
        let mut issues = Vec::new();

        for (key, _) in pairs {
            if self.field(key).is_none() {
                issues.push(FieldIssue::new(
                    key,
                    IssueKind::UnknownField,
                    "field is not declared by the active schema",
                ));
            }
        }

        for field in self.fields() {
            let Some((_, raw)) = pairs.iter().rev().find(|(key, _)| *key == field.name) else {
                issues.push(FieldIssue::new(&field.name, IssueKind::Missing, "field required"));
                continue;
            };

            match &field.input {
                FieldKind::Integer { .. } => match raw.trim().parse::<i64>() {
                    Ok(number) => input.insert(field.name.clone(), number),
                    Err(_) => issues.push(FieldIssue::new(
                        &field.name,
                        IssueKind::NotAnInteger,
                        "value is not a valid integer",
                    )),
                },
                FieldKind::Choice { .. } => input.insert(field.name.clone(), raw.as_str()),
            }
        }

        if issues.is_empty() {
            Ok(input)
        } else {
            Err(issues)
        }
    }

    /// Check integer answers against the form bounds (`min..=max`).
    ///
    /// Only the form surfaces bound answers; the JSON endpoint accepts any
    /// integer.
    #[must_use]
    pub fn check_bounds(&self, input: &RawInput) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        for field in self.fields() {
            let FieldKind::Integer { min, max, .. } = &field.input else {
                continue;
            };
            if let Some(value) = input.get(&field.name).and_then(FieldValue::as_integer)
                && !(*min..=*max).contains(&value)
            {
                issues.push(FieldIssue::new(
                    &field.name,
                    IssueKind::OutOfRange,
                    format!("ensure this value is between {min} and {max}"),
                ));
            }
        }
        issues
    }
}

/// Integer view of a JSON value: integers, integral floats, numeric strings.
///
/// Values outside the `i64` range are not integers.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn json_integer(value: &Value) -> Option<i64> {
    // 2^63: the first float above i64::MAX.
    const UPPER: f64 = i64::MAX as f64;
    const LOWER: f64 = i64::MIN as f64;

    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && (LOWER..UPPER).contains(f))
                .map(|f| f as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
