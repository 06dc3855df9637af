use std::path::Path;

use anyhow::{Context, bail};
use serde_json::{Map, Value};
use solace_core::RawInput;
use solace_encoder::{FieldIssue, InputSchema};

use crate::cli::root_commands::InputArgs;

/// Split a `FIELD=VALUE` argument on its first `=`.
pub fn split_pair(raw: &str) -> anyhow::Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("invalid answer '{raw}': expected FIELD=VALUE");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("invalid answer '{raw}': field name is empty");
    }
    Ok((key.to_string(), value.to_string()))
}

/// Read a JSON object of answers from disk.
pub fn read_input_file(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse input file {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("input file {} must contain a JSON object", path.display()),
    }
}

/// Merge file answers and command-line pairs into text pairs.
///
/// File keys the schema does not declare are ignored. Command-line pairs come
/// last so they override the file.
pub fn collect_pairs(
    schema: &InputSchema,
    file: Option<&Map<String, Value>>,
    pairs: &[String],
) -> anyhow::Result<Vec<(String, String)>> {
    let mut collected = Vec::new();

    if let Some(object) = file {
        for field in schema.fields() {
            let Some(value) = object.get(&field.name) else {
                continue;
            };
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Number(number) => number.to_string(),
                _ => bail!(
                    "input file field '{}' must be a string or a number",
                    field.name
                ),
            };
            collected.push((field.name.clone(), text));
        }
    }

    for raw in pairs {
        collected.push(split_pair(raw)?);
    }

    Ok(collected)
}

/// Build a validated record from `--input` and `FIELD=VALUE` arguments.
pub fn read_input(schema: &InputSchema, args: &InputArgs) -> anyhow::Result<RawInput> {
    let file = args.input.as_deref().map(read_input_file).transpose()?;
    let pairs = collect_pairs(schema, file.as_ref(), &args.pairs)?;
    schema
        .parse_pairs(&pairs)
        .map_err(|issues| invalid_answers(&issues))
}

/// One error listing every field problem.
pub fn invalid_answers(issues: &[FieldIssue]) -> anyhow::Error {
    let details = issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    anyhow::anyhow!("invalid answers: {details}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use solace_core::{EncodingProfile, FieldValue};
    use solace_encoder::EncodingSchema;

    use super::{collect_pairs, read_input, split_pair};
    use crate::cli::root_commands::InputArgs;

    fn schema() -> solace_encoder::InputSchema {
        EncodingSchema::for_profile(EncodingProfile::Basic).inputs
    }

    fn full_pairs() -> Vec<String> {
        [
            "Age=30",
            "Gender=Male",
            "work_interfere=Often",
            "remote_work=No",
            "leave=Don't know",
            "benefits=Yes",
            "anonymity=Yes",
        ]
        .iter()
        .map(|pair| (*pair).to_string())
        .collect()
    }

    #[test]
    fn splits_on_first_equals_sign() {
        assert_eq!(
            split_pair("leave=Don't know").expect("pair"),
            ("leave".to_string(), "Don't know".to_string())
        );
        assert_eq!(
            split_pair("note=a=b").expect("pair"),
            ("note".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn rejects_pairs_without_field_name() {
        assert!(split_pair("Age").is_err());
        let err = split_pair("=30").expect_err("empty key");
        assert!(err.to_string().contains("field name is empty"));
    }

    #[test]
    fn command_line_pairs_override_file_answers() {
        let file = json!({ "Age": 52, "Gender": "Female", "comment": "ignored" });
        let serde_json::Value::Object(object) = file else {
            panic!("object literal");
        };
        let pairs = collect_pairs(&schema(), Some(&object), &["Age=30".to_string()])
            .expect("collects");

        assert_eq!(
            pairs,
            [
                ("Age".to_string(), "52".to_string()),
                ("Gender".to_string(), "Female".to_string()),
                ("Age".to_string(), "30".to_string()),
            ]
        );

        let mut with_rest = pairs;
        with_rest.extend(
            full_pairs()
                .iter()
                .skip(2)
                .map(|raw| split_pair(raw).expect("pair")),
        );
        let input = schema().parse_pairs(&with_rest).expect("complete");
        assert_eq!(input.get("Age"), Some(&FieldValue::Integer(30)));
        assert_eq!(input.get("Gender"), Some(&FieldValue::from("Female")));
    }

    #[test]
    fn file_values_must_be_scalars() {
        let serde_json::Value::Object(object) = json!({ "Gender": ["Male"] }) else {
            panic!("object literal");
        };
        let err = collect_pairs(&schema(), Some(&object), &[]).expect_err("array value");
        assert!(err.to_string().contains("'Gender'"));
    }

    #[test]
    fn reads_input_file_and_reports_missing_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"Age": 30, "Gender": "Male"}"#).expect("write");

        let args = InputArgs {
            pairs: Vec::new(),
            input: Some(path),
        };
        let err = read_input(&schema(), &args).expect_err("incomplete");
        let message = err.to_string();
        assert!(message.starts_with("invalid answers:"));
        assert!(message.contains("work_interfere: field required"));
    }

    #[test]
    fn pairs_alone_build_a_complete_record() {
        let args = InputArgs {
            pairs: full_pairs(),
            input: None,
        };
        let input = read_input(&schema(), &args).expect("complete");
        assert_eq!(input.len(), 7);
    }
}
