use anyhow::Context;
use serde::Serialize;
use solace_config::SolaceConfig;
use solace_encoder::{EncodingSchema, FieldKind};

use crate::cli::GlobalFlags;
use crate::output::{Tabular, output};

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct SchemaView(EncodingSchema);

impl Tabular for SchemaView {
    fn headers(&self) -> Vec<&'static str> {
        vec!["field", "input", "default", "label"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = self
            .0
            .inputs
            .fields()
            .iter()
            .map(|field| {
                let input = match &field.input {
                    FieldKind::Integer { min, max, .. } => format!("integer {min}..={max}"),
                    FieldKind::Choice { options, .. } => options.join(" | "),
                };
                vec![
                    field.name.clone(),
                    input,
                    field.default_value(),
                    field.display_label().to_string(),
                ]
            })
            .collect();

        rows.extend(self.0.derived.iter().map(|derived| {
            vec![
                derived.column().to_string(),
                "derived".to_string(),
                "-".to_string(),
                String::new(),
            ]
        }));
        rows
    }
}

/// Handle `solace schema`.
pub fn handle(config: &SolaceConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match &config.encoding.schema_path {
        Some(path) => EncodingSchema::from_file(path)
            .with_context(|| format!("failed to load schema {}", path.display()))?,
        None => EncodingSchema::for_profile(config.encoding.profile),
    };
    output(&SchemaView(schema), flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use solace_core::EncodingProfile;
    use solace_encoder::EncodingSchema;

    use super::SchemaView;
    use crate::output::Tabular;

    #[test]
    fn basic_profile_rows() {
        let view = SchemaView(EncodingSchema::for_profile(EncodingProfile::Basic));
        let rows = view.rows();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0][..3], ["Age", "integer 18..=70", "30"]);
        assert_eq!(rows[1][1], "Male | Female | Non-binary/Other");
    }

    #[test]
    fn enriched_profile_lists_derived_columns() {
        let view = SchemaView(EncodingSchema::for_profile(EncodingProfile::Enriched));
        let derived: Vec<String> = view
            .rows()
            .into_iter()
            .filter(|row| row[1] == "derived")
            .map(|row| row[0].clone())
            .collect();
        assert_eq!(derived, ["log_age", "support_score", "high_risk_workplace"]);
    }
}
