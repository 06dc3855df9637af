//! Built-in encoding profiles.

use std::collections::BTreeMap;

use crate::schema::{
    Condition, DerivedFeature, EncodingSchema, FieldEncoding, FieldKind, InputSchema, SchemaField,
    WeightedTerm,
};

const YES_NO: &[&str] = &["Yes", "No"];
const YES_NO_DONT_KNOW: &[&str] = &["Yes", "No", "Don't know"];

/// The seven survey fields of the prediction endpoint.
#[must_use]
pub fn basic() -> EncodingSchema {
    EncodingSchema {
        name: "basic".into(),
        inputs: InputSchema::new(basic_fields()),
        derived: Vec::new(),
    }
}

/// Basic fields plus care options, wellness program and consequence answers,
/// with `log_age`, `support_score` and `high_risk_workplace`.
#[must_use]
pub fn enriched() -> EncodingSchema {
    let mut fields = basic_fields();
    fields.push(one_hot(
        "care_options",
        "Do you know the options for mental health care your employer provides?",
        &["Yes", "No", "Not sure"],
    ));
    fields.push(one_hot(
        "wellness_program",
        "Has your employer ever discussed mental health as part of a wellness program?",
        YES_NO_DONT_KNOW,
    ));
    fields.push(one_hot(
        "mental_health_consequence",
        "Would discussing a mental health issue with your employer have negative consequences?",
        &["Yes", "No", "Maybe"],
    ));

    let support = weights(&[("Yes", 2.0), ("Not sure", 1.0), ("Don't know", 1.0)]);

    EncodingSchema {
        name: "enriched".into(),
        inputs: InputSchema::new(fields),
        derived: vec![
            DerivedFeature::Log1p {
                column: "log_age".into(),
                source: "Age".into(),
            },
            DerivedFeature::WeightedSum {
                column: "support_score".into(),
                terms: ["benefits", "care_options", "wellness_program"]
                    .into_iter()
                    .map(|field| WeightedTerm {
                        field: field.into(),
                        weights: support.clone(),
                    })
                    .collect(),
            },
            DerivedFeature::AllOf {
                column: "high_risk_workplace".into(),
                conditions: vec![
                    Condition {
                        field: "work_interfere".into(),
                        equals: "Often".into(),
                    },
                    Condition {
                        field: "mental_health_consequence".into(),
                        equals: "Yes".into(),
                    },
                ],
            },
        ],
    }
}

fn basic_fields() -> Vec<SchemaField> {
    vec![
        SchemaField {
            name: "Age".into(),
            label: "Age".into(),
            input: FieldKind::Integer {
                min: 18,
                max: 70,
                default: 30,
            },
            encoding: FieldEncoding::Passthrough,
        },
        lookup(
            "Gender",
            "Gender",
            &["Male", "Female", "Non-binary/Other"],
            &[("Male", 1.0), ("Female", 0.0), ("Non-binary/Other", 0.0)],
        ),
        one_hot(
            "work_interfere",
            "How often does your mental health interfere with work?",
            &["Often", "Sometimes", "Rarely", "Never", "Unknown"],
        ),
        lookup(
            "remote_work",
            "Do you work remotely?",
            YES_NO,
            &[("Yes", 1.0), ("No", 0.0)],
        ),
        one_hot(
            "leave",
            "Ease of taking mental health leave",
            &[
                "Very easy",
                "Somewhat easy",
                "Somewhat difficult",
                "Very difficult",
                "Don't know",
            ],
        ),
        lookup(
            "benefits",
            "Does your employer provide mental health benefits?",
            YES_NO_DONT_KNOW,
            &[("Yes", 1.0), ("No", 0.0), ("Don't know", 0.0)],
        ),
        lookup(
            "anonymity",
            "Is anonymity protected if you choose to seek mental health treatment?",
            YES_NO_DONT_KNOW,
            &[("Yes", 1.0), ("No", 0.0), ("Don't know", 0.0)],
        ),
    ]
}

fn lookup(name: &str, label: &str, options: &[&str], table: &[(&str, f64)]) -> SchemaField {
    SchemaField {
        name: name.into(),
        label: label.into(),
        input: choice(options),
        encoding: FieldEncoding::Lookup {
            table: weights(table),
        },
    }
}

fn one_hot(name: &str, label: &str, options: &[&str]) -> SchemaField {
    SchemaField {
        name: name.into(),
        label: label.into(),
        input: choice(options),
        encoding: FieldEncoding::OneHot,
    }
}

fn choice(options: &[&str]) -> FieldKind {
    FieldKind::Choice {
        options: options.iter().map(|o| (*o).to_string()).collect(),
        default: None,
    }
}

fn weights(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), *value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_declares_endpoint_fields_in_order() {
        let names: Vec<_> = basic()
            .inputs
            .fields()
            .iter()
            .map(|f| f.name.clone())
            .collect();
        assert_eq!(
            names,
            [
                "Age",
                "Gender",
                "work_interfere",
                "remote_work",
                "leave",
                "benefits",
                "anonymity"
            ]
        );
    }

    #[test]
    fn enriched_extends_basic() {
        let schema = enriched();
        assert_eq!(schema.inputs.fields().len(), 10);
        let derived: Vec<_> = schema.derived.iter().map(DerivedFeature::column).collect();
        assert_eq!(derived, ["log_age", "support_score", "high_risk_workplace"]);
    }
}
