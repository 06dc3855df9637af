use std::path::Path;

use serde::Serialize;
use solace_core::responses::PredictionSummary;
use solace_core::{Prediction, RawInput};
use solace_encoder::InputSchema;
use solace_report::Report;

use crate::output::Tabular;

/// `predict`/`ask` output: the summary as JSON, field/value rows as a table.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SummaryView(pub PredictionSummary);

impl Tabular for SummaryView {
    fn headers(&self) -> Vec<&'static str> {
        vec!["field", "value"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let summary = &self.0;
        let mut rows = vec![
            vec!["prediction".to_string(), summary.prediction.to_string()],
            vec!["label".to_string(), summary.label.to_string()],
            vec![
                "probability".to_string(),
                format!("{:.2}%", summary.probability),
            ],
            vec![
                "recommendation_tier".to_string(),
                summary.recommendation_tier.as_str().to_string(),
            ],
            vec![
                "recommendation".to_string(),
                summary.recommendation.clone(),
            ],
        ];
        if let Some(path) = &summary.report_path {
            rows.push(vec!["report_path".to_string(), path.clone()]);
        }
        rows
    }
}

/// Render a PDF report for one prediction and write it to `path`.
///
/// Returns the path as displayed in the summary.
pub fn write_report(
    schema: &InputSchema,
    input: &RawInput,
    prediction: &Prediction,
    path: &Path,
) -> anyhow::Result<String> {
    let report = Report::new(schema, input, prediction)?;
    report.write_to(path)?;
    Ok(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use solace_core::{EncodingProfile, Prediction, RawInput};
    use solace_encoder::EncodingSchema;
    use solace_report::summarize;

    use super::{SummaryView, write_report};
    use crate::output::Tabular;

    #[test]
    fn table_rows_follow_summary_fields() {
        let prediction = Prediction::from_probability(0.8).expect("valid");
        let view = SummaryView(summarize(&prediction));
        let rows = view.rows();

        let names: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();
        assert_eq!(
            names,
            [
                "prediction",
                "label",
                "probability",
                "recommendation_tier",
                "recommendation"
            ]
        );
        assert_eq!(rows[1][1], "likely");
        assert_eq!(rows[2][1], "80.00%");
        assert_eq!(rows[3][1], "proactive_consultation");
    }

    #[test]
    fn report_path_row_appears_when_written() {
        let prediction = Prediction::from_probability(0.2).expect("valid");
        let mut summary = summarize(&prediction);
        summary.report_path = Some("out.pdf".into());
        let rows = SummaryView(summary).rows();
        assert_eq!(rows.last().map(|row| row[1].as_str()), Some("out.pdf"));
    }

    #[test]
    fn writes_pdf_to_requested_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.pdf");
        let schema = EncodingSchema::for_profile(EncodingProfile::Basic).inputs;
        let input = RawInput::new().with("Age", 30).with("Gender", "Male");
        let prediction = Prediction::from_probability(0.6).expect("valid");

        let shown = write_report(&schema, &input, &prediction, &path).expect("written");
        assert_eq!(shown, path.display().to_string());
        let bytes = std::fs::read(&path).expect("readable");
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }
}
