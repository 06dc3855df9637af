//! The downloadable risk report.

use std::fmt;
use std::path::Path;

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Serialize;
use solace_core::{Label, Prediction, RawInput, RecommendationTier};
use solace_encoder::InputSchema;

use crate::error::ReportError;
use crate::pdf::PdfWriter;
use crate::presentation::{headline, recommendation};

pub const PDF_MIME: &str = "application/pdf";

/// Random 64-bit report identifier, rendered as 16 hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportId([u8; 8]);

impl ReportId {
    /// Draw a fresh identifier from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::RandomId`] if the OS source is unavailable.
    pub fn generate() -> Result<Self, ReportError> {
        let mut bytes = [0u8; 8];
        getrandom::fill(&mut bytes).map_err(|e| ReportError::RandomId(e.to_string()))?;
        Ok(Self(bytes))
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for ReportId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One echoed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub label: String,
    pub value: String,
}

/// Everything printed on the report page.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: ReportId,
    pub generated_at: DateTime<Utc>,
    /// Answers in schema order.
    pub inputs: Vec<ReportEntry>,
    pub label: Label,
    pub probability: f64,
    pub tier: RecommendationTier,
    pub recommendation: String,
}

impl Report {
    /// Build a report with a fresh id and the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::RandomId`] if no id can be drawn.
    pub fn new(
        schema: &InputSchema,
        input: &RawInput,
        prediction: &Prediction,
    ) -> Result<Self, ReportError> {
        Ok(Self::with_id(
            ReportId::generate()?,
            Utc::now(),
            schema,
            input,
            prediction,
        ))
    }

    #[must_use]
    pub fn with_id(
        id: ReportId,
        generated_at: DateTime<Utc>,
        schema: &InputSchema,
        input: &RawInput,
        prediction: &Prediction,
    ) -> Self {
        let inputs = schema
            .fields()
            .iter()
            .map(|field| ReportEntry {
                label: field.display_label().to_string(),
                value: input
                    .get(&field.name)
                    .map_or_else(|| "-".to_string(), ToString::to_string),
            })
            .collect();
        let tier = prediction.tier();
        Self {
            id,
            generated_at,
            inputs,
            label: prediction.label,
            probability: prediction.probability,
            tier,
            recommendation: recommendation(tier).to_string(),
        }
    }

    /// Render the report as a PDF, continuing onto new pages as needed.
    #[must_use]
    pub fn to_pdf(&self) -> Vec<u8> {
        let mut pdf = PdfWriter::new("Mental Health Risk Report");
        pdf.heading("Mental Health Risk Report")
            .text(&format!("Report ID: {}", self.id))
            .text(&format!(
                "Generated: {}",
                self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ))
            .blank()
            .heading("Responses");
        for entry in &self.inputs {
            pdf.text(&format!("{}: {}", entry.label, entry.value));
        }
        pdf.blank()
            .heading("Result")
            .text(&format!("Prediction: {}", headline(self.label)))
            .text(&format!("Probability: {:.2}%", self.probability * 100.0))
            .blank()
            .heading("Recommendation")
            .text(&self.recommendation);
        pdf.finish()
    }

    /// Base64 of [`Self::to_pdf`], for embedding in HTML or JSON.
    #[must_use]
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.to_pdf())
    }

    /// `data:` URI suitable for an `<a href=... download=...>` link.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{PDF_MIME};base64,{}", self.to_base64())
    }

    /// Write the PDF to a caller-chosen path.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] naming `path` on failure.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        std::fs::write(path, self.to_pdf()).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), id = %self.id, "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use solace_core::EncodingProfile;
    use solace_encoder::EncodingSchema;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    fn sample() -> RawInput {
        RawInput::new()
            .with("anonymity", "Yes")
            .with("Age", 30)
            .with("Gender", "Male")
            .with("work_interfere", "Often")
            .with("remote_work", "No")
            .with("leave", "Don't know")
            .with("benefits", "Yes")
    }

    fn report() -> Report {
        let schema = EncodingSchema::for_profile(EncodingProfile::Basic);
        Report::with_id(
            ReportId::from_bytes([0xde, 0xad, 0xbe, 0xef, 0, 1, 2, 3]),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            &schema.inputs,
            &sample(),
            &Prediction::from_probability(0.8).unwrap(),
        )
    }

    #[test]
    fn inputs_follow_schema_order() {
        let labels: Vec<_> = report().inputs.iter().map(|e| e.value.clone()).collect();
        assert_eq!(
            labels,
            ["30", "Male", "Often", "No", "Don't know", "Yes", "Yes"]
        );
    }

    #[test]
    fn pdf_carries_id_time_and_outcome() {
        let pdf = report().to_pdf();
        assert!(pdf.starts_with(b"%PDF-"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert!(contains(&pdf, b"Report ID: deadbeef00010203"));
        assert!(contains(&pdf, b"Generated: 2024-05-01 12:30:00 UTC"));
        assert!(contains(&pdf, b"Prediction: Likely to Seek Mental Health Treatment"));
        assert!(contains(&pdf, b"Probability: 80.00%"));
        assert!(contains(&pdf, b"Age: 30"));
    }

    #[test]
    fn long_answer_keeps_result_on_a_page() {
        let schema = EncodingSchema::for_profile(EncodingProfile::Basic);
        let input = sample().with("Gender", "word ".repeat(2000));
        let report = Report::with_id(
            ReportId::from_bytes([1; 8]),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            &schema.inputs,
            &input,
            &Prediction::from_probability(0.8).unwrap(),
        );
        let pdf = report.to_pdf();
        let text = String::from_utf8_lossy(&pdf);

        let pages: Vec<&str> = text.split("BT\n").skip(1).collect();
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(page.matches("T*").count() <= 43);
        }
        let result_page = pages
            .iter()
            .find(|page| page.contains("(Prediction: Likely to Seek Mental Health Treatment) Tj"))
            .expect("prediction line on some page");
        assert!(result_page.contains("(Probability: 80.00%) Tj"));
        assert!(text.contains(&format!("/Count {}", pages.len())));
    }

    #[test]
    fn data_uri_decodes_to_pdf() {
        let report = report();
        let uri = report.data_uri();
        let encoded = uri
            .strip_prefix("data:application/pdf;base64,")
            .expect("pdf data uri");
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(decoded, report.to_pdf());
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = ReportId::generate().unwrap();
        let b = ReportId::generate().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 16);
    }

    #[test]
    fn write_to_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        report().write_to(&path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));

        let err = report()
            .write_to(&dir.path().join("missing/out.pdf"))
            .expect_err("no parent dir");
        assert!(err.to_string().contains("out.pdf"));
    }
}
