//! Server-rendered pages for the interactive form.

use std::fmt::Write as _;

use solace_core::RawInput;
use solace_encoder::{FieldKind, InputSchema, SchemaField};

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:1rem;font-weight:bold}\
select,input[type=range]{width:100%}\
.banner{padding:1rem;border-radius:.4rem;margin:1rem 0}\
.likely{background:#e6f4ea}.not-likely{background:#fef7e0}\
.errors{color:#b00020}";

/// What the result page shows below the banner.
#[derive(Debug, Clone, Default)]
pub struct ResultDetails {
    pub probability: Option<String>,
    pub recommendation: Option<String>,
    /// `(data_uri, filename)` of the PDF report.
    pub report: Option<(String, String)>,
}

/// Escape text for element content and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Mental Health Treatment Prediction</title>\n<style>{STYLE}</style>\n\
         </head>\n<body>\n<h1>🧠 Mental Health Treatment Prediction</h1>\n{body}</body>\n</html>\n"
    )
}

/// The input form. `values` pre-fills a resubmission; `errors` are listed above it.
#[must_use]
pub fn form_page(schema: &InputSchema, values: Option<&RawInput>, errors: &[String]) -> String {
    let mut body = String::from(
        "<p>Predicts whether an individual is likely to seek treatment for mental health \
         based on workplace-related factors.</p>\n",
    );

    if !errors.is_empty() {
        body.push_str("<ul class=\"errors\">\n");
        for error in errors {
            let _ = writeln!(body, "<li>{}</li>", escape(error));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<form method=\"post\" action=\"/form\">\n");
    for field in schema.fields() {
        let current = values
            .and_then(|v| v.get(&field.name))
            .map_or_else(|| field.default_value(), ToString::to_string);
        push_field(&mut body, field, &current);
    }
    body.push_str("<p><button type=\"submit\">Predict</button></p>\n</form>\n");
    page(&body)
}

fn push_field(body: &mut String, field: &SchemaField, current: &str) {
    let name = escape(&field.name);
    let label = escape(field.display_label());
    match &field.input {
        FieldKind::Integer { min, max, .. } => {
            let _ = writeln!(
                body,
                "<label for=\"{name}\">{label}: <output id=\"{name}-value\">{value}</output></label>\n\
                 <input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" \
                 value=\"{value}\" oninput=\"document.getElementById('{name}-value').value=this.value\">",
                value = escape(current),
            );
        }
        FieldKind::Choice { options, .. } => {
            let _ = writeln!(
                body,
                "<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\">"
            );
            for option in options {
                let selected = if option == current { " selected" } else { "" };
                let option = escape(option);
                let _ = writeln!(
                    body,
                    "<option value=\"{option}\"{selected}>{option}</option>"
                );
            }
            body.push_str("</select>\n");
        }
    }
}

/// The outcome page.
#[must_use]
pub fn result_page(banner: &str, likely: bool, details: &ResultDetails) -> String {
    let class = if likely { "likely" } else { "not-likely" };
    let mut body = format!(
        "<div class=\"banner {class}\"><strong>{}</strong></div>\n",
        escape(banner)
    );
    if let Some(probability) = &details.probability {
        let _ = writeln!(
            body,
            "<p>Probability of seeking treatment: <strong>{}</strong></p>",
            escape(probability)
        );
    }
    if let Some(recommendation) = &details.recommendation {
        let _ = writeln!(body, "<p>{}</p>", escape(recommendation));
    }
    if let Some((uri, filename)) = &details.report {
        let _ = writeln!(
            body,
            "<p><a href=\"{}\" download=\"{}\">Download PDF report</a></p>",
            escape(uri),
            escape(filename)
        );
    }
    body.push_str("<p><a href=\"/\">Start over</a></p>\n");
    page(&body)
}

/// Minimal page for failures that have no better surface.
#[must_use]
pub fn error_page(message: &str) -> String {
    page(&format!(
        "<p class=\"errors\">{}</p>\n<p><a href=\"/\">Back</a></p>\n",
        escape(message)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_core::EncodingProfile;
    use solace_encoder::EncodingSchema;

    fn inputs() -> InputSchema {
        EncodingSchema::for_profile(EncodingProfile::Basic).inputs
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<b>\"Don't\" & co</b>"),
            "&lt;b&gt;&quot;Don&#39;t&quot; &amp; co&lt;/b&gt;"
        );
    }

    #[test]
    fn form_renders_slider_and_selects_with_defaults() {
        let html = form_page(&inputs(), None, &[]);
        assert!(html.contains(
            "type=\"range\" id=\"Age\" name=\"Age\" min=\"18\" max=\"70\" value=\"30\""
        ));
        assert!(html.contains("<select id=\"Gender\" name=\"Gender\">"));
        assert!(html.contains("<option value=\"Male\" selected>Male</option>"));
        assert!(html.contains("<option value=\"Don&#39;t know\">Don&#39;t know</option>"));
        assert!(html.contains("<button type=\"submit\">Predict</button>"));
    }

    #[test]
    fn form_keeps_submitted_values_and_lists_errors() {
        let values = RawInput::new().with("Age", 44).with("Gender", "Female");
        let html = form_page(&inputs(), Some(&values), &["Age: too old".into()]);
        assert!(html.contains("value=\"44\""));
        assert!(html.contains("<option value=\"Female\" selected>"));
        assert!(html.contains("<li>Age: too old</li>"));
    }

    #[test]
    fn result_page_shows_details_and_download() {
        let details = ResultDetails {
            probability: Some("79.67%".into()),
            recommendation: Some("See someone.".into()),
            report: Some((
                "data:application/pdf;base64,JVBERi0=".into(),
                "mental_health_risk_report.pdf".into(),
            )),
        };
        let html = result_page("✅ Likely to Seek Mental Health Treatment", true, &details);
        assert!(html.contains("✅ Likely to Seek Mental Health Treatment"));
        assert!(html.contains("79.67%"));
        assert!(html.contains("download=\"mental_health_risk_report.pdf\""));
        assert!(html.contains("href=\"data:application/pdf;base64,JVBERi0=\""));
    }

    #[test]
    fn result_page_without_details_is_banner_only() {
        let html = result_page("❌ Not", false, &ResultDetails::default());
        assert!(html.contains("not-likely"));
        assert!(!html.contains("Probability"));
        assert!(!html.contains("download="));
    }
}
