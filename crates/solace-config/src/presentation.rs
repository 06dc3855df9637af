//! Presentation settings for the interactive surfaces.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

fn default_report_filename() -> String {
    "mental_health_risk_report.pdf".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PresentationConfig {
    /// Show probability and recommendation next to the banner.
    #[serde(default = "default_true")]
    pub detailed: bool,

    /// Offer the PDF summary for download.
    #[serde(default = "default_true")]
    pub report: bool,

    /// Download name of the PDF summary.
    #[serde(default = "default_report_filename")]
    pub report_filename: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            detailed: true,
            report: true,
            report_filename: default_report_filename(),
        }
    }
}
