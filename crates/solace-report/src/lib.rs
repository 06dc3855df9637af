//! # solace-report
//!
//! Presentation of a [`Prediction`](solace_core::Prediction): the banner and
//! recommendation text shown by interactive surfaces, the summary printed by
//! the CLI, and a paginated PDF report.
//!
//! Reports are built in memory and never pass through a shared file. Each one
//! carries a random [`ReportId`]; the HTML form embeds it as a base64 `data:`
//! URI and the CLI writes it only to a path the caller names.

pub mod error;
mod pdf;
mod presentation;
mod report;

pub use error::ReportError;
pub use pdf::PdfWriter;
pub use presentation::{
    LIKELY_HEADLINE, NOT_LIKELY_HEADLINE, banner, format_percent, headline, recommendation,
    summarize,
};
pub use report::{PDF_MIME, Report, ReportEntry, ReportId};
