use anyhow::Context;
use serde::Serialize;
use solace_config::SolaceConfig;
use solace_encoder::EncodingReport;
use solace_server::PredictionService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EncodeArgs;
use crate::commands::shared::input::read_input;
use crate::output::{Tabular, number_cell, output};

/// Aligned vector plus diagnostics; the table shows the vector only.
#[derive(Debug, Serialize)]
#[serde(transparent)]
struct EncodingView(EncodingReport);

impl Tabular for EncodingView {
    fn headers(&self) -> Vec<&'static str> {
        vec!["column", "value"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.0
            .vector
            .iter()
            .map(|(column, value)| vec![column.to_string(), number_cell(value)])
            .collect()
    }
}

/// Handle `solace encode`.
///
/// Needs only the feature list and schema, so it also works while the model
/// artifact is missing or out of date.
pub fn handle(args: &EncodeArgs, config: &SolaceConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let encoder =
        PredictionService::load_encoder(config).context("failed to load encoding artifacts")?;
    let input = read_input(&encoder.schema().inputs, &args.input)?;
    let report = encoder.encode_with_report(&input)?;

    if !report.dropped.is_empty() || !report.unknown.is_empty() {
        tracing::warn!(
            dropped = ?report.dropped,
            unknown = report.unknown.len(),
            "some answers have no column in the feature list"
        );
    }

    output(&EncodingView(report), flags.format)
}
