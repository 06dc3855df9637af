use anyhow::Context;
use solace_config::SolaceConfig;
use solace_report::summarize;
use solace_server::PredictionService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PredictArgs;
use crate::commands::shared::input::read_input;
use crate::commands::shared::summary::{SummaryView, write_report};
use crate::output::output;

/// Handle `solace predict`.
pub fn handle(args: &PredictArgs, config: &SolaceConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service =
        PredictionService::from_config(config).context("failed to load prediction artifacts")?;
    let input = read_input(&service.schema().inputs, &args.input)?;
    let prediction = service.predict(&input)?;

    let mut summary = summarize(&prediction);
    if let Some(path) = &args.report {
        summary.report_path = Some(write_report(
            &service.schema().inputs,
            &input,
            &prediction,
            path,
        )?);
    }

    output(&SummaryView(summary), flags.format)
}
