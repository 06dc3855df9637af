use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use solace_config::SolaceConfig;
use solace_core::{Prediction, RawInput};
use solace_encoder::{FieldKind, InputSchema, SchemaField};
use solace_report::{banner, format_percent, recommendation};
use solace_server::PredictionService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AskArgs;
use crate::commands::shared::input::invalid_answers;
use crate::commands::shared::summary::write_report;

/// Line-oriented survey over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read answer")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn answer(&mut self) -> anyhow::Result<String> {
        self.output.flush()?;
        match self.read_line()? {
            Some(line) => Ok(line),
            None => bail!("input closed before the survey was complete"),
        }
    }

    /// Ask one field until the answer is acceptable. Enter takes the default.
    pub fn ask_field(&mut self, field: &SchemaField) -> anyhow::Result<String> {
        let default = field.default_value();
        match &field.input {
            FieldKind::Integer { min, max, .. } => loop {
                write!(
                    self.output,
                    "{} [{min}-{max}] ({default}): ",
                    field.display_label()
                )?;
                let line = self.answer()?;
                let raw = if line.is_empty() { default.as_str() } else { line.as_str() };
                match raw.parse::<i64>() {
                    Ok(value) if (*min..=*max).contains(&value) => return Ok(value.to_string()),
                    _ => writeln!(
                        self.output,
                        "  Please enter a whole number between {min} and {max}."
                    )?,
                }
            },
            FieldKind::Choice { options, .. } => {
                writeln!(self.output, "{}", field.display_label())?;
                for (index, option) in options.iter().enumerate() {
                    writeln!(self.output, "  {}) {option}", index + 1)?;
                }
                loop {
                    write!(self.output, "Choice ({default}): ")?;
                    let line = self.answer()?;
                    if line.is_empty() {
                        return Ok(default);
                    }
                    if let Some(option) = pick_option(options, &line) {
                        return Ok(option.to_string());
                    }
                    writeln!(
                        self.output,
                        "  Please enter a number from 1 to {} or one of the options.",
                        options.len()
                    )?;
                }
            }
        }
    }

    /// Ask every field of `schema` in order.
    pub fn survey(&mut self, schema: &InputSchema) -> anyhow::Result<RawInput> {
        let mut pairs = Vec::with_capacity(schema.fields().len());
        for field in schema.fields() {
            let value = self.ask_field(field)?;
            pairs.push((field.name.clone(), value));
        }
        schema
            .parse_pairs(&pairs)
            .map_err(|issues| invalid_answers(&issues))
    }

    /// Yes/no question; anything but `y`/`yes` (or closed input) is no.
    pub fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        write!(self.output, "{question} [y/N]: ")?;
        self.output.flush()?;
        Ok(self
            .read_line()?
            .is_some_and(|line| matches!(line.to_ascii_lowercase().as_str(), "y" | "yes")))
    }

    /// Print the banner, plus probability and advice in detailed mode.
    pub fn show_result(&mut self, prediction: &Prediction, detailed: bool) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", banner(prediction.label))?;
        if detailed {
            writeln!(
                self.output,
                "Probability of seeking treatment: {}",
                format_percent(prediction)
            )?;
            writeln!(
                self.output,
                "Recommendation: {}",
                recommendation(prediction.tier())
            )?;
        }
        writeln!(self.output)
    }

    pub fn note(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

fn pick_option<'a>(options: &'a [String], line: &str) -> Option<&'a str> {
    if let Ok(number) = line.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| options.get(index))
            .map(String::as_str);
    }
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(line))
        .map(String::as_str)
}

/// Handle `solace ask`.
pub fn handle(args: &AskArgs, config: &SolaceConfig, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let service =
        PredictionService::from_config(config).context("failed to load prediction artifacts")?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    let inputs = &service.schema().inputs;
    let answers = prompter.survey(inputs)?;
    let prediction = service.predict(&answers)?;
    let presentation = service.presentation();
    prompter.show_result(&prediction, presentation.detailed)?;

    let report_path = match &args.report {
        Some(path) => Some(path.clone()),
        None if presentation.report
            && prompter.confirm("Save a PDF report of this assessment?")? =>
        {
            Some(PathBuf::from(&presentation.report_filename))
        }
        None => None,
    };

    if let Some(path) = report_path {
        let written = write_report(inputs, &answers, &prediction, &path)?;
        prompter.note(&format!("Report saved to {written}"))?;
    }
    Ok(())
}
