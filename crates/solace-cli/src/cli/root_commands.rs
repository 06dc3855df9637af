use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP endpoint and the HTML form.
    Serve(ServeArgs),
    /// Predict from KEY=VALUE answers or a JSON file.
    Predict(PredictArgs),
    /// Answer the survey interactively in the terminal.
    Ask(AskArgs),
    /// Show the encoded feature vector for a record.
    Encode(EncodeArgs),
    /// Print the active input schema.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Bind host (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides server.port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Worker threads (overrides server.workers)
    #[arg(long)]
    pub workers: Option<usize>,
}

/// Record answers shared by `predict` and `encode`.
#[derive(Clone, Debug, Args)]
pub struct InputArgs {
    /// Answers as FIELD=VALUE
    #[arg(value_name = "FIELD=VALUE")]
    pub pairs: Vec<String>,

    /// JSON object with answers; FIELD=VALUE pairs override it
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also write a PDF report to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    /// Also write a PDF report to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub input: InputArgs,
}
