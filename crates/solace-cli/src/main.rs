use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("solace error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let default_level = if matches!(cli.command, cli::Commands::Serve(_)) {
        "info"
    } else {
        "warn"
    };
    let flags = cli.global_flags();
    init_tracing(&flags, default_level)?;
    ui::init(&flags);

    let config = bootstrap::load_config(&flags)?;
    commands::dispatch(cli.command, config, &flags).await
}

fn init_tracing(flags: &cli::GlobalFlags, default_level: &str) -> anyhow::Result<()> {
    let level = if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        default_level
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SOLACE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
