use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use solace_config::SolaceConfig;
use solace_server::{HttpServer, PredictionService, RunningServer};

use crate::cli::root_commands::ServeArgs;

/// Handle `solace serve`: load artifacts, bind, serve until Ctrl-C.
pub async fn handle(args: &ServeArgs, mut config: SolaceConfig) -> anyhow::Result<()> {
    apply_overrides(args, &mut config)?;

    let service =
        PredictionService::from_config(&config).context("failed to load prediction artifacts")?;
    let address = config.server.bind_address();
    let server = HttpServer::bind(&address)?;
    let running = server.start(Arc::new(service), config.server.workers);

    serve_until(running, tokio::signal::ctrl_c()).await
}

/// Wait for `signal`, then stop and join the workers whether or not the
/// signal could be awaited.
async fn serve_until<F>(running: RunningServer, signal: F) -> anyhow::Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    let signal = signal.await;
    match &signal {
        Ok(()) => tracing::info!("shutting down"),
        Err(error) => tracing::error!(%error, "cannot wait for Ctrl-C; shutting down"),
    }

    tokio::task::spawn_blocking(move || running.stop())
        .await
        .context("server workers did not stop cleanly")?;
    signal.context("failed to listen for Ctrl-C")
}

fn apply_overrides(args: &ServeArgs, config: &mut SolaceConfig) -> anyhow::Result<()> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(workers) = args.workers {
        config.server.workers = workers;
    }
    config
        .validate()
        .context("invalid server options")
}
