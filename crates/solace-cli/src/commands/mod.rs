use solace_config::SolaceConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod ask;
pub mod encode;
pub mod predict;
pub mod schema;
pub mod serve;
pub mod shared;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: SolaceConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => serve::handle(&args, config).await,
        Commands::Predict(args) => predict::handle(&args, &config, flags),
        Commands::Ask(args) => ask::handle(&args, &config, flags),
        Commands::Encode(args) => encode::handle(&args, &config, flags),
        Commands::Schema => schema::handle(&config, flags),
    }
}
