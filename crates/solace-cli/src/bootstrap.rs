use anyhow::Context;
use solace_config::SolaceConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, `.env` included.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SolaceConfig> {
    let config = SolaceConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load solace configuration")?;

    for (name, path) in [
        ("model", &config.artifacts.model_path),
        ("feature list", &config.artifacts.feature_list_path),
    ] {
        if !path.exists() {
            tracing::debug!(artifact = name, path = %path.display(), "artifact not found yet");
        }
    }

    Ok(config)
}
