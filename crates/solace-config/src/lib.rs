//! # solace-config
//!
//! Layered configuration loading for Solace using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SOLACE_*` prefix, `__` as separator)
//! 2. An explicit `--config` TOML file
//! 3. Project-level `.solace/config.toml`
//! 4. User-level `~/.config/solace/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SOLACE_SERVER__PORT` -> `server.port`,
//! `SOLACE_ENCODING__STRICT` -> `encoding.strict`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use solace_config::SolaceConfig;
//!
//! let config = SolaceConfig::load_with_dotenv(None).expect("config");
//! println!("model: {}", config.artifacts.model_path.display());
//! ```

mod artifacts;
mod encoding;
mod error;
mod presentation;
mod server;

pub use artifacts::ArtifactsConfig;
pub use encoding::EncodingConfig;
pub use error::ConfigError;
pub use presentation::PresentationConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SolaceConfig {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub encoding: EncodingConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
}

impl SolaceConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if `explicit` does not exist, a
    /// figment error if any source fails to parse, or
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit
            && !path.exists()
        {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let config: Self = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if any) before building the
    /// figment, so `SOLACE_*` entries in it take part in the env layer.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".solace/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("SOLACE_").split("__"))
    }

    /// Reject values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.workers".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.host".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.presentation.report_filename.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "presentation.report_filename".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("solace").join("config.toml"))
    }
}
