//! Configuration resolution: file, then environment, then command-line flags

use std::path::Path;

use analog_query::QueryConfig;
use analog_sdk::{ConfigError, SdkConfig};
use serde::{Deserialize, Serialize};

use crate::Cli;
use crate::error::CliError;

/// On-disk configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub sdk: SdkConfig,
    pub query: QueryConfig,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

/// Effective settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sdk: SdkConfig,
    pub query: QueryConfig,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self, CliError> {
        let file = match &cli.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let sdk = file.sdk.with_overrides(|var| std::env::var(var).ok())?;
        Ok(Self::from_parts(sdk, file.query, cli))
    }

    fn from_parts(mut sdk: SdkConfig, query: QueryConfig, cli: &Cli) -> Self {
        if let Some(library) = &cli.library {
            sdk.library_path = Some(library.clone());
        }
        if let Some(mode) = cli.mode {
            sdk.keycode_mode = mode;
        }
        Self { sdk, query }
    }
}
