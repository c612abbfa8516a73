//! Session configuration.
//!
//! Loaded from JSON, with environment overrides applied on top:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ANALOG_SDK_LIBRARY` | `library_path` |
//! | `ANALOG_SDK_MODE` | `keycode_mode` |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use analog_keycodes::KeyCodeMode;

use crate::native::default_library_name;

/// Environment variable overriding the library path.
pub const LIBRARY_ENV: &str = "ANALOG_SDK_LIBRARY";
/// Environment variable overriding the keycode mode.
pub const MODE_ENV: &str = "ANALOG_SDK_MODE";

/// Default number of devices enumerated per call.
pub const DEFAULT_DEVICE_CAPACITY: usize = 16;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("Failed to access config file {path}: {source}")]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    /// An environment override has an unusable value.
    #[error("Invalid value {value:?} for {var}")]
    InvalidOverride {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
}

/// How to reach the SDK and set up a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Library to load. `None` searches for the platform wrapper name.
    pub library_path: Option<PathBuf>,
    /// Mode selected right after initialisation.
    pub keycode_mode: KeyCodeMode,
    /// Maximum devices returned by one enumeration.
    pub device_capacity: usize,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            library_path: None,
            keycode_mode: KeyCodeMode::Hid,
            device_capacity: DEFAULT_DEVICE_CAPACITY,
        }
    }
}

impl SdkConfig {
    /// Defaults with environment overrides applied.
    ///
    /// Invalid overrides are logged and ignored.
    pub fn from_env() -> Self {
        let config = Self::default();
        match config.clone().with_overrides(|var| std::env::var(var).ok()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring environment overrides");
                config
            }
        }
    }

    /// Read configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SdkConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "Loaded SDK config");
        Ok(config)
    }

    /// Read configuration from `path` if given, then apply environment overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.with_overrides(|var| std::env::var(var).ok())
    }

    /// Write configuration as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(io_error)?;
        tracing::debug!(path = %path.display(), "Saved SDK config");
        Ok(())
    }

    /// Apply overrides looked up by variable name.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(library) = lookup(LIBRARY_ENV).filter(|v| !v.is_empty()) {
            self.library_path = Some(PathBuf::from(library));
        }
        if let Some(mode) = lookup(MODE_ENV).filter(|v| !v.is_empty()) {
            match mode.parse() {
                Ok(parsed) => self.keycode_mode = parsed,
                Err(_) => {
                    return Err(ConfigError::InvalidOverride {
                        var: MODE_ENV,
                        value: mode,
                    });
                }
            }
        }
        Ok(self)
    }

    /// Library path to load, falling back to the platform wrapper name.
    pub fn library(&self) -> PathBuf {
        self.library_path.clone().unwrap_or_else(default_library_name)
    }
}
