//! Error types for analogctl

use analog_query::QueryError;
use analog_sdk::{ConfigError, SdkError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("SDK unavailable: {0}")]
    SdkUnavailable(#[source] SdkError),

    #[error("SDK call failed: {0}")]
    SdkFailure(#[source] SdkError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<SdkError> for CliError {
    fn from(error: SdkError) -> Self {
        match error {
            SdkError::LibraryLoad { .. } | SdkError::MissingSymbol(_) => {
                CliError::SdkUnavailable(error)
            }
            SdkError::Config(e) => CliError::Config(e),
            other => CliError::SdkFailure(other),
        }
    }
}

impl From<QueryError> for CliError {
    fn from(error: QueryError) -> Self {
        match error {
            QueryError::KeyNotMapped(e) => CliError::InvalidArgument(e.to_string()),
            QueryError::Sdk(e) => CliError::from(e),
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidArgument(_) => 2,
            CliError::SdkUnavailable(_) => 3,
            CliError::SdkFailure(_) => 4,
            CliError::Config(_) | CliError::Json(_) => 5,
        }
    }
}

/// Exit code for any error surfaced from a command.
pub fn exit_code_for(error: &anyhow::Error) -> u8 {
    error.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
