//! Query errors.

use analog_keycodes::KeyNotMapped;
use analog_sdk::SdkError;
use thiserror::Error;

/// Error type for query operations.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The key has no native code in the active mode. Nothing was read.
    #[error(transparent)]
    KeyNotMapped(#[from] KeyNotMapped),

    /// The SDK call failed.
    #[error(transparent)]
    Sdk(#[from] SdkError),
}

/// A specialized `Result` type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

impl QueryError {
    /// Native status behind the error, if the SDK reported one.
    pub fn status(&self) -> Option<analog_sdk::AnalogStatus> {
        match self {
            QueryError::Sdk(e) => e.status(),
            QueryError::KeyNotMapped(_) => None,
        }
    }
}
