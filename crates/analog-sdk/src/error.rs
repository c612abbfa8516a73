//! Error types for SDK operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::status::AnalogStatus;

/// Error type for SDK operations.
#[derive(Error, Debug)]
pub enum SdkError {
    /// The SDK returned a failure status.
    #[error("SDK returned {0}")]
    Status(AnalogStatus),

    /// The SDK returned a negative code outside the documented set.
    #[error("SDK returned unknown status code {0}")]
    UnknownStatus(i32),

    /// The shared library could not be loaded.
    #[error("Failed to load SDK library {path}: {source}")]
    LibraryLoad {
        /// Path that was attempted.
        path: PathBuf,
        /// Loader error.
        #[source]
        source: libloading::Error,
    },

    /// The loaded library does not export the function.
    #[error("Function {0} is not exported by the loaded SDK library")]
    MissingSymbol(&'static str),

    /// The SDK handed back device information that could not be read.
    #[error("Invalid device info: {0}")]
    InvalidDeviceInfo(String),

    /// A buffer size does not fit the native parameter type.
    #[error("Buffer capacity {0} exceeds the SDK limit")]
    CapacityTooLarge(usize),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A specialized `Result` type for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;

impl SdkError {
    /// Error for a native status code.
    pub fn from_code(code: i32) -> Self {
        AnalogStatus::from_code(code).map_or(SdkError::UnknownStatus(code), SdkError::Status)
    }

    /// Native status carried by this error, if any.
    pub fn status(&self) -> Option<AnalogStatus> {
        match self {
            SdkError::Status(status) => Some(*status),
            _ => None,
        }
    }

    /// Whether the error means the device went away.
    pub fn is_disconnect(&self) -> bool {
        matches!(
            self,
            SdkError::Status(AnalogStatus::DeviceDisconnected | AnalogStatus::NoDevices)
        )
    }
}

/// Interpret a status-only return (`1` is success).
pub(crate) fn check_status(code: i32) -> SdkResult<()> {
    if code == AnalogStatus::Ok.code() {
        Ok(())
    } else {
        Err(SdkError::from_code(code))
    }
}

/// Interpret a count-or-status return (non-negative is a count).
pub(crate) fn check_count(code: i32) -> SdkResult<usize> {
    usize::try_from(code)
        .ok()
        .ok_or_else(|| SdkError::from_code(code))
}

/// Interpret an analog reading (negative is a status code).
pub(crate) fn check_value(value: f32) -> SdkResult<f32> {
    if value < 0.0 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "negative readings are integral status codes"
        )]
        let code = value as i32;
        Err(SdkError::from_code(code))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_known_and_unknown() {
        assert!(matches!(
            SdkError::from_code(-1997),
            SdkError::Status(AnalogStatus::Failure)
        ));
        assert!(matches!(SdkError::from_code(-7), SdkError::UnknownStatus(-7)));
    }

    #[test]
    fn test_check_status() {
        assert_eq!(check_status(1).ok(), Some(()));
        assert!(matches!(
            check_status(-2000),
            Err(SdkError::Status(AnalogStatus::UnInitialised))
        ));
        assert!(matches!(check_status(0), Err(SdkError::UnknownStatus(0))));
    }

    #[test]
    fn test_check_count() {
        assert_eq!(check_count(0).ok(), Some(0));
        assert_eq!(check_count(3).ok(), Some(3));
        assert!(matches!(
            check_count(-1999),
            Err(SdkError::Status(AnalogStatus::NoDevices))
        ));
    }

    #[test]
    fn test_check_value() {
        assert_eq!(check_value(0.0).ok(), Some(0.0));
        assert_eq!(check_value(0.25).ok(), Some(0.25));
        assert_eq!(check_value(1.0).ok(), Some(1.0));
        assert!(matches!(
            check_value(-1998.0),
            Err(SdkError::Status(AnalogStatus::DeviceDisconnected))
        ));
    }

    #[test]
    fn test_is_disconnect() {
        assert!(SdkError::Status(AnalogStatus::DeviceDisconnected).is_disconnect());
        assert!(SdkError::Status(AnalogStatus::NoDevices).is_disconnect());
        assert!(!SdkError::Status(AnalogStatus::Failure).is_disconnect());
        assert!(!SdkError::MissingSymbol("wooting_analog_read_analog").is_disconnect());
    }
}
