//! Error-side unwrapping for SDK results.
//!
//! Tests asserting on failures use these instead of `unwrap_err()`;
//! `#[track_caller]` points a failure at the test line.

use std::fmt::Debug;

#[cfg(feature = "mock")]
use analog_sdk::{AnalogStatus, SdkError};

/// The error of a result that should have failed.
///
/// # Panics
///
/// Panics with the value if the result is `Ok`.
#[track_caller]
pub fn must_err<T: Debug, E>(result: Result<T, E>) -> E {
    match result {
        Ok(v) => panic!("expected an error, got Ok({v:?})"),
        Err(e) => e,
    }
}

/// The native status of a call that should have failed with one.
///
/// ```rust
/// use analog_sdk::{AnalogStatus, SdkError};
/// use analog_test_helpers::must_status;
///
/// let result: Result<f32, SdkError> = Err(SdkError::Status(AnalogStatus::NoDevices));
/// assert_eq!(must_status(result), AnalogStatus::NoDevices);
/// ```
///
/// # Panics
///
/// Panics if the call succeeded or failed without a native status.
#[cfg(feature = "mock")]
#[track_caller]
pub fn must_status<T: Debug>(result: Result<T, SdkError>) -> AnalogStatus {
    let error = must_err(result);
    match error.status() {
        Some(status) => status,
        None => panic!("expected a native status, got {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_must_err_returns_error() {
        let r: Result<u16, &str> = Err("unmapped");
        assert_eq!(must_err(r), "unmapped");
    }

    #[test]
    #[should_panic(expected = "expected an error, got Ok(41)")]
    fn test_must_err_on_ok_panics() {
        let r: Result<u16, &str> = Ok(41);
        must_err(r);
    }

    #[cfg(feature = "mock")]
    #[test]
    fn test_must_status_extracts_code() {
        let r: Result<f32, SdkError> = Err(SdkError::Status(AnalogStatus::DeviceDisconnected));
        assert_eq!(must_status(r), AnalogStatus::DeviceDisconnected);
    }

    #[cfg(feature = "mock")]
    #[test]
    #[should_panic(expected = "expected a native status")]
    fn test_must_status_rejects_binding_errors() {
        let r: Result<f32, SdkError> = Err(SdkError::MissingSymbol("wooting_analog_read_analog"));
        must_status(r);
    }
}
