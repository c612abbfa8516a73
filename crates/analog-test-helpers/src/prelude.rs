//! Everything a test usually needs.

pub use crate::assertions::{ANALOG_TOLERANCE, assert_analog_eq, assert_analog_range};
pub use crate::must::must_err;

#[cfg(feature = "mock")]
pub use crate::must::must_status;

#[cfg(feature = "mock")]
pub use crate::mock::{
    MockAnalogBackend, MockCall, MockOp, Reading, keyboard_fixture, keypad_fixture,
};

/// Return type for tests that use `?`.
pub type TestResult = Result<(), Box<dyn std::error::Error>>;
