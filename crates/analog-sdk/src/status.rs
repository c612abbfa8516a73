//! Native status codes.

use std::fmt;

/// Result codes returned by the SDK.
///
/// `Ok` is the only success value; every failure is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum AnalogStatus {
    /// Success.
    Ok = 1,
    /// The SDK has not been initialised.
    UnInitialised = -2000,
    /// No devices are connected.
    NoDevices = -1999,
    /// The device has been disconnected.
    DeviceDisconnected = -1998,
    /// Generic failure.
    Failure = -1997,
    /// A parameter was invalid.
    InvalidArgument = -1996,
    /// No device plugins were found.
    NoPlugins = -1995,
    /// The function was not found in the library.
    FunctionNotFound = -1994,
    /// No HID mapping exists for the given keycode.
    NoMapping = -1993,
    /// Not available on this platform.
    NotAvailable = -1992,
    /// The operation targets an older SDK version.
    IncompatibleVersion = -1991,
    /// The SDK could not be found on the system.
    DllNotFound = -1990,
}

impl AnalogStatus {
    /// Every status, success first.
    pub const ALL: [AnalogStatus; 12] = [
        AnalogStatus::Ok,
        AnalogStatus::UnInitialised,
        AnalogStatus::NoDevices,
        AnalogStatus::DeviceDisconnected,
        AnalogStatus::Failure,
        AnalogStatus::InvalidArgument,
        AnalogStatus::NoPlugins,
        AnalogStatus::FunctionNotFound,
        AnalogStatus::NoMapping,
        AnalogStatus::NotAvailable,
        AnalogStatus::IncompatibleVersion,
        AnalogStatus::DllNotFound,
    ];

    /// Native integer code.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Status for a native integer code.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Whether this is [`AnalogStatus::Ok`].
    pub const fn is_ok(self) -> bool {
        matches!(self, AnalogStatus::Ok)
    }

    /// Short description.
    pub const fn description(self) -> &'static str {
        match self {
            AnalogStatus::Ok => "success",
            AnalogStatus::UnInitialised => "SDK is not initialised",
            AnalogStatus::NoDevices => "no devices are connected",
            AnalogStatus::DeviceDisconnected => "device has been disconnected",
            AnalogStatus::Failure => "generic failure",
            AnalogStatus::InvalidArgument => "invalid argument",
            AnalogStatus::NoPlugins => "no plugins were found",
            AnalogStatus::FunctionNotFound => "function not found in the library",
            AnalogStatus::NoMapping => "no keycode mapping to HID",
            AnalogStatus::NotAvailable => "not available on this platform",
            AnalogStatus::IncompatibleVersion => "incompatible SDK version",
            AnalogStatus::DllNotFound => "SDK library not found",
        }
    }
}

impl fmt::Display for AnalogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({}): {}", self, self.code(), self.description())
    }
}
