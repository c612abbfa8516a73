//! Common imports for SDK users.

pub use crate::backend::AnalogBackend;
pub use crate::client::{AnalogClient, InitialiseOutcome};
pub use crate::config::SdkConfig;
pub use crate::device::{DeviceEventKind, DeviceId, DeviceInfo, DeviceType};
pub use crate::error::{SdkError, SdkResult};
pub use crate::native::NativeSdk;
pub use crate::sample::AnalogSample;
pub use crate::status::AnalogStatus;
pub use analog_keycodes::{GeneralizedKey, KeyCodeMode, NativeCode};
