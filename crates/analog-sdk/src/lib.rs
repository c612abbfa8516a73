//! Session management and runtime binding for the analog keyboard SDK.
//!
//! The SDK ships as a native shared library (`wooting_analog_wrapper`). This
//! crate provides:
//! - [`AnalogBackend`]: the operations the SDK exposes, as a trait
//! - [`NativeSdk`]: the backend implemented over the shared library, loaded at
//!   runtime with `libloading`
//! - [`AnalogClient`]: a session over any backend that tracks the active
//!   [`KeyCodeMode`](analog_keycodes::KeyCodeMode)
//! - [`SdkConfig`]: where to find the library and how to set up the session
//!
//! # Status codes
//!
//! The SDK reports failures in-band: negative integer returns and negative
//! analog readings are [`AnalogStatus`] codes. The binding turns them into
//! [`SdkError::Status`] and never alters them.
//!
//! # Example
//!
//! ```rust,no_run
//! use analog_sdk::{AnalogClient, SdkConfig};
//! use analog_keycodes::KeyCodeMode;
//!
//! fn main() -> Result<(), analog_sdk::SdkError> {
//!     let client = AnalogClient::open(&SdkConfig::from_env())?;
//!     let devices = client.initialise()?;
//!     client.set_keycode_mode(KeyCodeMode::ScanCode1)?;
//!     println!("{devices} device(s), Esc at {}", client.read_analog(0x01)?);
//!     client.uninitialise()?;
//!     Ok(())
//! }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod backend;
#[expect(unsafe_code, reason = "dispatches native hot-plug callbacks")]
mod callback;
pub mod client;
pub mod config;
pub mod device;
pub mod error;
#[expect(unsafe_code, reason = "reads SDK-owned C structs")]
pub mod ffi;
#[expect(unsafe_code, reason = "loads and calls the SDK shared library")]
pub mod native;
pub mod prelude;
pub mod sample;
pub mod status;

pub use backend::AnalogBackend;
pub use client::{AnalogClient, AtomicKeyCodeMode, InitialiseOutcome};
pub use config::{ConfigError, SdkConfig};
pub use device::{DeviceEventHandler, DeviceEventKind, DeviceId, DeviceInfo, DeviceType};
pub use error::{SdkError, SdkResult};
pub use native::NativeSdk;
pub use sample::AnalogSample;
pub use status::AnalogStatus;
