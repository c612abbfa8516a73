//! Keycode translation for analog keyboards.
//!
//! The analog SDK reports and accepts keys in one of several native keycode
//! spaces, selected per session with a [`KeyCodeMode`]. This crate defines a
//! single mode-independent key enumeration, [`GeneralizedKey`], and the three
//! fixed tables that map it onto those spaces:
//!
//! - [`KeyCodeMode::ScanCode1`]: PC scan code set 1 (extended keys carry the
//!   `0xE0` prefix in the high byte, e.g. `Home = 0xE047`)
//! - [`KeyCodeMode::Hid`]: USB HID keyboard/keypad usage page
//! - [`KeyCodeMode::VirtualKey`]: Windows virtual-key codes
//!
//! [`KeyCodeMode::VirtualKeyTranslate`] has no table of its own; translating
//! into it always fails with [`KeyNotMapped`].
//!
//! # Example
//!
//! ```
//! use analog_keycodes::{GeneralizedKey, KeyCodeMode, translate};
//!
//! assert_eq!(translate(GeneralizedKey::Esc, KeyCodeMode::ScanCode1), Ok(0x01));
//! assert_eq!(translate(GeneralizedKey::Esc, KeyCodeMode::Hid), Ok(0x29));
//! assert!(translate(GeneralizedKey::Esc, KeyCodeMode::VirtualKeyTranslate).is_err());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod error;
pub mod key;
pub mod mode;
pub mod tables;
pub mod translate;

pub use error::{KeyNotMapped, ParseKeyError, ParseModeError};
pub use key::GeneralizedKey;
pub use mode::KeyCodeMode;
pub use tables::NativeCodeTable;
pub use translate::{IntoNativeCode, key_for_native, translate};

/// A key identifier in the SDK's active keycode space.
pub type NativeCode = u16;
