//! Native keycode spaces the SDK can operate in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseModeError;

/// Keycode space used by the SDK for `read_analog` input and full-buffer
/// output. The discriminants are the values the native library expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum KeyCodeMode {
    /// USB HID usage codes (keyboard/keypad page). The SDK default.
    #[default]
    Hid = 0,
    /// PC scan code set 1.
    #[serde(rename = "scancode1")]
    ScanCode1 = 1,
    /// Windows virtual-key codes.
    VirtualKey = 2,
    /// Windows virtual-key codes translated to the current keyboard locale.
    VirtualKeyTranslate = 3,
}

impl KeyCodeMode {
    /// Every mode, in native discriminant order.
    pub const ALL: [KeyCodeMode; 4] = [
        KeyCodeMode::Hid,
        KeyCodeMode::ScanCode1,
        KeyCodeMode::VirtualKey,
        KeyCodeMode::VirtualKeyTranslate,
    ];

    /// Native discriminant passed to `wooting_analog_set_keycode_mode`.
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Inverse of [`KeyCodeMode::as_raw`].
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(KeyCodeMode::Hid),
            1 => Some(KeyCodeMode::ScanCode1),
            2 => Some(KeyCodeMode::VirtualKey),
            3 => Some(KeyCodeMode::VirtualKeyTranslate),
            _ => None,
        }
    }

    /// Variant name, as used in error messages and logs.
    pub const fn name(self) -> &'static str {
        match self {
            KeyCodeMode::Hid => "HID",
            KeyCodeMode::ScanCode1 => "ScanCode1",
            KeyCodeMode::VirtualKey => "VirtualKey",
            KeyCodeMode::VirtualKeyTranslate => "VirtualKeyTranslate",
        }
    }
}

impl fmt::Display for KeyCodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyCodeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "hid" => Ok(KeyCodeMode::Hid),
            "scancode1" | "scancode" | "sc1" => Ok(KeyCodeMode::ScanCode1),
            "virtualkey" | "vk" => Ok(KeyCodeMode::VirtualKey),
            "virtualkeytranslate" | "vktranslate" => Ok(KeyCodeMode::VirtualKeyTranslate),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values_match_native() {
        assert_eq!(KeyCodeMode::Hid.as_raw(), 0);
        assert_eq!(KeyCodeMode::ScanCode1.as_raw(), 1);
        assert_eq!(KeyCodeMode::VirtualKey.as_raw(), 2);
        assert_eq!(KeyCodeMode::VirtualKeyTranslate.as_raw(), 3);
    }

    #[test]
    fn test_raw_roundtrip() {
        for mode in KeyCodeMode::ALL {
            assert_eq!(KeyCodeMode::from_raw(mode.as_raw()), Some(mode));
        }
        assert_eq!(KeyCodeMode::from_raw(4), None);
        assert_eq!(KeyCodeMode::from_raw(u8::MAX), None);
    }

    #[test]
    fn test_default_is_hid() {
        assert_eq!(KeyCodeMode::default(), KeyCodeMode::Hid);
    }

    #[test]
    fn test_parse_accepts_common_spellings() -> Result<(), ParseModeError> {
        assert_eq!("hid".parse::<KeyCodeMode>()?, KeyCodeMode::Hid);
        assert_eq!("ScanCode1".parse::<KeyCodeMode>()?, KeyCodeMode::ScanCode1);
        assert_eq!("scan-code-1".parse::<KeyCodeMode>()?, KeyCodeMode::ScanCode1);
        assert_eq!("virtual_key".parse::<KeyCodeMode>()?, KeyCodeMode::VirtualKey);
        assert_eq!(
            "VirtualKeyTranslate".parse::<KeyCodeMode>()?,
            KeyCodeMode::VirtualKeyTranslate
        );
        Ok(())
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!("usb".parse::<KeyCodeMode>().ok(), None);
        assert_eq!("".parse::<KeyCodeMode>().ok(), None);
    }
}
