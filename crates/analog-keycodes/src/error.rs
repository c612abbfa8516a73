//! Error types for keycode translation and parsing.

use thiserror::Error;

use crate::key::GeneralizedKey;
use crate::mode::KeyCodeMode;

/// The key has no native code in the requested mode.
///
/// Raised before any call into the SDK, so the caller can retry with another
/// mode or treat the key as unsupported.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("Key {key} is not mapped for mode {mode}")]
pub struct KeyNotMapped {
    /// Key that failed to translate.
    pub key: GeneralizedKey,
    /// Mode the translation was attempted in.
    pub mode: KeyCodeMode,
}

/// A string did not name any [`GeneralizedKey`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown key name: {0}")]
pub struct ParseKeyError(pub String);

/// A string did not name any [`KeyCodeMode`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown keycode mode: {0} (expected hid, scancode1, virtualkey or virtualkeytranslate)")]
pub struct ParseModeError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_mapped_names_key_and_mode() {
        let err = KeyNotMapped {
            key: GeneralizedKey::LeftCtrl,
            mode: KeyCodeMode::VirtualKeyTranslate,
        };
        let msg = err.to_string();
        assert!(msg.contains("LeftCtrl"));
        assert!(msg.contains("VirtualKeyTranslate"));
    }

    #[test]
    fn test_errors_are_std_errors() {
        let err = ParseKeyError("Foo".into());
        let _: &dyn std::error::Error = &err;
        let err = ParseModeError("bar".into());
        let _: &dyn std::error::Error = &err;
    }
}
