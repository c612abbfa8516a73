//! Mode-dispatching translation between generalized keys and native codes.

use crate::NativeCode;
use crate::error::KeyNotMapped;
use crate::key::GeneralizedKey;
use crate::mode::KeyCodeMode;
use crate::tables::NativeCodeTable;

/// Native code the SDK expects for `key` while operating in `mode`.
///
/// # Errors
///
/// Returns [`KeyNotMapped`] when `mode` has no table or its table has no entry
/// for `key`.
pub fn translate(key: GeneralizedKey, mode: KeyCodeMode) -> Result<NativeCode, KeyNotMapped> {
    NativeCodeTable::for_mode(mode)
        .and_then(|table| table.get(key))
        .ok_or(KeyNotMapped { key, mode })
}

/// Generalized key whose native code in `mode` is `code`.
///
/// `0x00` never resolves: in HID mode several keys share it as a placeholder.
pub fn key_for_native(code: NativeCode, mode: KeyCodeMode) -> Option<GeneralizedKey> {
    if code == 0 {
        return None;
    }
    NativeCodeTable::for_mode(mode)?
        .entries()
        .find_map(|(key, native)| (native == code).then_some(key))
}

/// Anything that can name a key to the SDK in a given mode.
///
/// Raw native codes pass through untouched; generalized keys are translated.
pub trait IntoNativeCode: Copy {
    /// Resolve to the native code for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotMapped`] if the key has no code in `mode`.
    fn into_native_code(self, mode: KeyCodeMode) -> Result<NativeCode, KeyNotMapped>;
}

impl IntoNativeCode for NativeCode {
    fn into_native_code(self, _mode: KeyCodeMode) -> Result<NativeCode, KeyNotMapped> {
        Ok(self)
    }
}

impl IntoNativeCode for GeneralizedKey {
    fn into_native_code(self, mode: KeyCodeMode) -> Result<NativeCode, KeyNotMapped> {
        translate(self, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_esc() {
        assert_eq!(translate(GeneralizedKey::Esc, KeyCodeMode::ScanCode1), Ok(0x01));
        assert_eq!(translate(GeneralizedKey::Esc, KeyCodeMode::Hid), Ok(0x29));
        assert_eq!(translate(GeneralizedKey::Esc, KeyCodeMode::VirtualKey), Ok(0x1B));
    }

    #[test]
    fn test_translate_virtual_key_translate_unsupported() {
        assert_eq!(
            translate(GeneralizedKey::A, KeyCodeMode::VirtualKeyTranslate),
            Err(KeyNotMapped {
                key: GeneralizedKey::A,
                mode: KeyCodeMode::VirtualKeyTranslate,
            })
        );
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(
            key_for_native(0xE048, KeyCodeMode::ScanCode1),
            Some(GeneralizedKey::Up)
        );
        assert_eq!(key_for_native(0x04, KeyCodeMode::Hid), Some(GeneralizedKey::A));
        assert_eq!(key_for_native(0x00, KeyCodeMode::Hid), None);
        assert_eq!(key_for_native(0xFFFF, KeyCodeMode::VirtualKey), None);
        assert_eq!(key_for_native(0x41, KeyCodeMode::VirtualKeyTranslate), None);
    }

    #[test]
    fn test_raw_code_passthrough_ignores_mode() {
        for mode in KeyCodeMode::ALL {
            assert_eq!(0x1234u16.into_native_code(mode), Ok(0x1234));
        }
    }
}
