//! Fixed native keycode tables.
//!
//! Values are bit-exact third-party assignments: PC scan code set 1, the USB
//! HID keyboard/keypad usage page (0x07) and Windows virtual-key codes.
//!
//! The HID table maps the six Shift/Ctrl/Alt keys to `0x00` (HID "no event").
//! HID reports modifiers in a separate bitmap byte rather than as usages on
//! the keyboard page's main range, and the binding never carried codes for
//! them. Those entries are present, so translating them succeeds with `0x00`.

use crate::NativeCode;
use crate::key::GeneralizedKey;
use crate::mode::KeyCodeMode;

/// Prefix carried by extended (E0-escaped) scan codes.
const EXTENDED: u16 = 0xE000;

/// HID "no event" usage.
const HID_NONE: u16 = 0x00;

/// One immutable key → native code mapping.
#[derive(Debug)]
pub struct NativeCodeTable {
    mode: KeyCodeMode,
    lookup: fn(GeneralizedKey) -> Option<NativeCode>,
}

/// Scan code set 1.
pub static SCAN_CODE_SET_1: NativeCodeTable = NativeCodeTable {
    mode: KeyCodeMode::ScanCode1,
    lookup: scan_code_set_1,
};

/// USB HID keyboard/keypad page.
pub static HID_USAGE: NativeCodeTable = NativeCodeTable {
    mode: KeyCodeMode::Hid,
    lookup: hid_usage,
};

/// Windows virtual keys.
pub static VIRTUAL_KEY: NativeCodeTable = NativeCodeTable {
    mode: KeyCodeMode::VirtualKey,
    lookup: virtual_key,
};

impl NativeCodeTable {
    /// Table backing `mode`, or `None` when the mode has no table
    /// ([`KeyCodeMode::VirtualKeyTranslate`]).
    pub fn for_mode(mode: KeyCodeMode) -> Option<&'static NativeCodeTable> {
        match mode {
            KeyCodeMode::ScanCode1 => Some(&SCAN_CODE_SET_1),
            KeyCodeMode::Hid => Some(&HID_USAGE),
            KeyCodeMode::VirtualKey => Some(&VIRTUAL_KEY),
            KeyCodeMode::VirtualKeyTranslate => None,
        }
    }

    /// Mode this table encodes.
    pub fn mode(&self) -> KeyCodeMode {
        self.mode
    }

    /// Native code for `key`, if the table has an entry.
    pub fn get(&self, key: GeneralizedKey) -> Option<NativeCode> {
        (self.lookup)(key)
    }

    /// All entries, in [`GeneralizedKey::ALL`] order.
    pub fn entries(&self) -> impl Iterator<Item = (GeneralizedKey, NativeCode)> + '_ {
        GeneralizedKey::ALL
            .iter()
            .filter_map(move |&key| self.get(key).map(|code| (key, code)))
    }
}

const fn scan_code_set_1(key: GeneralizedKey) -> Option<NativeCode> {
    use GeneralizedKey::*;
    let code = match key {
        Esc => 0x01,
        D1 => 0x02,
        D2 => 0x03,
        D3 => 0x04,
        D4 => 0x05,
        D5 => 0x06,
        D6 => 0x07,
        D7 => 0x08,
        D8 => 0x09,
        D9 => 0x0A,
        D0 => 0x0B,
        Minus => 0x0C,
        Equals => 0x0D,
        Backspace => 0x0E,
        Tab => 0x0F,
        Q => 0x10,
        W => 0x11,
        E => 0x12,
        R => 0x13,
        T => 0x14,
        Y => 0x15,
        U => 0x16,
        I => 0x17,
        O => 0x18,
        P => 0x19,
        LeftBracket => 0x1A,
        RightBracket => 0x1B,
        Enter => 0x1C,
        LeftCtrl => 0x1D,
        A => 0x1E,
        S => 0x1F,
        D => 0x20,
        F => 0x21,
        G => 0x22,
        H => 0x23,
        J => 0x24,
        K => 0x25,
        L => 0x26,
        Semicolon => 0x27,
        Apostrophe => 0x28,
        Grave => 0x29,
        LeftShift => 0x2A,
        Backslash => 0x2B,
        Z => 0x2C,
        X => 0x2D,
        C => 0x2E,
        V => 0x2F,
        B => 0x30,
        N => 0x31,
        M => 0x32,
        Comma => 0x33,
        Period => 0x34,
        Slash => 0x35,
        RightShift => 0x36,
        NumpadAsterisk => 0x37,
        LeftAlt => 0x38,
        Space => 0x39,
        CapsLock => 0x3A,
        F1 => 0x3B,
        F2 => 0x3C,
        F3 => 0x3D,
        F4 => 0x3E,
        F5 => 0x3F,
        F6 => 0x40,
        F7 => 0x41,
        F8 => 0x42,
        F9 => 0x43,
        F10 => 0x44,
        NumLock => 0x45,
        ScrollLock => 0x46,
        Numpad7 => 0x47,
        Numpad8 => 0x48,
        Numpad9 => 0x49,
        NumpadMinus => 0x4A,
        Numpad4 => 0x4B,
        Numpad5 => 0x4C,
        Numpad6 => 0x4D,
        NumpadPlus => 0x4E,
        Numpad1 => 0x4F,
        Numpad2 => 0x50,
        Numpad3 => 0x51,
        Numpad0 => 0x52,
        NumpadPeriod => 0x53,
        F11 => 0x57,
        F12 => 0x58,
        RightCtrl => EXTENDED | 0x1D,
        RightAlt => EXTENDED | 0x38,
        Home => EXTENDED | 0x47,
        Up => EXTENDED | 0x48,
        PageUp => EXTENDED | 0x49,
        Left => EXTENDED | 0x4B,
        Right => EXTENDED | 0x4D,
        End => EXTENDED | 0x4F,
        Down => EXTENDED | 0x50,
        PageDown => EXTENDED | 0x51,
        Insert => EXTENDED | 0x52,
        Delete => EXTENDED | 0x53,
    };
    Some(code)
}

const fn hid_usage(key: GeneralizedKey) -> Option<NativeCode> {
    use GeneralizedKey::*;
    let code = match key {
        Esc => 0x29,
        D1 => 0x1E,
        D2 => 0x1F,
        D3 => 0x20,
        D4 => 0x21,
        D5 => 0x22,
        D6 => 0x23,
        D7 => 0x24,
        D8 => 0x25,
        D9 => 0x26,
        D0 => 0x27,
        Minus => 0x2D,
        Equals => 0x2E,
        Backspace => 0x2A,
        Tab => 0x2B,
        Q => 0x14,
        W => 0x1A,
        E => 0x08,
        R => 0x15,
        T => 0x17,
        Y => 0x1C,
        U => 0x18,
        I => 0x0C,
        O => 0x12,
        P => 0x13,
        LeftBracket => 0x2F,
        RightBracket => 0x30,
        Enter => 0x28,
        A => 0x04,
        S => 0x16,
        D => 0x07,
        F => 0x09,
        G => 0x0A,
        H => 0x0B,
        J => 0x0D,
        K => 0x0E,
        L => 0x0F,
        Semicolon => 0x33,
        Apostrophe => 0x34,
        Grave => 0x35,
        Backslash => 0x31,
        Z => 0x1D,
        X => 0x1B,
        C => 0x06,
        V => 0x19,
        B => 0x05,
        N => 0x11,
        M => 0x10,
        Comma => 0x36,
        Period => 0x37,
        Slash => 0x38,
        NumpadAsterisk => 0x55,
        Space => 0x2C,
        CapsLock => 0x39,
        F1 => 0x3A,
        F2 => 0x3B,
        F3 => 0x3C,
        F4 => 0x3D,
        F5 => 0x3E,
        F6 => 0x3F,
        F7 => 0x40,
        F8 => 0x41,
        F9 => 0x42,
        F10 => 0x43,
        NumLock => 0x53,
        ScrollLock => 0x47,
        Numpad7 => 0x5F,
        Numpad8 => 0x60,
        Numpad9 => 0x61,
        NumpadMinus => 0x56,
        Numpad4 => 0x5C,
        Numpad5 => 0x5D,
        Numpad6 => 0x5E,
        NumpadPlus => 0x57,
        Numpad1 => 0x59,
        Numpad2 => 0x5A,
        Numpad3 => 0x5B,
        Numpad0 => 0x62,
        NumpadPeriod => 0x63,
        F11 => 0x44,
        F12 => 0x45,
        Home => 0x4A,
        Up => 0x52,
        PageUp => 0x4B,
        Left => 0x50,
        Right => 0x4F,
        End => 0x4D,
        Down => 0x51,
        PageDown => 0x4E,
        Insert => 0x49,
        Delete => 0x4C,
        LeftCtrl | LeftShift | RightShift | LeftAlt | RightCtrl | RightAlt => HID_NONE,
    };
    Some(code)
}

const fn virtual_key(key: GeneralizedKey) -> Option<NativeCode> {
    use GeneralizedKey::*;
    let code = match key {
        Esc => 0x1B,
        D1 => 0x31,
        D2 => 0x32,
        D3 => 0x33,
        D4 => 0x34,
        D5 => 0x35,
        D6 => 0x36,
        D7 => 0x37,
        D8 => 0x38,
        D9 => 0x39,
        D0 => 0x30,
        // VK_OEM_MINUS / VK_OEM_PLUS
        Minus => 0xBD,
        Equals => 0xBB,
        Backspace => 0x08,
        Tab => 0x09,
        Q => 0x51,
        W => 0x57,
        E => 0x45,
        R => 0x52,
        T => 0x54,
        Y => 0x59,
        U => 0x55,
        I => 0x49,
        O => 0x4F,
        P => 0x50,
        LeftBracket => 0xDB,
        RightBracket => 0xDD,
        Enter => 0x0D,
        LeftCtrl => 0xA2,
        A => 0x41,
        S => 0x53,
        D => 0x44,
        F => 0x46,
        G => 0x47,
        H => 0x48,
        J => 0x4A,
        K => 0x4B,
        L => 0x4C,
        Semicolon => 0xBA,
        Apostrophe => 0xDE,
        Grave => 0xC0,
        LeftShift => 0xA0,
        Backslash => 0xDC,
        Z => 0x5A,
        X => 0x58,
        C => 0x43,
        V => 0x56,
        B => 0x42,
        N => 0x4E,
        M => 0x4D,
        Comma => 0xBC,
        Period => 0xBE,
        Slash => 0xBF,
        RightShift => 0xA1,
        NumpadAsterisk => 0x6A,
        LeftAlt => 0xA4,
        Space => 0x20,
        CapsLock => 0x14,
        F1 => 0x70,
        F2 => 0x71,
        F3 => 0x72,
        F4 => 0x73,
        F5 => 0x74,
        F6 => 0x75,
        F7 => 0x76,
        F8 => 0x77,
        F9 => 0x78,
        F10 => 0x79,
        NumLock => 0x90,
        ScrollLock => 0x91,
        Numpad7 => 0x67,
        Numpad8 => 0x68,
        Numpad9 => 0x69,
        NumpadMinus => 0x6D,
        Numpad4 => 0x64,
        Numpad5 => 0x65,
        Numpad6 => 0x66,
        NumpadPlus => 0x6B,
        Numpad1 => 0x61,
        Numpad2 => 0x62,
        Numpad3 => 0x63,
        Numpad0 => 0x60,
        NumpadPeriod => 0x6E,
        F11 => 0x7A,
        F12 => 0x7B,
        RightCtrl => 0xA3,
        RightAlt => 0xA5,
        Home => 0x24,
        Up => 0x26,
        // VK_PRIOR / VK_NEXT
        PageUp => 0x21,
        Left => 0x25,
        Right => 0x27,
        End => 0x23,
        Down => 0x28,
        PageDown => 0x22,
        Insert => 0x2D,
        Delete => 0x2E,
    };
    Some(code)
}
