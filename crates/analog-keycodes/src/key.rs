//! Mode-independent physical key identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseKeyError;

macro_rules! generalized_keys {
    ($($(#[$meta:meta])* $variant:ident),+ $(,)?) => {
        /// A physical key, independent of any native encoding.
        ///
        /// Variant order follows the physical scan order of a standard
        /// 104-key board (the same order as scan code set 1).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(u16)]
        pub enum GeneralizedKey {
            $($(#[$meta])* $variant,)+
        }

        impl GeneralizedKey {
            /// Every key, in declaration order.
            pub const ALL: &'static [GeneralizedKey] = &[$(GeneralizedKey::$variant,)+];

            /// Variant name, e.g. `"NumpadPlus"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(GeneralizedKey::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

generalized_keys! {
    /// Escape.
    Esc,
    /// Top-row digit 1.
    D1,
    /// Top-row digit 2.
    D2,
    /// Top-row digit 3.
    D3,
    /// Top-row digit 4.
    D4,
    /// Top-row digit 5.
    D5,
    /// Top-row digit 6.
    D6,
    /// Top-row digit 7.
    D7,
    /// Top-row digit 8.
    D8,
    /// Top-row digit 9.
    D9,
    /// Top-row digit 0.
    D0,
    /// `-`
    Minus,
    /// `=`
    Equals,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// Letter Q.
    Q,
    /// Letter W.
    W,
    /// Letter E.
    E,
    /// Letter R.
    R,
    /// Letter T.
    T,
    /// Letter Y.
    Y,
    /// Letter U.
    U,
    /// Letter I.
    I,
    /// Letter O.
    O,
    /// Letter P.
    P,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// Main Enter.
    Enter,
    /// Left Control.
    LeftCtrl,
    /// Letter A.
    A,
    /// Letter S.
    S,
    /// Letter D.
    D,
    /// Letter F.
    F,
    /// Letter G.
    G,
    /// Letter H.
    H,
    /// Letter J.
    J,
    /// Letter K.
    K,
    /// Letter L.
    L,
    /// `;`
    Semicolon,
    /// `'`
    Apostrophe,
    /// `` ` ``
    Grave,
    /// Left Shift.
    LeftShift,
    /// `\`
    Backslash,
    /// Letter Z.
    Z,
    /// Letter X.
    X,
    /// Letter C.
    C,
    /// Letter V.
    V,
    /// Letter B.
    B,
    /// Letter N.
    N,
    /// Letter M.
    M,
    /// `,`
    Comma,
    /// `.`
    Period,
    /// `/`
    Slash,
    /// Right Shift.
    RightShift,
    /// Keypad `*`.
    NumpadAsterisk,
    /// Left Alt.
    LeftAlt,
    /// Space bar.
    Space,
    /// Caps Lock.
    CapsLock,
    /// F1.
    F1,
    /// F2.
    F2,
    /// F3.
    F3,
    /// F4.
    F4,
    /// F5.
    F5,
    /// F6.
    F6,
    /// F7.
    F7,
    /// F8.
    F8,
    /// F9.
    F9,
    /// F10.
    F10,
    /// Num Lock.
    NumLock,
    /// Scroll Lock.
    ScrollLock,
    /// Keypad 7.
    Numpad7,
    /// Keypad 8.
    Numpad8,
    /// Keypad 9.
    Numpad9,
    /// Keypad `-`.
    NumpadMinus,
    /// Keypad 4.
    Numpad4,
    /// Keypad 5.
    Numpad5,
    /// Keypad 6.
    Numpad6,
    /// Keypad `+`.
    NumpadPlus,
    /// Keypad 1.
    Numpad1,
    /// Keypad 2.
    Numpad2,
    /// Keypad 3.
    Numpad3,
    /// Keypad 0.
    Numpad0,
    /// Keypad `.`.
    NumpadPeriod,
    /// F11.
    F11,
    /// F12.
    F12,
    /// Right Control.
    RightCtrl,
    /// Right Alt (AltGr).
    RightAlt,
    /// Home.
    Home,
    /// Up arrow.
    Up,
    /// Page Up.
    PageUp,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// End.
    End,
    /// Down arrow.
    Down,
    /// Page Down.
    PageDown,
    /// Insert.
    Insert,
    /// Delete.
    Delete,
}

impl GeneralizedKey {
    /// Number of distinct keys.
    pub const COUNT: usize = Self::ALL.len();

    /// True for the six Shift/Ctrl/Alt keys.
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            GeneralizedKey::LeftCtrl
                | GeneralizedKey::LeftShift
                | GeneralizedKey::RightShift
                | GeneralizedKey::LeftAlt
                | GeneralizedKey::RightCtrl
                | GeneralizedKey::RightAlt
        )
    }
}

impl fmt::Display for GeneralizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneralizedKey {
    type Err = ParseKeyError;

    /// Parses a variant name, ignoring ASCII case. Single digits `0`-`9` are
    /// accepted as the top-row digit keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lookup = match trimmed {
            digit @ ("0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9") => {
                format!("D{digit}")
            }
            "Escape" | "escape" => "Esc".to_string(),
            other => other.to_string(),
        };
        GeneralizedKey::ALL
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(&lookup))
            .ok_or_else(|| ParseKeyError(s.to_string()))
    }
}
