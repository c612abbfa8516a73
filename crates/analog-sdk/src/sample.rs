//! Buffered analog readings.

use serde::{Deserialize, Serialize};

use analog_keycodes::{KeyCodeMode, NativeCode, key_for_native};

/// One entry of a full-buffer read: a pressed key and how far it is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalogSample {
    /// Native code in the mode active at read time.
    pub code: NativeCode,
    /// Depression in `[0.0, 1.0]`.
    pub value: f32,
}

impl AnalogSample {
    /// Create a sample.
    pub const fn new(code: NativeCode, value: f32) -> Self {
        Self { code, value }
    }

    /// Depression as a percentage.
    pub fn percent(&self) -> f32 {
        self.value * 100.0
    }

    /// Name of the key if `code` is known in `mode`.
    pub fn key_name(&self, mode: KeyCodeMode) -> Option<&'static str> {
        key_for_native(self.code, mode).map(|key| key.name())
    }
}
