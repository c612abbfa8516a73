//! Device identity and hot-plug event types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Opaque SDK identifier for a connected device.
///
/// Stable across sessions and computers for the same physical device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub u64);

impl DeviceId {
    /// Raw identifier passed to the SDK.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl From<u64> for DeviceId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Kind of analog device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    /// Full-size or tenkeyless keyboard.
    Keyboard,
    /// Keypad.
    Keypad,
    /// Anything else.
    #[default]
    Other,
}

impl DeviceType {
    /// Decode the native type tag. Unknown tags become [`DeviceType::Other`].
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => DeviceType::Keyboard,
            2 => DeviceType::Keypad,
            _ => DeviceType::Other,
        }
    }

    /// Native type tag.
    pub const fn as_raw(self) -> i32 {
        match self {
            DeviceType::Keyboard => 1,
            DeviceType::Keypad => 2,
            DeviceType::Other => 3,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceType::Keyboard => write!(f, "keyboard"),
            DeviceType::Keypad => write!(f, "keypad"),
            DeviceType::Other => write!(f, "other"),
        }
    }
}

/// Information about a connected analog device, copied out of SDK memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// USB vendor ID.
    pub vendor_id: u16,
    /// USB product ID.
    pub product_id: u16,
    /// Manufacturer name.
    pub manufacturer_name: String,
    /// Device name.
    pub device_name: String,
    /// SDK device identifier.
    pub device_id: DeviceId,
    /// Device kind.
    pub device_type: DeviceType,
}

impl DeviceInfo {
    /// Create device info with empty names.
    pub fn new(vendor_id: u16, product_id: u16, device_id: DeviceId) -> Self {
        Self {
            vendor_id,
            product_id,
            manufacturer_name: String::new(),
            device_name: String::new(),
            device_id,
            device_type: DeviceType::Other,
        }
    }

    /// Set the manufacturer name.
    pub fn with_manufacturer(mut self, name: impl Into<String>) -> Self {
        self.manufacturer_name = name.into();
        self
    }

    /// Set the device name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = name.into();
        self
    }

    /// Set the device type.
    pub fn with_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = device_type;
        self
    }

    /// Human-readable name, falling back to the USB IDs.
    pub fn display_name(&self) -> String {
        if self.device_name.is_empty() {
            format!("{:04x}:{:04x}", self.vendor_id, self.product_id)
        } else {
            self.device_name.clone()
        }
    }
}

/// Hot-plug event reported by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceEventKind {
    /// A device was connected.
    Connected,
    /// A device was disconnected.
    Disconnected,
}

impl DeviceEventKind {
    /// Decode the native event tag.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            1 => Some(DeviceEventKind::Connected),
            2 => Some(DeviceEventKind::Disconnected),
            _ => None,
        }
    }

    /// Native event tag.
    pub const fn as_raw(self) -> i32 {
        match self {
            DeviceEventKind::Connected => 1,
            DeviceEventKind::Disconnected => 2,
        }
    }
}

impl fmt::Display for DeviceEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceEventKind::Connected => write!(f, "connected"),
            DeviceEventKind::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// Handler invoked for hot-plug events.
///
/// Runs on an SDK-owned thread; the device info is only borrowed for the call.
pub type DeviceEventHandler = Arc<dyn Fn(DeviceEventKind, &DeviceInfo) + Send + Sync + 'static>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_from_raw() {
        assert_eq!(DeviceType::from_raw(1), DeviceType::Keyboard);
        assert_eq!(DeviceType::from_raw(2), DeviceType::Keypad);
        assert_eq!(DeviceType::from_raw(3), DeviceType::Other);
        assert_eq!(DeviceType::from_raw(42), DeviceType::Other);
    }

    #[test]
    fn test_event_kind_from_raw() {
        assert_eq!(DeviceEventKind::from_raw(1), Some(DeviceEventKind::Connected));
        assert_eq!(DeviceEventKind::from_raw(2), Some(DeviceEventKind::Disconnected));
        assert_eq!(DeviceEventKind::from_raw(0), None);
    }

    #[test]
    fn test_builder_and_display_name() {
        let info = DeviceInfo::new(0x31E3, 0x1100, DeviceId(7));
        assert_eq!(info.display_name(), "31e3:1100");

        let info = info
            .with_manufacturer("Wooting")
            .with_name("Wooting One")
            .with_type(DeviceType::Keyboard);
        assert_eq!(info.display_name(), "Wooting One");
        assert_eq!(info.device_type, DeviceType::Keyboard);
    }

    #[test]
    fn test_device_id_display() {
        assert_eq!(DeviceId(0x2A).to_string(), "0x000000000000002a");
    }

    #[test]
    fn test_serde_roundtrip() -> Result<(), serde_json::Error> {
        let info = DeviceInfo::new(1, 2, DeviceId(3)).with_type(DeviceType::Keypad);
        let json = serde_json::to_string(&info)?;
        assert!(json.contains("\"device_type\":\"keypad\""));
        assert!(json.contains("\"device_id\":3"));
        let back: DeviceInfo = serde_json::from_str(&json)?;
        assert_eq!(back, info);
        Ok(())
    }
}
