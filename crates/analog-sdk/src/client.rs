//! SDK session with keycode-mode tracking.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use analog_keycodes::{KeyCodeMode, NativeCode};
use parking_lot::Mutex;

use crate::backend::AnalogBackend;
use crate::config::{DEFAULT_DEVICE_CAPACITY, SdkConfig};
use crate::device::{DeviceEventHandler, DeviceEventKind, DeviceId, DeviceInfo};
use crate::error::SdkResult;
use crate::native::NativeSdk;
use crate::sample::AnalogSample;

/// A [`KeyCodeMode`] readable and writable from any thread.
#[derive(Debug, Default)]
pub struct AtomicKeyCodeMode(AtomicU8);

impl AtomicKeyCodeMode {
    /// Create holding `mode`.
    pub const fn new(mode: KeyCodeMode) -> Self {
        Self(AtomicU8::new(mode.as_raw()))
    }

    /// Current mode.
    pub fn load(&self) -> KeyCodeMode {
        KeyCodeMode::from_raw(self.0.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Replace the mode.
    pub fn store(&self, mode: KeyCodeMode) {
        self.0.store(mode.as_raw(), Ordering::Release);
    }
}

/// Result of [`AnalogClient::initialise_checked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialiseOutcome {
    /// Devices connected at initialisation.
    pub device_count: usize,
    /// Whether the SDK reports itself initialised afterwards.
    pub initialised: bool,
}

/// One SDK session.
///
/// Tracks the keycode mode the SDK was last successfully switched to, so
/// callers can translate keys for the mode actually in effect. All methods
/// take `&self`; the client can be shared across threads. Mode changes are
/// serialised so the tracked mode always matches the last switch the SDK
/// applied.
#[derive(Debug)]
pub struct AnalogClient<B: AnalogBackend = NativeSdk> {
    backend: B,
    mode: AtomicKeyCodeMode,
    // Held across the backend call and the store that follows it.
    mode_writer: Mutex<()>,
    device_capacity: usize,
}

impl AnalogClient<NativeSdk> {
    /// Load the library named by `config` and wrap it in a session.
    ///
    /// The SDK is not initialised yet.
    pub fn open(config: &SdkConfig) -> SdkResult<Self> {
        let backend = NativeSdk::load(config.library())?;
        Ok(Self::new(backend).with_device_capacity(config.device_capacity))
    }
}

impl<B: AnalogBackend> AnalogClient<B> {
    /// Wrap `backend`. The tracked mode starts at [`KeyCodeMode::Hid`].
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            mode: AtomicKeyCodeMode::new(KeyCodeMode::Hid),
            mode_writer: Mutex::new(()),
            device_capacity: DEFAULT_DEVICE_CAPACITY,
        }
    }

    /// Set how many devices [`connected_devices`](Self::connected_devices) asks for.
    pub fn with_device_capacity(mut self, capacity: usize) -> Self {
        self.device_capacity = capacity;
        self
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Unwrap the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Initialise the SDK. Returns the number of connected devices.
    ///
    /// The SDK starts every session in HID mode, so the tracked mode resets.
    pub fn initialise(&self) -> SdkResult<usize> {
        let _writer = self.mode_writer.lock();
        let devices = self.backend.initialise()?;
        self.mode.store(KeyCodeMode::Hid);
        Ok(devices)
    }

    /// Initialise and report whether the SDK considers itself initialised.
    pub fn initialise_checked(&self) -> SdkResult<InitialiseOutcome> {
        let device_count = self.initialise()?;
        Ok(InitialiseOutcome {
            device_count,
            initialised: self.backend.is_initialised(),
        })
    }

    /// Initialise, then switch to `config.keycode_mode`.
    pub fn initialise_with(&self, config: &SdkConfig) -> SdkResult<usize> {
        let devices = self.initialise()?;
        if config.keycode_mode != KeyCodeMode::Hid {
            self.set_keycode_mode(config.keycode_mode)?;
        }
        Ok(devices)
    }

    /// Release SDK resources.
    pub fn uninitialise(&self) -> SdkResult<()> {
        self.backend.uninitialise()
    }

    /// Whether the SDK is initialised.
    pub fn is_initialised(&self) -> bool {
        self.backend.is_initialised()
    }

    /// Switch the SDK to `mode`. The tracked mode changes only on success.
    pub fn set_keycode_mode(&self, mode: KeyCodeMode) -> SdkResult<()> {
        let _writer = self.mode_writer.lock();
        self.backend.set_keycode_mode(mode)?;
        let previous = self.mode.load();
        self.mode.store(mode);
        tracing::debug!(from = %previous, to = %mode, "Keycode mode changed");
        Ok(())
    }

    /// Mode the SDK was last successfully switched to.
    pub fn keycode_mode(&self) -> KeyCodeMode {
        self.mode.load()
    }

    /// Depression of `code` on all devices combined.
    pub fn read_analog(&self, code: NativeCode) -> SdkResult<f32> {
        self.backend.read_analog(code)
    }

    /// Depression of `code` on `device`.
    pub fn read_analog_device(&self, code: NativeCode, device: DeviceId) -> SdkResult<f32> {
        self.backend.read_analog_device(code, device)
    }

    /// Connected devices, up to the configured capacity.
    pub fn connected_devices(&self) -> SdkResult<Vec<DeviceInfo>> {
        self.backend.connected_devices(self.device_capacity)
    }

    /// Connected devices, up to `capacity`.
    pub fn connected_devices_with_capacity(&self, capacity: usize) -> SdkResult<Vec<DeviceInfo>> {
        self.backend.connected_devices(capacity)
    }

    /// Up to `capacity` pressed keys on all devices.
    pub fn read_full_buffer(&self, capacity: usize) -> SdkResult<Vec<AnalogSample>> {
        self.backend.read_full_buffer(capacity)
    }

    /// Up to `capacity` pressed keys on `device`.
    pub fn read_full_buffer_device(
        &self,
        capacity: usize,
        device: DeviceId,
    ) -> SdkResult<Vec<AnalogSample>> {
        self.backend.read_full_buffer_device(capacity, device)
    }

    /// Register `handler` for hot-plug events, replacing any previous one.
    ///
    /// The handler runs on an SDK thread and must not block.
    pub fn set_device_event_callback<F>(&self, handler: F) -> SdkResult<()>
    where
        F: Fn(DeviceEventKind, &DeviceInfo) + Send + Sync + 'static,
    {
        let handler: DeviceEventHandler = Arc::new(handler);
        self.backend.set_device_event_handler(handler)
    }

    /// Stop delivering hot-plug events.
    pub fn clear_device_event_callback(&self) -> SdkResult<()> {
        self.backend.clear_device_event_handler()
    }
}
