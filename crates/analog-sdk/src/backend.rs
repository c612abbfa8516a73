//! The operations an analog SDK backend provides.

use analog_keycodes::{KeyCodeMode, NativeCode};

use crate::device::{DeviceEventHandler, DeviceId, DeviceInfo};
use crate::error::SdkResult;
use crate::sample::AnalogSample;

/// Raw SDK operations.
///
/// Implemented by [`NativeSdk`](crate::NativeSdk) over the shared library and
/// by test doubles. Failure statuses surface as
/// [`SdkError::Status`](crate::SdkError::Status) unchanged; implementations do
/// not retry or reinterpret them.
pub trait AnalogBackend: Send + Sync {
    /// Initialise the SDK. Returns the number of connected devices.
    fn initialise(&self) -> SdkResult<usize>;

    /// Release SDK resources.
    fn uninitialise(&self) -> SdkResult<()>;

    /// Whether the SDK is initialised.
    fn is_initialised(&self) -> bool;

    /// Select how subsequent codes are interpreted.
    fn set_keycode_mode(&self, mode: KeyCodeMode) -> SdkResult<()>;

    /// Depression of `code` on all devices combined, in `[0.0, 1.0]`.
    fn read_analog(&self, code: NativeCode) -> SdkResult<f32>;

    /// Depression of `code` on one device, in `[0.0, 1.0]`.
    fn read_analog_device(&self, code: NativeCode, device: DeviceId) -> SdkResult<f32>;

    /// Up to `capacity` connected devices.
    fn connected_devices(&self, capacity: usize) -> SdkResult<Vec<DeviceInfo>>;

    /// Up to `capacity` pressed keys on all devices, in SDK order.
    fn read_full_buffer(&self, capacity: usize) -> SdkResult<Vec<AnalogSample>>;

    /// Up to `capacity` pressed keys on one device, in SDK order.
    fn read_full_buffer_device(
        &self,
        capacity: usize,
        device: DeviceId,
    ) -> SdkResult<Vec<AnalogSample>>;

    /// Register the hot-plug handler, replacing any previous one.
    fn set_device_event_handler(&self, handler: DeviceEventHandler) -> SdkResult<()>;

    /// Remove the hot-plug handler.
    fn clear_device_event_handler(&self) -> SdkResult<()>;
}

impl<B: AnalogBackend + ?Sized> AnalogBackend for &B {
    fn initialise(&self) -> SdkResult<usize> {
        (**self).initialise()
    }

    fn uninitialise(&self) -> SdkResult<()> {
        (**self).uninitialise()
    }

    fn is_initialised(&self) -> bool {
        (**self).is_initialised()
    }

    fn set_keycode_mode(&self, mode: KeyCodeMode) -> SdkResult<()> {
        (**self).set_keycode_mode(mode)
    }

    fn read_analog(&self, code: NativeCode) -> SdkResult<f32> {
        (**self).read_analog(code)
    }

    fn read_analog_device(&self, code: NativeCode, device: DeviceId) -> SdkResult<f32> {
        (**self).read_analog_device(code, device)
    }

    fn connected_devices(&self, capacity: usize) -> SdkResult<Vec<DeviceInfo>> {
        (**self).connected_devices(capacity)
    }

    fn read_full_buffer(&self, capacity: usize) -> SdkResult<Vec<AnalogSample>> {
        (**self).read_full_buffer(capacity)
    }

    fn read_full_buffer_device(
        &self,
        capacity: usize,
        device: DeviceId,
    ) -> SdkResult<Vec<AnalogSample>> {
        (**self).read_full_buffer_device(capacity, device)
    }

    fn set_device_event_handler(&self, handler: DeviceEventHandler) -> SdkResult<()> {
        (**self).set_device_event_handler(handler)
    }

    fn clear_device_event_handler(&self) -> SdkResult<()> {
        (**self).clear_device_event_handler()
    }
}
