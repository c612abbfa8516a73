//! C ABI of the SDK shared library.
//!
//! Every function is `cdecl` and exported under the names in [`symbols`].

use std::ffi::{CStr, c_char, c_int, c_uint};

use crate::device::{DeviceId, DeviceInfo, DeviceType};
use crate::error::{SdkError, SdkResult};

/// Device info as laid out by the SDK.
#[repr(C)]
#[derive(Debug)]
pub struct DeviceInfoFfi {
    /// USB vendor ID.
    pub vendor_id: u16,
    /// USB product ID.
    pub product_id: u16,
    /// NUL-terminated manufacturer name, may be null.
    pub manufacturer_name: *const c_char,
    /// NUL-terminated device name, may be null.
    pub device_name: *const c_char,
    /// SDK device identifier.
    pub device_id: u64,
    /// Native device type tag.
    pub device_type: c_int,
}

/// Hot-plug callback signature.
pub type DeviceEventCallback = extern "C" fn(event: c_int, info: *mut DeviceInfoFfi);

/// `int wooting_analog_initialise(void)`
pub type InitialiseFn = unsafe extern "C" fn() -> c_int;
/// `int wooting_analog_uninitialise(void)`
pub type UninitialiseFn = unsafe extern "C" fn() -> c_int;
/// `bool wooting_analog_is_initialised(void)`
pub type IsInitialisedFn = unsafe extern "C" fn() -> bool;
/// `int wooting_analog_set_keycode_mode(int mode)`
pub type SetKeycodeModeFn = unsafe extern "C" fn(mode: c_int) -> c_int;
/// `float wooting_analog_read_analog(unsigned short code)`
pub type ReadAnalogFn = unsafe extern "C" fn(code: u16) -> f32;
/// `float wooting_analog_read_analog_device(unsigned short code, uint64_t device_id)`
pub type ReadAnalogDeviceFn = unsafe extern "C" fn(code: u16, device_id: u64) -> f32;
/// `int wooting_analog_get_connected_devices_info(DeviceInfo_FFI **buffer, unsigned int len)`
pub type GetConnectedDevicesInfoFn =
    unsafe extern "C" fn(buffer: *mut *mut DeviceInfoFfi, len: c_uint) -> c_int;
/// `int wooting_analog_read_full_buffer(unsigned short *codes, float *values, unsigned int len)`
pub type ReadFullBufferFn =
    unsafe extern "C" fn(codes: *mut u16, values: *mut f32, len: c_uint) -> c_int;
/// `int wooting_analog_read_full_buffer_device(..., uint64_t device_id)`
pub type ReadFullBufferDeviceFn = unsafe extern "C" fn(
    codes: *mut u16,
    values: *mut f32,
    len: c_uint,
    device_id: u64,
) -> c_int;
/// `int wooting_analog_set_device_event_cb(void (*cb)(int, DeviceInfo_FFI *))`
pub type SetDeviceEventCbFn = unsafe extern "C" fn(cb: DeviceEventCallback) -> c_int;
/// `int wooting_analog_clear_device_event_cb(void)`
pub type ClearDeviceEventCbFn = unsafe extern "C" fn() -> c_int;

/// Exported symbol names.
pub mod symbols {
    /// Initialise the SDK.
    pub const INITIALISE: &str = "wooting_analog_initialise";
    /// Uninitialise the SDK.
    pub const UNINITIALISE: &str = "wooting_analog_uninitialise";
    /// Query initialisation state.
    pub const IS_INITIALISED: &str = "wooting_analog_is_initialised";
    /// Select the keycode mode.
    pub const SET_KEYCODE_MODE: &str = "wooting_analog_set_keycode_mode";
    /// Read one key, all devices.
    pub const READ_ANALOG: &str = "wooting_analog_read_analog";
    /// Read one key, one device.
    pub const READ_ANALOG_DEVICE: &str = "wooting_analog_read_analog_device";
    /// Enumerate devices.
    pub const GET_CONNECTED_DEVICES_INFO: &str = "wooting_analog_get_connected_devices_info";
    /// Read all pressed keys, all devices.
    pub const READ_FULL_BUFFER: &str = "wooting_analog_read_full_buffer";
    /// Read all pressed keys, one device.
    pub const READ_FULL_BUFFER_DEVICE: &str = "wooting_analog_read_full_buffer_device";
    /// Register the hot-plug callback.
    pub const SET_DEVICE_EVENT_CB: &str = "wooting_analog_set_device_event_cb";
    /// Remove the hot-plug callback.
    pub const CLEAR_DEVICE_EVENT_CB: &str = "wooting_analog_clear_device_event_cb";
}

/// Copy SDK-owned device info into an owned [`DeviceInfo`].
///
/// # Safety
///
/// `ptr` must be null or point to a valid `DeviceInfoFfi` whose name fields
/// are null or valid NUL-terminated strings, all live for the call.
pub unsafe fn device_info_from_ffi(ptr: *const DeviceInfoFfi) -> SdkResult<DeviceInfo> {
    // SAFETY: caller guarantees `ptr` is null or valid for reads.
    let Some(raw) = (unsafe { ptr.as_ref() }) else {
        return Err(SdkError::InvalidDeviceInfo("null device pointer".to_string()));
    };
    // SAFETY: caller guarantees the name fields are null or valid C strings.
    let manufacturer_name = unsafe { owned_string(raw.manufacturer_name) };
    // SAFETY: as above.
    let device_name = unsafe { owned_string(raw.device_name) };

    Ok(DeviceInfo {
        vendor_id: raw.vendor_id,
        product_id: raw.product_id,
        manufacturer_name,
        device_name,
        device_id: DeviceId(raw.device_id),
        device_type: DeviceType::from_raw(raw.device_type),
    })
}

/// # Safety
///
/// `ptr` must be null or a valid NUL-terminated string.
unsafe fn owned_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    let text = unsafe { CStr::from_ptr(ptr) };
    text.to_string_lossy().into_owned()
}
