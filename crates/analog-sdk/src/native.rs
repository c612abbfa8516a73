//! Backend over the SDK shared library, resolved at runtime.

use std::ffi::{c_int, c_uint};
use std::path::{Path, PathBuf};
use std::ptr;

use libloading::Library;

use analog_keycodes::{KeyCodeMode, NativeCode};

use crate::backend::AnalogBackend;
use crate::callback;
use crate::device::{DeviceEventHandler, DeviceId, DeviceInfo};
use crate::error::{SdkError, SdkResult, check_count, check_status, check_value};
use crate::ffi::{self, DeviceInfoFfi, symbols};
use crate::sample::AnalogSample;

/// Platform file name of the SDK wrapper library.
pub fn default_library_name() -> PathBuf {
    PathBuf::from(libloading::library_filename("wooting_analog_wrapper"))
}

/// Resolved entry points. `None` when the library does not export the symbol.
#[derive(Debug, Default, Clone, Copy)]
struct Symbols {
    initialise: Option<ffi::InitialiseFn>,
    uninitialise: Option<ffi::UninitialiseFn>,
    is_initialised: Option<ffi::IsInitialisedFn>,
    set_keycode_mode: Option<ffi::SetKeycodeModeFn>,
    read_analog: Option<ffi::ReadAnalogFn>,
    read_analog_device: Option<ffi::ReadAnalogDeviceFn>,
    get_connected_devices_info: Option<ffi::GetConnectedDevicesInfoFn>,
    read_full_buffer: Option<ffi::ReadFullBufferFn>,
    read_full_buffer_device: Option<ffi::ReadFullBufferDeviceFn>,
    set_device_event_cb: Option<ffi::SetDeviceEventCbFn>,
    clear_device_event_cb: Option<ffi::ClearDeviceEventCbFn>,
}

impl Symbols {
    fn resolve(library: &Library) -> Self {
        Self {
            initialise: lookup(library, symbols::INITIALISE),
            uninitialise: lookup(library, symbols::UNINITIALISE),
            is_initialised: lookup(library, symbols::IS_INITIALISED),
            set_keycode_mode: lookup(library, symbols::SET_KEYCODE_MODE),
            read_analog: lookup(library, symbols::READ_ANALOG),
            read_analog_device: lookup(library, symbols::READ_ANALOG_DEVICE),
            get_connected_devices_info: lookup(library, symbols::GET_CONNECTED_DEVICES_INFO),
            read_full_buffer: lookup(library, symbols::READ_FULL_BUFFER),
            read_full_buffer_device: lookup(library, symbols::READ_FULL_BUFFER_DEVICE),
            set_device_event_cb: lookup(library, symbols::SET_DEVICE_EVENT_CB),
            clear_device_event_cb: lookup(library, symbols::CLEAR_DEVICE_EVENT_CB),
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        [
            (self.initialise.is_none(), symbols::INITIALISE),
            (self.uninitialise.is_none(), symbols::UNINITIALISE),
            (self.is_initialised.is_none(), symbols::IS_INITIALISED),
            (self.set_keycode_mode.is_none(), symbols::SET_KEYCODE_MODE),
            (self.read_analog.is_none(), symbols::READ_ANALOG),
            (self.read_analog_device.is_none(), symbols::READ_ANALOG_DEVICE),
            (
                self.get_connected_devices_info.is_none(),
                symbols::GET_CONNECTED_DEVICES_INFO,
            ),
            (self.read_full_buffer.is_none(), symbols::READ_FULL_BUFFER),
            (
                self.read_full_buffer_device.is_none(),
                symbols::READ_FULL_BUFFER_DEVICE,
            ),
            (self.set_device_event_cb.is_none(), symbols::SET_DEVICE_EVENT_CB),
            (
                self.clear_device_event_cb.is_none(),
                symbols::CLEAR_DEVICE_EVENT_CB,
            ),
        ]
        .into_iter()
        .filter_map(|(missing, name)| missing.then_some(name))
        .collect()
    }
}

fn lookup<T: Copy>(library: &Library, name: &'static str) -> Option<T> {
    // SAFETY: every `T` passed here is the C signature declared for `name` in `ffi`.
    let symbol = unsafe { library.get::<T>(name.as_bytes()) };
    match symbol {
        Ok(symbol) => Some(*symbol),
        Err(e) => {
            tracing::debug!(symbol = name, error = %e, "SDK symbol not exported");
            None
        }
    }
}

fn require<T>(entry: Option<T>, name: &'static str) -> SdkResult<T> {
    entry.ok_or(SdkError::MissingSymbol(name))
}

fn native_len(capacity: usize) -> SdkResult<c_uint> {
    c_uint::try_from(capacity)
        .ok()
        .ok_or(SdkError::CapacityTooLarge(capacity))
}

/// The SDK wrapper library, loaded for the life of this value.
///
/// Dropping it uninitialises the SDK if needed and forgets any registered
/// hot-plug handler before the library is unloaded.
pub struct NativeSdk {
    path: PathBuf,
    symbols: Symbols,
    // Declared last: the resolved entry points must not outlive it.
    _library: Library,
}

impl std::fmt::Debug for NativeSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeSdk")
            .field("path", &self.path)
            .field("missing", &self.symbols.missing())
            .finish_non_exhaustive()
    }
}

impl NativeSdk {
    /// Load the library at `path`, or by name through the platform search path.
    ///
    /// Entry points the library lacks are reported lazily as
    /// [`SdkError::MissingSymbol`] when called.
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref().to_path_buf();
        // SAFETY: loading runs the library's initialisers; the SDK wrapper has
        // no load-time requirements beyond being a valid shared object.
        let library = unsafe { Library::new(&path) }.map_err(|source| SdkError::LibraryLoad {
            path: path.clone(),
            source,
        })?;
        let symbols = Symbols::resolve(&library);

        let missing = symbols.missing();
        if missing.is_empty() {
            tracing::info!(path = %path.display(), "SDK library loaded");
        } else {
            tracing::warn!(
                path = %path.display(),
                missing = ?missing,
                "SDK library loaded with missing entry points"
            );
        }

        Ok(Self {
            path,
            symbols,
            _library: library,
        })
    }

    /// Load the wrapper library by its platform file name.
    pub fn load_default() -> SdkResult<Self> {
        Self::load(default_library_name())
    }

    /// Path the library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry points the library does not export.
    pub fn missing_symbols(&self) -> Vec<&'static str> {
        self.symbols.missing()
    }

    fn read_buffer(
        &self,
        capacity: usize,
        read: impl FnOnce(*mut u16, *mut f32, c_uint) -> c_int,
    ) -> SdkResult<Vec<AnalogSample>> {
        let len = native_len(capacity)?;
        let mut codes: Vec<NativeCode> = vec![0; capacity];
        let mut values: Vec<f32> = vec![0.0; capacity];

        let count = check_count(read(codes.as_mut_ptr(), values.as_mut_ptr(), len))?.min(capacity);

        Ok(codes
            .into_iter()
            .zip(values)
            .take(count)
            .map(|(code, value)| AnalogSample::new(code, value))
            .collect())
    }
}

impl AnalogBackend for NativeSdk {
    fn initialise(&self) -> SdkResult<usize> {
        let f = require(self.symbols.initialise, symbols::INITIALISE)?;
        // SAFETY: no arguments; the library is loaded for the life of `self`.
        let code = unsafe { f() };
        let devices = check_count(code)?;
        tracing::info!(devices, "SDK initialised");
        Ok(devices)
    }

    fn uninitialise(&self) -> SdkResult<()> {
        let f = require(self.symbols.uninitialise, symbols::UNINITIALISE)?;
        // SAFETY: no arguments; the library is loaded for the life of `self`.
        let code = unsafe { f() };
        check_status(code)?;
        tracing::info!("SDK uninitialised");
        Ok(())
    }

    fn is_initialised(&self) -> bool {
        let Some(f) = self.symbols.is_initialised else {
            return false;
        };
        // SAFETY: no arguments; the library is loaded for the life of `self`.
        unsafe { f() }
    }

    fn set_keycode_mode(&self, mode: KeyCodeMode) -> SdkResult<()> {
        let f = require(self.symbols.set_keycode_mode, symbols::SET_KEYCODE_MODE)?;
        // SAFETY: the mode tag is one of the values the SDK enumerates.
        let code = unsafe { f(c_int::from(mode.as_raw())) };
        check_status(code)
    }

    fn read_analog(&self, code: NativeCode) -> SdkResult<f32> {
        let f = require(self.symbols.read_analog, symbols::READ_ANALOG)?;
        // SAFETY: plain value argument.
        let value = unsafe { f(code) };
        check_value(value)
    }

    fn read_analog_device(&self, code: NativeCode, device: DeviceId) -> SdkResult<f32> {
        let f = require(self.symbols.read_analog_device, symbols::READ_ANALOG_DEVICE)?;
        // SAFETY: plain value arguments.
        let value = unsafe { f(code, device.get()) };
        check_value(value)
    }

    fn connected_devices(&self, capacity: usize) -> SdkResult<Vec<DeviceInfo>> {
        let f = require(
            self.symbols.get_connected_devices_info,
            symbols::GET_CONNECTED_DEVICES_INFO,
        )?;
        let len = native_len(capacity)?;
        // The SDK fills an array of pointers to device structs it owns.
        let mut buffer: Vec<*mut DeviceInfoFfi> = vec![ptr::null_mut(); capacity];
        // SAFETY: `buffer` has room for `len` pointers.
        let code = unsafe { f(buffer.as_mut_ptr(), len) };
        let count = check_count(code)?.min(capacity);

        buffer
            .iter()
            .take(count)
            // SAFETY: the first `count` entries point at SDK-owned device info
            // that stays valid until the next enumeration.
            .map(|&entry| unsafe { ffi::device_info_from_ffi(entry) })
            .collect()
    }

    fn read_full_buffer(&self, capacity: usize) -> SdkResult<Vec<AnalogSample>> {
        let f = require(self.symbols.read_full_buffer, symbols::READ_FULL_BUFFER)?;
        self.read_buffer(capacity, |codes, values, len| {
            // SAFETY: both buffers hold `len` elements.
            unsafe { f(codes, values, len) }
        })
    }

    fn read_full_buffer_device(
        &self,
        capacity: usize,
        device: DeviceId,
    ) -> SdkResult<Vec<AnalogSample>> {
        let f = require(
            self.symbols.read_full_buffer_device,
            symbols::READ_FULL_BUFFER_DEVICE,
        )?;
        self.read_buffer(capacity, |codes, values, len| {
            // SAFETY: both buffers hold `len` elements.
            unsafe { f(codes, values, len, device.get()) }
        })
    }

    fn set_device_event_handler(&self, handler: DeviceEventHandler) -> SdkResult<()> {
        let f = require(self.symbols.set_device_event_cb, symbols::SET_DEVICE_EVENT_CB)?;
        let previous = callback::replace(Some(handler));
        // SAFETY: the trampoline is a plain `extern "C"` fn valid for the process.
        let code = unsafe { f(callback::trampoline) };
        if let Err(e) = check_status(code) {
            drop(callback::replace(previous));
            return Err(e);
        }
        tracing::debug!("Device event handler registered");
        Ok(())
    }

    fn clear_device_event_handler(&self) -> SdkResult<()> {
        let f = require(
            self.symbols.clear_device_event_cb,
            symbols::CLEAR_DEVICE_EVENT_CB,
        )?;
        // SAFETY: no arguments; the library is loaded for the life of `self`.
        let code = unsafe { f() };
        check_status(code)?;
        callback::clear();
        tracing::debug!("Device event handler cleared");
        Ok(())
    }
}

impl Drop for NativeSdk {
    fn drop(&mut self) {
        if callback::is_set()
            && let Err(e) = self.clear_device_event_handler()
        {
            tracing::warn!(error = %e, "Failed to clear device event handler on unload");
            callback::clear();
        }
        if self.is_initialised()
            && let Err(e) = self.uninitialise()
        {
            tracing::warn!(error = %e, "Failed to uninitialise SDK on unload");
        }
    }
}
