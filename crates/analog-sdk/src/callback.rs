//! Process-wide slot for the hot-plug handler.
//!
//! The native callback carries no user-data pointer, so the registered
//! handler lives in a static and a single trampoline dispatches to it.

use std::ffi::c_int;
use std::panic::{AssertUnwindSafe, catch_unwind};

use parking_lot::RwLock;

use crate::device::{DeviceEventHandler, DeviceEventKind};
use crate::ffi::{DeviceInfoFfi, device_info_from_ffi};

static HANDLER: RwLock<Option<DeviceEventHandler>> = parking_lot::const_rwlock(None);

/// Store `handler`, returning the one it replaces.
pub(crate) fn replace(handler: Option<DeviceEventHandler>) -> Option<DeviceEventHandler> {
    std::mem::replace(&mut *HANDLER.write(), handler)
}

/// Drop the stored handler.
pub(crate) fn clear() {
    drop(replace(None));
}

/// Whether a handler is stored.
pub(crate) fn is_set() -> bool {
    HANDLER.read().is_some()
}

/// Entry point handed to the SDK.
pub(crate) extern "C" fn trampoline(event: c_int, info: *mut DeviceInfoFfi) {
    let Some(handler) = HANDLER.read().clone() else {
        return;
    };
    let Some(kind) = DeviceEventKind::from_raw(event) else {
        tracing::warn!(event, "Ignoring unknown device event");
        return;
    };
    // SAFETY: the SDK passes device info that stays valid for the callback.
    let info = match unsafe { device_info_from_ffi(info) } {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!(error = %e, %kind, "Dropping device event");
            return;
        }
    };

    tracing::debug!(%kind, device_id = %info.device_id, "Device event");
    if catch_unwind(AssertUnwindSafe(|| handler(kind, &info))).is_err() {
        tracing::error!(%kind, device_id = %info.device_id, "Device event handler panicked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceInfo;
    use parking_lot::Mutex;
    use std::ffi::CString;
    use std::sync::Arc;

    // Tests share the process-wide slot.
    static SERIAL: Mutex<()> = parking_lot::const_mutex(());

    fn recording_handler() -> (DeviceEventHandler, Arc<Mutex<Vec<(DeviceEventKind, DeviceInfo)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler: DeviceEventHandler =
            Arc::new(move |kind: DeviceEventKind, info: &DeviceInfo| {
                sink.lock().push((kind, info.clone()));
            });
        (handler, seen)
    }

    #[test]
    fn test_trampoline_dispatches_copied_info() -> Result<(), Box<dyn std::error::Error>> {
        let _guard = SERIAL.lock();
        let (handler, seen) = recording_handler();
        drop(replace(Some(handler)));

        let name = CString::new("Wooting Two")?;
        let mut native = DeviceInfoFfi {
            vendor_id: 0x31E3,
            product_id: 0x1200,
            manufacturer_name: std::ptr::null(),
            device_name: name.as_ptr(),
            device_id: 11,
            device_type: 1,
        };
        trampoline(1, &mut native);
        trampoline(2, &mut native);
        clear();

        let seen = seen.lock();
        let kinds: Vec<_> = seen.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            kinds,
            vec![DeviceEventKind::Connected, DeviceEventKind::Disconnected]
        );
        assert!(seen.iter().all(|(_, info)| info.device_name == "Wooting Two"));
        Ok(())
    }

    #[test]
    fn test_unknown_event_and_null_info_ignored() {
        let _guard = SERIAL.lock();
        let (handler, seen) = recording_handler();
        drop(replace(Some(handler)));

        trampoline(1, std::ptr::null_mut());
        trampoline(7, std::ptr::null_mut());
        clear();

        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_replace_returns_previous() {
        let _guard = SERIAL.lock();
        let (first, _) = recording_handler();
        let (second, _) = recording_handler();
        assert!(replace(Some(first)).is_none());
        assert!(replace(Some(second)).is_some());
        assert!(is_set());
        clear();
        assert!(!is_set());
    }
}
