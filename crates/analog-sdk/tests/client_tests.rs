//! Session behaviour over the scriptable backend.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use analog_keycodes::KeyCodeMode;
use analog_sdk::DeviceEventHandler;
use analog_sdk::prelude::*;
use analog_test_helpers::prelude::*;
use parking_lot::Mutex;

fn client() -> AnalogClient<MockAnalogBackend> {
    AnalogClient::new(MockAnalogBackend::new())
}

#[test]
fn test_initialise_reports_device_count() -> TestResult {
    let client = AnalogClient::new(MockAnalogBackend::uninitialised());
    client
        .backend()
        .set_devices(vec![keyboard_fixture(1), keypad_fixture(2)]);

    assert!(!client.is_initialised());
    assert_eq!(client.initialise()?, 2);
    assert!(client.is_initialised());
    assert_eq!(client.keycode_mode(), KeyCodeMode::Hid);
    Ok(())
}

#[test]
fn test_initialise_checked_reports_state() -> TestResult {
    let client = client();
    let outcome = client.initialise_checked()?;
    assert_eq!(
        outcome,
        InitialiseOutcome {
            device_count: 0,
            initialised: true,
        }
    );
    Ok(())
}

#[test]
fn test_initialise_failure_propagates() {
    let client = client();
    client
        .backend()
        .fail_once(MockOp::Initialise, AnalogStatus::NoPlugins);
    assert_eq!(must_status(client.initialise()), AnalogStatus::NoPlugins);
}

#[test]
fn test_reads_before_initialise_fail() {
    let client = AnalogClient::new(MockAnalogBackend::uninitialised());
    assert_eq!(must_status(client.read_analog(0x04)), AnalogStatus::UnInitialised);
}

#[test]
fn test_mode_tracked_only_on_success() -> TestResult {
    let client = client();
    client.set_keycode_mode(KeyCodeMode::ScanCode1)?;
    assert_eq!(client.keycode_mode(), KeyCodeMode::ScanCode1);

    client
        .backend()
        .fail_once(MockOp::SetKeycodeMode, AnalogStatus::NotAvailable);
    assert_eq!(
        must_status(client.set_keycode_mode(KeyCodeMode::VirtualKeyTranslate)),
        AnalogStatus::NotAvailable
    );
    assert_eq!(client.keycode_mode(), KeyCodeMode::ScanCode1);
    Ok(())
}

#[test]
fn test_initialise_resets_mode_to_hid() -> TestResult {
    let client = client();
    client.set_keycode_mode(KeyCodeMode::VirtualKey)?;
    client.initialise()?;
    assert_eq!(client.keycode_mode(), KeyCodeMode::Hid);
    Ok(())
}

/// Backend that stalls after applying one particular mode.
struct StallingModeBackend {
    inner: MockAnalogBackend,
    stall_on: KeyCodeMode,
    applied: Barrier,
}

impl AnalogBackend for StallingModeBackend {
    fn initialise(&self) -> SdkResult<usize> {
        self.inner.initialise()
    }

    fn uninitialise(&self) -> SdkResult<()> {
        self.inner.uninitialise()
    }

    fn is_initialised(&self) -> bool {
        self.inner.is_initialised()
    }

    fn set_keycode_mode(&self, mode: KeyCodeMode) -> SdkResult<()> {
        self.inner.set_keycode_mode(mode)?;
        if mode == self.stall_on {
            self.applied.wait();
            thread::sleep(Duration::from_millis(50));
        }
        Ok(())
    }

    fn read_analog(&self, code: NativeCode) -> SdkResult<f32> {
        self.inner.read_analog(code)
    }

    fn read_analog_device(&self, code: NativeCode, device: DeviceId) -> SdkResult<f32> {
        self.inner.read_analog_device(code, device)
    }

    fn connected_devices(&self, capacity: usize) -> SdkResult<Vec<DeviceInfo>> {
        self.inner.connected_devices(capacity)
    }

    fn read_full_buffer(&self, capacity: usize) -> SdkResult<Vec<AnalogSample>> {
        self.inner.read_full_buffer(capacity)
    }

    fn read_full_buffer_device(
        &self,
        capacity: usize,
        device: DeviceId,
    ) -> SdkResult<Vec<AnalogSample>> {
        self.inner.read_full_buffer_device(capacity, device)
    }

    fn set_device_event_handler(&self, handler: DeviceEventHandler) -> SdkResult<()> {
        self.inner.set_device_event_handler(handler)
    }

    fn clear_device_event_handler(&self) -> SdkResult<()> {
        self.inner.clear_device_event_handler()
    }
}

#[test]
fn test_concurrent_mode_switches_keep_tracked_mode_in_sync() -> TestResult {
    let client = AnalogClient::new(StallingModeBackend {
        inner: MockAnalogBackend::new(),
        stall_on: KeyCodeMode::ScanCode1,
        applied: Barrier::new(2),
    });

    thread::scope(|scope| -> TestResult {
        let first = scope.spawn(|| client.set_keycode_mode(KeyCodeMode::ScanCode1));
        // The first switch has reached the SDK but not yet been recorded.
        client.backend().applied.wait();
        let later = client.set_keycode_mode(KeyCodeMode::VirtualKey);
        first
            .join()
            .map_err(|panic| format!("mode switch thread panicked: {panic:?}"))??;
        later?;
        Ok(())
    })?;

    assert_eq!(client.backend().inner.mode(), KeyCodeMode::VirtualKey);
    assert_eq!(client.keycode_mode(), KeyCodeMode::VirtualKey);
    Ok(())
}

#[test]
fn test_initialise_with_applies_configured_mode() -> TestResult {
    let client = client();
    let config = SdkConfig {
        keycode_mode: KeyCodeMode::ScanCode1,
        ..SdkConfig::default()
    };
    client.initialise_with(&config)?;
    assert_eq!(client.keycode_mode(), KeyCodeMode::ScanCode1);
    assert_eq!(
        client.backend().calls(),
        vec![
            MockCall::Initialise,
            MockCall::SetKeycodeMode(KeyCodeMode::ScanCode1)
        ]
    );
    Ok(())
}

#[test]
fn test_read_analog_device_passes_device() -> TestResult {
    let client = client();
    client
        .backend()
        .script_device(0x1E, DeviceId(42), [0.75]);
    assert_analog_eq(client.read_analog_device(0x1E, DeviceId(42))?, 0.75);
    assert_eq!(
        client.backend().calls(),
        vec![MockCall::ReadAnalogDevice(0x1E, DeviceId(42))]
    );
    Ok(())
}

#[test]
fn test_read_status_passes_through_unchanged() {
    let client = client();
    client
        .backend()
        .script_results(0x04, [Err(AnalogStatus::DeviceDisconnected)]);
    let err = must_err(client.read_analog(0x04));
    assert!(matches!(
        err,
        SdkError::Status(AnalogStatus::DeviceDisconnected)
    ));
    assert!(err.is_disconnect());
}

#[test]
fn test_connected_devices_uses_configured_capacity() -> TestResult {
    let client = AnalogClient::new(MockAnalogBackend::new()).with_device_capacity(1);
    client
        .backend()
        .set_devices(vec![keyboard_fixture(1), keypad_fixture(2)]);

    let devices = client.connected_devices()?;
    assert_eq!(devices, vec![keyboard_fixture(1)]);
    assert_eq!(client.connected_devices_with_capacity(8)?.len(), 2);
    Ok(())
}

#[test]
fn test_full_buffer_per_device() -> TestResult {
    let client = client();
    client.backend().set_device_buffer(
        DeviceId(5),
        vec![AnalogSample::new(0x1E, 0.4), AnalogSample::new(0x1F, 0.9)],
    );
    let samples = client.read_full_buffer_device(16, DeviceId(5))?;
    assert_eq!(samples.len(), 2);
    assert!(client.read_full_buffer_device(16, DeviceId(6))?.is_empty());
    Ok(())
}

#[test]
fn test_device_event_callback_receives_events() -> TestResult {
    let client = client();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    client.set_device_event_callback(move |kind, info| {
        sink.lock().push((kind, info.device_id));
    })?;

    let keyboard = keyboard_fixture(7);
    assert!(
        client
            .backend()
            .emit_device_event(DeviceEventKind::Connected, &keyboard)
    );
    assert!(
        client
            .backend()
            .emit_device_event(DeviceEventKind::Disconnected, &keyboard)
    );

    assert_eq!(
        *seen.lock(),
        vec![
            (DeviceEventKind::Connected, DeviceId(7)),
            (DeviceEventKind::Disconnected, DeviceId(7)),
        ]
    );
    Ok(())
}

#[test]
fn test_device_event_callback_replaced_by_latest() -> TestResult {
    let client = client();
    let first = Arc::new(Mutex::new(0_u32));
    let second = Arc::new(Mutex::new(0_u32));

    let sink = Arc::clone(&first);
    client.set_device_event_callback(move |_, _| *sink.lock() += 1)?;
    let sink = Arc::clone(&second);
    client.set_device_event_callback(move |_, _| *sink.lock() += 1)?;

    client
        .backend()
        .emit_device_event(DeviceEventKind::Connected, &keypad_fixture(3));
    assert_eq!(*first.lock(), 0);
    assert_eq!(*second.lock(), 1);
    Ok(())
}

#[test]
fn test_clear_device_event_callback_stops_delivery() -> TestResult {
    let client = client();
    client.set_device_event_callback(|_, _| {})?;
    client.clear_device_event_callback()?;
    assert!(
        !client
            .backend()
            .emit_device_event(DeviceEventKind::Connected, &keyboard_fixture(1))
    );
    Ok(())
}

#[test]
fn test_uninitialise_drops_handler() -> TestResult {
    let client = client();
    client.set_device_event_callback(|_, _| {})?;
    client.uninitialise()?;
    assert!(!client.is_initialised());
    assert!(!client.backend().has_handler());
    Ok(())
}
