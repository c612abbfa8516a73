//! Scriptable in-memory SDK backend.
//!
//! [`MockAnalogBackend`] plays back per-key value scripts, records every call
//! it receives and stores the registered hot-plug handler so tests can fire
//! events on demand.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

use analog_keycodes::{KeyCodeMode, NativeCode};
use analog_sdk::{
    AnalogBackend, AnalogSample, AnalogStatus, DeviceEventHandler, DeviceEventKind, DeviceId,
    DeviceInfo, DeviceType, SdkError, SdkResult,
};

/// One scripted reading: a value or a status the SDK reports instead.
pub type Reading = Result<f32, AnalogStatus>;

/// Backend operation, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    /// `initialise`
    Initialise,
    /// `uninitialise`
    Uninitialise,
    /// `set_keycode_mode`
    SetKeycodeMode,
    /// `read_analog` and `read_analog_device`
    ReadAnalog,
    /// `connected_devices`
    ConnectedDevices,
    /// `read_full_buffer` and `read_full_buffer_device`
    ReadFullBuffer,
    /// `set_device_event_handler`
    SetDeviceEventHandler,
    /// `clear_device_event_handler`
    ClearDeviceEventHandler,
}

/// A call received by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    /// `initialise()`
    Initialise,
    /// `uninitialise()`
    Uninitialise,
    /// `set_keycode_mode(mode)`
    SetKeycodeMode(KeyCodeMode),
    /// `read_analog(code)`
    ReadAnalog(NativeCode),
    /// `read_analog_device(code, device)`
    ReadAnalogDevice(NativeCode, DeviceId),
    /// `connected_devices(capacity)`
    ConnectedDevices(usize),
    /// `read_full_buffer(capacity)`
    ReadFullBuffer(usize),
    /// `read_full_buffer_device(capacity, device)`
    ReadFullBufferDevice(usize, DeviceId),
    /// `set_device_event_handler(..)`
    SetDeviceEventHandler,
    /// `clear_device_event_handler()`
    ClearDeviceEventHandler,
}

#[derive(Debug, Clone, Copy)]
struct Failure {
    status: AnalogStatus,
    remaining: Option<usize>,
}

#[derive(Default)]
struct MockState {
    initialised: bool,
    require_initialise: bool,
    mode: KeyCodeMode,
    scripts: HashMap<(NativeCode, Option<DeviceId>), VecDeque<Reading>>,
    reads: HashMap<NativeCode, usize>,
    calls: Vec<MockCall>,
    failures: HashMap<MockOp, Failure>,
    devices: Vec<DeviceInfo>,
    buffer: Vec<AnalogSample>,
    device_buffers: HashMap<DeviceId, Vec<AnalogSample>>,
    buffer_count_override: Option<usize>,
    handler: Option<DeviceEventHandler>,
}

impl MockState {
    fn take_failure(&mut self, op: MockOp) -> SdkResult<()> {
        let Some(failure) = self.failures.get_mut(&op) else {
            return Ok(());
        };
        let status = failure.status;
        let exhausted = match &mut failure.remaining {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            None => false,
        };
        if exhausted {
            self.failures.remove(&op);
        }
        Err(SdkError::Status(status))
    }

    fn check_initialised(&self) -> SdkResult<()> {
        if self.require_initialise && !self.initialised {
            Err(SdkError::Status(AnalogStatus::UnInitialised))
        } else {
            Ok(())
        }
    }

    fn next_reading(&mut self, code: NativeCode, device: Option<DeviceId>) -> Reading {
        *self.reads.entry(code).or_default() += 1;
        let key = match device {
            Some(id) if self.scripts.contains_key(&(code, Some(id))) => (code, Some(id)),
            _ => (code, None),
        };
        let Some(script) = self.scripts.get_mut(&key) else {
            return Ok(0.0);
        };
        // The final entry repeats forever.
        if script.len() > 1 {
            script.pop_front().unwrap_or(Ok(0.0))
        } else {
            script.front().copied().unwrap_or(Ok(0.0))
        }
    }

    fn buffer(&self, capacity: usize, device: Option<DeviceId>) -> Vec<AnalogSample> {
        let samples = match device {
            Some(id) => self.device_buffers.get(&id).map_or(&[][..], Vec::as_slice),
            None => self.buffer.as_slice(),
        };
        let reported = self.buffer_count_override.unwrap_or(samples.len());
        samples
            .iter()
            .copied()
            .take(reported.min(capacity))
            .collect()
    }
}

/// In-memory [`AnalogBackend`] with scripted readings.
///
/// Unscripted keys read `0.0`. A script yields its entries in order and then
/// keeps returning its last entry.
#[derive(Default)]
pub struct MockAnalogBackend {
    state: Mutex<MockState>,
}

impl std::fmt::Debug for MockAnalogBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockAnalogBackend")
            .field("initialised", &state.initialised)
            .field("mode", &state.mode)
            .field("calls", &state.calls.len())
            .finish_non_exhaustive()
    }
}

impl MockAnalogBackend {
    /// A backend that is already initialised and accepts every call.
    pub fn new() -> Self {
        let mock = Self::default();
        mock.state.lock().initialised = true;
        mock
    }

    /// A backend that starts uninitialised and rejects reads until
    /// [`initialise`](AnalogBackend::initialise) succeeds.
    pub fn uninitialised() -> Self {
        let mock = Self::default();
        mock.state.lock().require_initialise = true;
        mock
    }

    /// Script readings for `code` on all devices.
    pub fn script(&self, code: NativeCode, values: impl IntoIterator<Item = f32>) -> &Self {
        self.script_results(code, values.into_iter().map(Ok))
    }

    /// Script readings, including failure statuses, for `code` on all devices.
    pub fn script_results(
        &self,
        code: NativeCode,
        readings: impl IntoIterator<Item = Reading>,
    ) -> &Self {
        self.state
            .lock()
            .scripts
            .insert((code, None), readings.into_iter().collect());
        self
    }

    /// Script readings for `code` on one device.
    pub fn script_device(
        &self,
        code: NativeCode,
        device: DeviceId,
        values: impl IntoIterator<Item = f32>,
    ) -> &Self {
        self.state
            .lock()
            .scripts
            .insert((code, Some(device)), values.into_iter().map(Ok).collect());
        self
    }

    /// Hold `code` at a constant value.
    pub fn set_value(&self, code: NativeCode, value: f32) -> &Self {
        self.script(code, [value])
    }

    /// Devices returned by enumeration.
    pub fn set_devices(&self, devices: Vec<DeviceInfo>) -> &Self {
        self.state.lock().devices = devices;
        self
    }

    /// Samples returned by an all-device buffer read.
    pub fn set_buffer(&self, samples: Vec<AnalogSample>) -> &Self {
        self.state.lock().buffer = samples;
        self
    }

    /// Samples returned by a buffer read for `device`.
    pub fn set_device_buffer(&self, device: DeviceId, samples: Vec<AnalogSample>) -> &Self {
        self.state.lock().device_buffers.insert(device, samples);
        self
    }

    /// Report `count` entries from buffer reads regardless of the stored samples.
    pub fn report_buffer_count(&self, count: usize) -> &Self {
        self.state.lock().buffer_count_override = Some(count);
        self
    }

    /// Fail the next call to `op` with `status`.
    pub fn fail_once(&self, op: MockOp, status: AnalogStatus) -> &Self {
        self.fail_times(op, status, 1)
    }

    /// Fail the next `times` calls to `op` with `status`.
    pub fn fail_times(&self, op: MockOp, status: AnalogStatus, times: usize) -> &Self {
        if times > 0 {
            self.state.lock().failures.insert(
                op,
                Failure {
                    status,
                    remaining: Some(times),
                },
            );
        }
        self
    }

    /// Fail every call to `op` with `status` until cleared.
    pub fn fail_always(&self, op: MockOp, status: AnalogStatus) -> &Self {
        self.state.lock().failures.insert(
            op,
            Failure {
                status,
                remaining: None,
            },
        );
        self
    }

    /// Stop failing `op`.
    pub fn clear_failure(&self, op: MockOp) -> &Self {
        self.state.lock().failures.remove(&op);
        self
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().calls.clone()
    }

    /// Number of single-key reads of `code`, across devices.
    pub fn read_count(&self, code: NativeCode) -> usize {
        self.state.lock().reads.get(&code).copied().unwrap_or(0)
    }

    /// Mode the mock was last switched to.
    pub fn mode(&self) -> KeyCodeMode {
        self.state.lock().mode
    }

    /// Whether a hot-plug handler is registered.
    pub fn has_handler(&self) -> bool {
        self.state.lock().handler.is_some()
    }

    /// Deliver a hot-plug event to the registered handler.
    ///
    /// Returns `false` when no handler is registered.
    pub fn emit_device_event(&self, kind: DeviceEventKind, info: &DeviceInfo) -> bool {
        // Released before dispatch so the handler may call back into the mock.
        let handler = self.state.lock().handler.clone();
        match handler {
            Some(handler) => {
                handler(kind, info);
                true
            }
            None => false,
        }
    }

    fn record(&self, call: MockCall, op: MockOp) -> SdkResult<parking_lot::MutexGuard<'_, MockState>> {
        let mut state = self.state.lock();
        state.calls.push(call);
        state.take_failure(op)?;
        Ok(state)
    }
}

impl AnalogBackend for MockAnalogBackend {
    fn initialise(&self) -> SdkResult<usize> {
        let mut state = self.record(MockCall::Initialise, MockOp::Initialise)?;
        state.initialised = true;
        state.mode = KeyCodeMode::Hid;
        Ok(state.devices.len())
    }

    fn uninitialise(&self) -> SdkResult<()> {
        let mut state = self.record(MockCall::Uninitialise, MockOp::Uninitialise)?;
        state.check_initialised()?;
        state.initialised = false;
        state.handler = None;
        Ok(())
    }

    fn is_initialised(&self) -> bool {
        self.state.lock().initialised
    }

    fn set_keycode_mode(&self, mode: KeyCodeMode) -> SdkResult<()> {
        let mut state = self.record(MockCall::SetKeycodeMode(mode), MockOp::SetKeycodeMode)?;
        state.check_initialised()?;
        state.mode = mode;
        Ok(())
    }

    fn read_analog(&self, code: NativeCode) -> SdkResult<f32> {
        let mut state = self.record(MockCall::ReadAnalog(code), MockOp::ReadAnalog)?;
        state.check_initialised()?;
        state.next_reading(code, None).map_err(SdkError::Status)
    }

    fn read_analog_device(&self, code: NativeCode, device: DeviceId) -> SdkResult<f32> {
        let mut state =
            self.record(MockCall::ReadAnalogDevice(code, device), MockOp::ReadAnalog)?;
        state.check_initialised()?;
        state.next_reading(code, Some(device)).map_err(SdkError::Status)
    }

    fn connected_devices(&self, capacity: usize) -> SdkResult<Vec<DeviceInfo>> {
        let state = self.record(MockCall::ConnectedDevices(capacity), MockOp::ConnectedDevices)?;
        state.check_initialised()?;
        Ok(state.devices.iter().take(capacity).cloned().collect())
    }

    fn read_full_buffer(&self, capacity: usize) -> SdkResult<Vec<AnalogSample>> {
        let state = self.record(MockCall::ReadFullBuffer(capacity), MockOp::ReadFullBuffer)?;
        state.check_initialised()?;
        Ok(state.buffer(capacity, None))
    }

    fn read_full_buffer_device(
        &self,
        capacity: usize,
        device: DeviceId,
    ) -> SdkResult<Vec<AnalogSample>> {
        let state = self.record(
            MockCall::ReadFullBufferDevice(capacity, device),
            MockOp::ReadFullBuffer,
        )?;
        state.check_initialised()?;
        Ok(state.buffer(capacity, Some(device)))
    }

    fn set_device_event_handler(&self, handler: DeviceEventHandler) -> SdkResult<()> {
        let mut state = self.record(
            MockCall::SetDeviceEventHandler,
            MockOp::SetDeviceEventHandler,
        )?;
        state.check_initialised()?;
        state.handler = Some(handler);
        Ok(())
    }

    fn clear_device_event_handler(&self) -> SdkResult<()> {
        let mut state = self.record(
            MockCall::ClearDeviceEventHandler,
            MockOp::ClearDeviceEventHandler,
        )?;
        state.handler = None;
        Ok(())
    }
}

/// A full-size analog keyboard.
pub fn keyboard_fixture(device_id: u64) -> DeviceInfo {
    DeviceInfo::new(0x31E3, 0x1220, DeviceId(device_id))
        .with_manufacturer("Wooting")
        .with_name("Wooting Two HE")
        .with_type(DeviceType::Keyboard)
}

/// An analog keypad.
pub fn keypad_fixture(device_id: u64) -> DeviceInfo {
    DeviceInfo::new(0x31E3, 0x1310, DeviceId(device_id))
        .with_manufacturer("Wooting")
        .with_name("Wooting UwU")
        .with_type(DeviceType::Keypad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::must::must_status;
    use crate::prelude::TestResult;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_script_repeats_last_value() -> TestResult {
        let mock = MockAnalogBackend::new();
        mock.script(0x04, [0.2, 0.6]);
        assert_eq!(mock.read_analog(0x04)?, 0.2);
        assert_eq!(mock.read_analog(0x04)?, 0.6);
        assert_eq!(mock.read_analog(0x04)?, 0.6);
        assert_eq!(mock.read_count(0x04), 3);
        Ok(())
    }

    #[test]
    fn test_unscripted_key_reads_zero() -> TestResult {
        let mock = MockAnalogBackend::new();
        assert_eq!(mock.read_analog(0x29)?, 0.0);
        Ok(())
    }

    #[test]
    fn test_device_script_falls_back_to_global() -> TestResult {
        let mock = MockAnalogBackend::new();
        mock.set_value(0x04, 0.3)
            .script_device(0x04, DeviceId(9), [0.9]);
        assert_eq!(mock.read_analog_device(0x04, DeviceId(9))?, 0.9);
        assert_eq!(mock.read_analog_device(0x04, DeviceId(1))?, 0.3);
        Ok(())
    }

    #[test]
    fn test_scripted_status_is_returned() -> TestResult {
        let mock = MockAnalogBackend::new();
        mock.script_results(0x04, [Ok(0.1), Err(AnalogStatus::DeviceDisconnected)]);
        assert_eq!(mock.read_analog(0x04)?, 0.1);
        assert_eq!(
            must_status(mock.read_analog(0x04)),
            AnalogStatus::DeviceDisconnected
        );
        Ok(())
    }

    #[test]
    fn test_uninitialised_rejects_reads() -> TestResult {
        let mock = MockAnalogBackend::uninitialised();
        assert_eq!(
            must_status(mock.read_analog(0x04)),
            AnalogStatus::UnInitialised
        );
        assert_eq!(mock.initialise()?, 0);
        assert_eq!(mock.read_analog(0x04)?, 0.0);
        Ok(())
    }

    #[test]
    fn test_fail_once_then_recovers() -> TestResult {
        let mock = MockAnalogBackend::new();
        mock.fail_once(MockOp::SetKeycodeMode, AnalogStatus::InvalidArgument);
        assert_eq!(
            must_status(mock.set_keycode_mode(KeyCodeMode::VirtualKey)),
            AnalogStatus::InvalidArgument
        );
        assert_eq!(mock.mode(), KeyCodeMode::Hid);
        mock.set_keycode_mode(KeyCodeMode::VirtualKey)?;
        assert_eq!(mock.mode(), KeyCodeMode::VirtualKey);
        Ok(())
    }

    #[test]
    fn test_buffer_respects_capacity_and_override() -> TestResult {
        let mock = MockAnalogBackend::new();
        mock.set_buffer(vec![
            AnalogSample::new(0x04, 0.1),
            AnalogSample::new(0x05, 0.2),
            AnalogSample::new(0x06, 0.3),
        ]);
        assert_eq!(mock.read_full_buffer(2)?.len(), 2);
        mock.report_buffer_count(1);
        assert_eq!(mock.read_full_buffer(8)?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_emit_reaches_handler() -> TestResult {
        let mock = MockAnalogBackend::new();
        assert!(!mock.emit_device_event(DeviceEventKind::Connected, &keyboard_fixture(1)));

        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        let handler = move |_: DeviceEventKind, _: &DeviceInfo| {
            sink.fetch_add(1, Ordering::SeqCst);
        };
        mock.set_device_event_handler(Arc::new(handler))?;
        assert!(mock.emit_device_event(DeviceEventKind::Connected, &keyboard_fixture(1)));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        mock.clear_device_event_handler()?;
        assert!(!mock.has_handler());
        Ok(())
    }

    #[test]
    fn test_calls_recorded_in_order() -> TestResult {
        let mock = MockAnalogBackend::new();
        mock.initialise()?;
        mock.read_analog(0x04)?;
        mock.read_full_buffer(4)?;
        assert_eq!(
            mock.calls(),
            vec![
                MockCall::Initialise,
                MockCall::ReadAnalog(0x04),
                MockCall::ReadFullBuffer(4),
            ]
        );
        Ok(())
    }
}
