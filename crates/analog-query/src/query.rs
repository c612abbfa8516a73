//! Key queries against a live session.

use std::thread;

use analog_keycodes::{IntoNativeCode, NativeCode};
use analog_sdk::{AnalogBackend, AnalogClient, AnalogSample, DeviceId, NativeSdk};

use crate::config::QueryConfig;
use crate::error::QueryResult;
use crate::value;

/// How a wait finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitOutcome {
    /// Samples read before the condition held, including the final one.
    pub samples: usize,
    /// The sample that satisfied the condition.
    pub value: f32,
}

/// Queries over one [`AnalogClient`].
///
/// Keys are resolved against the client's mode at call time; a wait resolves
/// once and keeps that code for its whole loop. Waits have no timeout and
/// return early only when a read fails.
#[derive(Debug)]
pub struct KeyQuery<'c, B: AnalogBackend = NativeSdk> {
    client: &'c AnalogClient<B>,
    device: Option<DeviceId>,
    config: QueryConfig,
}

impl<B: AnalogBackend> Clone for KeyQuery<'_, B> {
    fn clone(&self) -> Self {
        Self {
            client: self.client,
            device: self.device,
            config: self.config,
        }
    }
}

impl<'c, B: AnalogBackend> KeyQuery<'c, B> {
    /// Query all devices with the default configuration.
    pub fn new(client: &'c AnalogClient<B>) -> Self {
        Self::with_config(client, QueryConfig::default())
    }

    /// Query all devices with `config`.
    pub fn with_config(client: &'c AnalogClient<B>, config: QueryConfig) -> Self {
        Self {
            client,
            device: None,
            config,
        }
    }

    /// Restrict reads and snapshots to one device.
    pub fn for_device(self, device: DeviceId) -> Self {
        Self {
            device: Some(device),
            ..self
        }
    }

    /// Targeted device, if any.
    pub fn device(&self) -> Option<DeviceId> {
        self.device
    }

    /// Active configuration.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Underlying session.
    pub fn client(&self) -> &'c AnalogClient<B> {
        self.client
    }

    /// Native code for `key` in the client's current mode.
    pub fn resolve(&self, key: impl IntoNativeCode) -> QueryResult<NativeCode> {
        Ok(key.into_native_code(self.client.keycode_mode())?)
    }

    fn read_code(&self, code: NativeCode) -> QueryResult<f32> {
        let value = match self.device {
            Some(device) => self.client.read_analog_device(code, device)?,
            None => self.client.read_analog(code)?,
        };
        Ok(value)
    }

    /// Current depression of `key`, in `[0.0, 1.0]`.
    pub fn read_analog(&self, key: impl IntoNativeCode) -> QueryResult<f32> {
        let code = self.resolve(key)?;
        self.read_code(code)
    }

    /// Current depression of `key` as a percentage.
    pub fn key_value_as_percent(&self, key: impl IntoNativeCode) -> QueryResult<f32> {
        self.read_analog(key).map(value::value_to_percent)
    }

    /// Whether `key` is at full travel.
    pub fn is_fully_down(&self, key: impl IntoNativeCode) -> QueryResult<bool> {
        self.read_analog(key).map(value::is_fully_down)
    }

    /// Whether `key` is at rest.
    pub fn is_fully_up(&self, key: impl IntoNativeCode) -> QueryResult<bool> {
        self.read_analog(key).map(value::is_fully_up)
    }

    /// Whether `key` is pressed at all.
    pub fn is_down(&self, key: impl IntoNativeCode) -> QueryResult<bool> {
        self.read_analog(key).map(value::is_down)
    }

    /// Whether `key` is short of full travel.
    pub fn is_up(&self, key: impl IntoNativeCode) -> QueryResult<bool> {
        self.read_analog(key).map(value::is_up)
    }

    /// Block until `key` is pressed at all.
    pub fn wait_down(&self, key: impl IntoNativeCode) -> QueryResult<WaitOutcome> {
        self.wait_until(key, "down", value::is_down)
    }

    /// Block until `key` is short of full travel.
    pub fn wait_up(&self, key: impl IntoNativeCode) -> QueryResult<WaitOutcome> {
        self.wait_until(key, "up", value::is_up)
    }

    /// Block until `key` reaches full travel.
    pub fn wait_fully_down(&self, key: impl IntoNativeCode) -> QueryResult<WaitOutcome> {
        self.wait_until(key, "fully_down", value::is_fully_down)
    }

    /// Block until `key` is at rest.
    pub fn wait_fully_up(&self, key: impl IntoNativeCode) -> QueryResult<WaitOutcome> {
        self.wait_until(key, "fully_up", value::is_fully_up)
    }

    /// Block through a full press: until `key` reaches full travel, then
    /// until it returns to rest.
    pub fn wait_press(&self, key: impl IntoNativeCode) -> QueryResult<WaitOutcome> {
        let code = self.resolve(key)?;
        let pressed = self.poll(code, "press_down", |v| v >= 1.0)?;
        let released = self.poll(code, "press_release", |v| v <= 0.0)?;
        Ok(WaitOutcome {
            samples: pressed.samples.saturating_add(released.samples),
            value: released.value,
        })
    }

    /// Block while `key` is above `threshold`.
    pub fn wait_above_threshold(
        &self,
        key: impl IntoNativeCode,
        threshold: f32,
    ) -> QueryResult<WaitOutcome> {
        let above = move |v: f32| v > threshold;
        self.wait_until(key, "above_threshold", move |v| !above(v))
    }

    /// Block while `key` is below `threshold`.
    pub fn wait_below_threshold(
        &self,
        key: impl IntoNativeCode,
        threshold: f32,
    ) -> QueryResult<WaitOutcome> {
        let below = move |v: f32| v < threshold;
        self.wait_until(key, "below_threshold", move |v| !below(v))
    }

    /// Pressed keys from one bulk read, at most `max_entries`, in SDK order.
    pub fn snapshot(&self, max_entries: usize) -> QueryResult<Vec<AnalogSample>> {
        let mut samples = match self.device {
            Some(device) => self.client.read_full_buffer_device(max_entries, device)?,
            None => self.client.read_full_buffer(max_entries)?,
        };
        if samples.len() > max_entries {
            tracing::warn!(
                requested = max_entries,
                returned = samples.len(),
                device = ?self.device,
                "Backend returned more samples than requested, truncating"
            );
            samples.truncate(max_entries);
        }
        tracing::trace!(
            requested = max_entries,
            returned = samples.len(),
            device = ?self.device,
            "Buffer snapshot"
        );
        Ok(samples)
    }

    /// [`snapshot`](Self::snapshot) with the configured capacity.
    pub fn snapshot_default(&self) -> QueryResult<Vec<AnalogSample>> {
        self.snapshot(self.config.snapshot_capacity)
    }

    fn wait_until(
        &self,
        key: impl IntoNativeCode,
        condition: &'static str,
        done: impl Fn(f32) -> bool,
    ) -> QueryResult<WaitOutcome> {
        let code = self.resolve(key)?;
        self.poll(code, condition, done)
    }

    fn poll(
        &self,
        code: NativeCode,
        condition: &'static str,
        done: impl Fn(f32) -> bool,
    ) -> QueryResult<WaitOutcome> {
        let interval = self.config.poll_interval();
        let mut samples = 0_usize;
        loop {
            let value = self.read_code(code)?;
            samples = samples.saturating_add(1);
            if done(value) {
                tracing::trace!(code, condition, samples, value, "Wait satisfied");
                return Ok(WaitOutcome { samples, value });
            }
            if interval.is_zero() {
                thread::yield_now();
            } else {
                thread::sleep(interval);
            }
        }
    }
}
