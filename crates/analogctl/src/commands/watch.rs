//! Full-buffer streaming

use std::thread;
use std::time::Duration;

use analog_keycodes::{IntoNativeCode, KeyCodeMode, NativeCode};
use analog_query::KeyQuery;
use analog_sdk::{AnalogClient, DeviceId, NativeSdk};
use anyhow::Result;

use crate::commands::{KeyArg, session};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    pub device: Option<u64>,
    pub interval_ms: u64,
    pub max_entries: Option<usize>,
    pub stop_key: KeyArg,
}

/// Stream the pressed-key buffer until the stop key is fully pressed
pub fn execute(settings: &Settings, options: WatchOptions, json: bool) -> Result<()> {
    let session = session::connect(settings)?;
    let client = session.client();
    let stop_code = resolve_stop_key(options.stop_key, client.keycode_mode())?;

    if let Err(e) = client.set_device_event_callback(move |kind, info| {
        output::print_device_event(kind, info, json);
    }) {
        tracing::warn!(error = %e, "Device events unavailable");
    }

    if !json {
        output::print_watch_banner(options.stop_key);
    }
    let result = watch_loop(client, settings, options, stop_code, json);

    if let Err(e) = client.clear_device_event_callback() {
        tracing::debug!(error = %e, "Failed to clear device event callback");
    }
    result
}

/// Native code of the stop key, checked before any streaming starts.
fn resolve_stop_key(stop_key: KeyArg, mode: KeyCodeMode) -> Result<NativeCode, CliError> {
    stop_key.into_native_code(mode).map_err(|e| {
        CliError::InvalidArgument(format!(
            "{e}; pass --stop-key with a native code for this mode"
        ))
    })
}

fn watch_loop(
    client: &AnalogClient<NativeSdk>,
    settings: &Settings,
    options: WatchOptions,
    stop_code: NativeCode,
    json: bool,
) -> Result<()> {
    let mut query = KeyQuery::with_config(client, settings.query);
    if let Some(id) = options.device {
        query = query.for_device(DeviceId(id));
    }
    let max_entries = options
        .max_entries
        .unwrap_or(settings.query.snapshot_capacity);
    let interval = Duration::from_millis(options.interval_ms);
    let mode = client.keycode_mode();

    loop {
        let samples = query.snapshot(max_entries).map_err(CliError::from)?;
        output::print_snapshot(&samples, mode, json)?;

        if query.is_fully_down(stop_code).map_err(CliError::from)? {
            tracing::info!(stop_key = %options.stop_key, "Stop key fully pressed, stopping");
            return Ok(());
        }
        thread::sleep(interval);
    }
}
