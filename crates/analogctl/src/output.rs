//! Output formatting for CLI responses

use analog_keycodes::{KeyCodeMode, NativeCode, NativeCodeTable};
use analog_query::{WaitOutcome, value_to_percent};
use analog_sdk::{AnalogSample, DeviceEventKind, DeviceInfo};
use anyhow::Error;
use colored::*;
use serde::Serialize;
use serde_json::json;

use crate::commands::KeyArg;
use crate::error::CliError;

/// One key read, as reported by `read`.
#[derive(Debug, Clone, Serialize)]
pub struct KeyReading {
    pub key: String,
    pub code: NativeCode,
    pub mode: KeyCodeMode,
    pub value: f32,
    pub percent: f32,
}

fn print_json_pretty(value: &serde_json::Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "exit_code": crate::error::exit_code_for(error),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print the translation table for one mode
pub fn print_key_table(table: &NativeCodeTable, json: bool) -> Result<(), CliError> {
    if json {
        let keys: Vec<_> = table
            .entries()
            .map(|(key, code)| json!({ "key": key.name(), "code": code }))
            .collect();
        return print_json_pretty(&json!({
            "success": true,
            "mode": table.mode(),
            "keys": keys,
        }));
    }

    println!("{} {}", "Keycode mode:".bold(), table.mode());
    for (key, code) in table.entries() {
        let code_text = format!("{code:#06x}");
        let code_text = if code == 0 {
            code_text.dimmed()
        } else {
            code_text.normal()
        };
        println!("  {:<16} {}", key.name(), code_text);
    }
    Ok(())
}

/// Print device list in specified format
pub fn print_device_list(devices: &[DeviceInfo], json: bool) -> Result<(), CliError> {
    if json {
        return print_json_pretty(&json!({
            "success": true,
            "devices": devices,
        }));
    }

    if devices.is_empty() {
        println!("{}", "No devices found".yellow());
        return Ok(());
    }

    println!("{}", "Connected Devices:".bold());
    for device in devices {
        println!(
            "  {} {} ({})",
            "●".green(),
            device.display_name().bold(),
            device.device_id.to_string().dimmed()
        );
        println!(
            "    {} {:04x}:{:04x}  {}",
            device.device_type,
            device.vendor_id,
            device.product_id,
            device.manufacturer_name
        );
    }
    Ok(())
}

/// Print a single key reading
pub fn print_reading(reading: &KeyReading, json: bool) -> Result<(), CliError> {
    if json {
        return print_json_pretty(&json!({
            "success": true,
            "reading": reading,
        }));
    }

    println!(
        "{} ({:#06x}, {}): {} {}",
        reading.key.bold(),
        reading.code,
        reading.mode,
        format!("{:.3}", reading.value).cyan(),
        format!("({:.1}%)", reading.percent).dimmed()
    );
    Ok(())
}

/// Prompt shown before a blocking wait
pub fn print_waiting(key: &str) {
    println!("Press and release {} ...", key.bold());
}

/// Print the result of a completed wait
pub fn print_wait_outcome(
    key: &str,
    code: NativeCode,
    outcome: &WaitOutcome,
    json: bool,
) -> Result<(), CliError> {
    if json {
        return print_json_pretty(&json!({
            "success": true,
            "key": key,
            "code": code,
            "samples": outcome.samples,
        }));
    }

    println!(
        "{} {} {}",
        "✓".green(),
        key.bold(),
        format!("pressed and released ({} samples)", outcome.samples).dimmed()
    );
    Ok(())
}

/// Banner shown when streaming starts
pub fn print_watch_banner(stop_key: KeyArg) {
    println!(
        "Streaming pressed keys {}",
        format!("(press {stop_key} all the way down to stop)").dimmed()
    );
}

/// Print one buffer snapshot, one line per call
pub fn print_snapshot(
    samples: &[AnalogSample],
    mode: KeyCodeMode,
    json: bool,
) -> Result<(), CliError> {
    if json {
        let keys: Vec<_> = samples
            .iter()
            .map(|sample| {
                json!({
                    "code": sample.code,
                    "key": sample.key_name(mode),
                    "value": sample.value,
                })
            })
            .collect();
        println!("{}", serde_json::to_string(&json!({ "keys": keys }))?);
        return Ok(());
    }

    if samples.is_empty() {
        return Ok(());
    }
    let line: Vec<String> = samples
        .iter()
        .map(|sample| {
            let label = sample
                .key_name(mode)
                .map_or_else(|| format!("{:#06x}", sample.code), str::to_string);
            format!("{} {:>5.1}%", label.bold(), value_to_percent(sample.value))
        })
        .collect();
    println!("{}", line.join("  "));
    Ok(())
}

/// Print a hot-plug event. Runs on the SDK's callback thread.
pub fn print_device_event(kind: DeviceEventKind, device: &DeviceInfo, json: bool) {
    if json {
        let event = json!({ "event": kind, "device": device });
        match serde_json::to_string(&event) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format device event as JSON: {e}"),
        }
        return;
    }

    let marker = match kind {
        DeviceEventKind::Connected => "+".green(),
        DeviceEventKind::Disconnected => "-".red(),
    };
    println!(
        "{} {} {}",
        marker,
        device.display_name().bold(),
        kind.to_string().dimmed()
    );
}
