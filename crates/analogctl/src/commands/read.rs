//! Single-key reads and waits

use analog_query::{KeyQuery, value_to_percent};
use analog_sdk::{DeviceId, NativeSdk};
use anyhow::Result;

use crate::commands::KeyArg;
use crate::commands::session::{self, Session};
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{self, KeyReading};

fn query<'s>(
    session: &'s Session,
    settings: &Settings,
    device: Option<u64>,
) -> KeyQuery<'s, NativeSdk> {
    let query = KeyQuery::with_config(session.client(), settings.query);
    match device {
        Some(id) => query.for_device(DeviceId(id)),
        None => query,
    }
}

/// Read how far one key is pressed
pub fn execute(settings: &Settings, key: KeyArg, device: Option<u64>, json: bool) -> Result<()> {
    let session = session::connect(settings)?;
    let query = query(&session, settings, device);
    let code = query.resolve(key).map_err(CliError::from)?;
    let value = query.read_analog(code).map_err(CliError::from)?;

    output::print_reading(
        &KeyReading {
            key: key.to_string(),
            code,
            mode: session.client().keycode_mode(),
            value,
            percent: value_to_percent(value),
        },
        json,
    )?;
    Ok(())
}

/// Wait for a full press and release of one key
pub fn wait_press(settings: &Settings, key: KeyArg, device: Option<u64>, json: bool) -> Result<()> {
    let session = session::connect(settings)?;
    let query = query(&session, settings, device);
    let code = query.resolve(key).map_err(CliError::from)?;

    if !json {
        output::print_waiting(&key.to_string());
    }
    let outcome = query.wait_press(code).map_err(CliError::from)?;
    tracing::info!(%key, code, samples = outcome.samples, "Press complete");
    output::print_wait_outcome(&key.to_string(), code, &outcome, json)?;
    Ok(())
}
