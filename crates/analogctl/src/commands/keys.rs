//! Translation table listing

use analog_keycodes::NativeCodeTable;
use anyhow::Result;

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

/// Print every key and its native code for the configured mode
pub fn execute(settings: &Settings, json: bool) -> Result<()> {
    let mode = settings.sdk.keycode_mode;
    let table = NativeCodeTable::for_mode(mode).ok_or_else(|| {
        CliError::InvalidArgument(format!("mode {mode} has no translation table"))
    })?;
    output::print_key_table(table, json)?;
    Ok(())
}
