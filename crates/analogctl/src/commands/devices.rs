//! Device listing

use anyhow::Result;

use crate::commands::session;
use crate::config::Settings;
use crate::output;

/// Initialise the SDK and list connected devices
pub fn execute(settings: &Settings, json: bool) -> Result<()> {
    let session = session::connect(settings)?;
    let devices = session
        .client()
        .connected_devices()
        .map_err(crate::error::CliError::from)?;
    output::print_device_list(&devices, json)?;
    Ok(())
}
