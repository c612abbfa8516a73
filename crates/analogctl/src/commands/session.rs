//! SDK session setup shared by the device-facing commands

use analog_sdk::{AnalogClient, NativeSdk};
use anyhow::{Context, Result};

use crate::config::Settings;
use crate::error::CliError;

/// An initialised SDK session, uninitialised on drop.
pub struct Session {
    client: AnalogClient<NativeSdk>,
}

impl Session {
    /// Load the library, initialise and switch to the configured mode.
    pub fn open(settings: &Settings) -> Result<Self, CliError> {
        let client = AnalogClient::open(&settings.sdk)?;
        let devices = client.initialise_with(&settings.sdk)?;
        tracing::info!(
            devices,
            mode = %client.keycode_mode(),
            library = %settings.sdk.library().display(),
            "Session ready"
        );
        Ok(Self { client })
    }

    pub fn client(&self) -> &AnalogClient<NativeSdk> {
        &self.client
    }
}

/// Open a session, naming the library in the error.
pub fn connect(settings: &Settings) -> Result<Session> {
    Session::open(settings).with_context(|| {
        format!(
            "failed to open SDK session from '{}'",
            settings.sdk.library().display()
        )
    })
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.client.is_initialised()
            && let Err(e) = self.client.uninitialise()
        {
            tracing::warn!(error = %e, "Failed to uninitialise SDK");
        }
    }
}
