//! Command definitions and shared argument types

use std::fmt;
use std::str::FromStr;

use analog_keycodes::{GeneralizedKey, IntoNativeCode, KeyCodeMode, KeyNotMapped, NativeCode};
use clap::Subcommand;

pub mod devices;
pub mod keys;
pub mod read;
pub mod session;
pub mod watch;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the key translation table for the selected mode (no SDK needed)
    Keys,

    /// Initialise the SDK and list connected devices
    Devices,

    /// Read how far a key is pressed
    Read {
        /// Key name (Esc, A, LeftShift, ...) or raw native code (0x29)
        key: KeyArg,

        /// Read from one device only
        #[arg(long)]
        device: Option<u64>,
    },

    /// Block until a key is pressed all the way down and released
    WaitPress {
        /// Key name or raw native code
        key: KeyArg,

        /// Watch one device only
        #[arg(long)]
        device: Option<u64>,
    },

    /// Stream pressed keys until the stop key is fully pressed
    Watch {
        /// Read from one device only
        #[arg(long)]
        device: Option<u64>,

        /// Delay between snapshots
        #[arg(long, default_value_t = 50)]
        interval_ms: u64,

        /// Maximum keys per snapshot (defaults to the configured capacity)
        #[arg(short = 'n', long)]
        max_entries: Option<usize>,

        /// Key that ends the stream when fully pressed
        #[arg(long, default_value = "Esc")]
        stop_key: KeyArg,
    },
}

/// A key given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyArg {
    /// A generalized key, translated for the active mode.
    Named(GeneralizedKey),
    /// A native code, used as-is.
    Raw(NativeCode),
}

impl FromStr for KeyArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return NativeCode::from_str_radix(hex, 16)
                .map(KeyArg::Raw)
                .map_err(|e| format!("invalid native code {s:?}: {e}"));
        }
        s.parse::<GeneralizedKey>()
            .map(KeyArg::Named)
            .map_err(|e| e.to_string())
    }
}

impl fmt::Display for KeyArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyArg::Named(key) => write!(f, "{key}"),
            KeyArg::Raw(code) => write!(f, "{code:#06x}"),
        }
    }
}

impl IntoNativeCode for KeyArg {
    fn into_native_code(self, mode: KeyCodeMode) -> Result<NativeCode, KeyNotMapped> {
        match self {
            KeyArg::Named(key) => key.into_native_code(mode),
            KeyArg::Raw(code) => Ok(code),
        }
    }
}
