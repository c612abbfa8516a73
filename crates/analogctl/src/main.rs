//! analogctl - Analog keyboard inspection CLI
//!
//! Lists analog devices, reads key depression, waits for presses and streams
//! the pressed-key buffer through the analog SDK.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod config;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use analog_keycodes::KeyCodeMode;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "analogctl")]
#[command(about = "Analog keyboard CLI - read key depression through the analog SDK")]
#[command(version)]
#[command(long_about = "
analogctl talks to analog keyboards through the analog SDK wrapper library.
It lists connected devices, reads how far keys are pressed, waits for key
presses and streams every pressed key until Esc is fully pressed.

Keys are given by name (Esc, A, D1, LeftShift, Up, ...) or as a raw native
code (0x29). Use --json for machine-readable output.
")]
pub(crate) struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Keycode mode (hid, scancode1, virtualkey, virtualkeytranslate)
    #[arg(long, global = true)]
    mode: Option<KeyCodeMode>,

    /// Path to the SDK wrapper library
    #[arg(long, global = true, value_name = "PATH")]
    library: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE", env = "ANALOGCTL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("analogctl={log_level},analog_sdk={log_level},analog_query={log_level}")
                    .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(error::exit_code_for(&e))
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let settings = config::Settings::resolve(cli)?;
    match &cli.command {
        Commands::Keys => commands::keys::execute(&settings, cli.json),
        Commands::Devices => commands::devices::execute(&settings, cli.json),
        Commands::Read { key, device } => {
            commands::read::execute(&settings, *key, *device, cli.json)
        }
        Commands::WaitPress { key, device } => {
            commands::read::wait_press(&settings, *key, *device, cli.json)
        }
        Commands::Watch {
            device,
            interval_ms,
            max_entries,
            stop_key,
        } => commands::watch::execute(
            &settings,
            commands::watch::WatchOptions {
                device: *device,
                interval_ms: *interval_ms,
                max_entries: *max_entries,
                stop_key: *stop_key,
            },
            cli.json,
        ),
    }
}
