//! Command implementations for handctl

pub mod config;
pub mod motors;
pub mod replay;
pub mod run;

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::serial::{DEFAULT_BAUD, DEFAULT_PORT};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Observation stream, one detector result per line (`-` for stdin)
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Serial port of the motor controller
    #[arg(short, long, default_value = DEFAULT_PORT, env = "HANDDRIVE_SERIAL")]
    pub serial: String,

    /// Serial baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD)]
    pub baud: u32,

    /// Seconds to wait after opening the port for the controller to reset
    #[arg(long, default_value_t = 2.0, value_name = "SECS")]
    pub reset_wait: f64,

    /// Write command lines to stdout instead of the serial port
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Script of `<seconds> <observation>` lines
    pub script: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Check a configuration file without running
    Validate {
        /// File to check (defaults to --config)
        path: Option<PathBuf>,
    },
}
