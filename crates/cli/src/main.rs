//! handctl - drive a motor rig with hand gestures
//!
//! Reads per-frame finger counts (or hand landmarks) from a pose detector,
//! debounces them, runs the selection state machine and writes
//! `<motor>,<command>` lines to the motor controller over serial.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod config;
mod error;
mod input;
mod output;
mod serial;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ConfigCommands, ReplayArgs, RunArgs};
use crate::config::ConfigArgs;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "handctl")]
#[command(about = "Gesture-controlled motor driver")]
#[command(version)]
#[command(long_about = "
handctl turns a stream of hand gestures into motor commands.

Hold a fist to enter selection mode, hold up 1-5 fingers to pick a motor,
then one finger drives it forward, two backward and a fist stops it.
Use --json for machine-readable output.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(long, global = true, help = "Output in JSON format for machine parsing")]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the live control loop
    Run(RunArgs),

    /// Replay a timestamped observation script
    Replay(ReplayArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),

    /// List motor channels and command codes
    Motors,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
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
                format!("handctl={log_level},handdrive_engine={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute_command(&cli) {
        if cli.json {
            output::print_error_json(&e);
        } else {
            output::print_error_human(&e);
        }

        let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(exit_code);
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run(args) => commands::run::execute(args, cli.config.load()?, cli.json),
        Commands::Replay(args) => commands::replay::execute(args, cli.config.load()?, cli.json),
        Commands::Config(cmd) => commands::config::execute(cmd, &cli.config, cli.json),
        Commands::Motors => commands::motors::execute(cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}
