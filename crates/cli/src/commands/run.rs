//! Live control loop

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use anyhow::Result;
use handdrive_engine::{
    ActuatorChannel, GestureConfig, LineWriter, Session, SystemClock, TickLoop, secs,
};
use tracing::info;

use crate::commands::RunArgs;
use crate::error::CliError;
use crate::input::LineSource;
use crate::output::{self, ConsoleSink};
use crate::serial;

/// Execute the run command
pub fn execute(args: &RunArgs, config: GestureConfig, json: bool) -> Result<()> {
    let reader = open_input(&args.input)?;
    let actuator = open_actuator(args)?;

    // Keep stdout for command lines in a dry run.
    let stats = if args.dry_run {
        drive(config, reader, actuator, ConsoleSink::new(io::stderr(), json))?
    } else {
        drive(config, reader, actuator, ConsoleSink::new(io::stdout(), json))?
    };

    if args.dry_run && json {
        // stdout carries command lines; keep the summary off it
        eprintln!("{}", serde_json::to_string(&stats)?);
        return Ok(());
    }
    output::print_stats(&stats, json)
}

fn drive<W: io::Write>(
    config: GestureConfig,
    reader: Box<dyn BufRead>,
    actuator: Box<dyn ActuatorChannel>,
    sink: ConsoleSink<W>,
) -> Result<handdrive_engine::RunStats> {
    let session = Session::new(config).map_err(CliError::from)?;
    let mut tick_loop = TickLoop::new(session, LineSource::new(reader), SystemClock, actuator, sink);
    info!("control loop started");
    let stats = tick_loop.run();
    info!(ticks = stats.ticks, "observation stream ended");

    let (_, _, _, _, mut sink) = tick_loop.into_parts();
    sink.finish()?;
    Ok(stats)
}

fn open_input(input: &str) -> Result<Box<dyn BufRead>, CliError> {
    if input == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(input)
        .map_err(|err| CliError::input(format!("cannot open {input}: {err}")))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_actuator(args: &RunArgs) -> Result<Box<dyn ActuatorChannel>, CliError> {
    if args.dry_run {
        info!("dry run: writing command lines to stdout");
        return Ok(Box::new(LineWriter::new(io::stdout())));
    }
    let reset_wait = secs(args.reset_wait)
        .map_err(|err| CliError::config(format!("--reset-wait: {err}")))?;
    let port = serial::open(&args.serial, args.baud, reset_wait)?;
    Ok(Box::new(port))
}
