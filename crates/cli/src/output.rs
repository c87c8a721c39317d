//! Output formatting for handctl

use std::io::Write;

use anyhow::Error;
use colored::*;
use handdrive_engine::{RunStats, StatusLine, StatusSink};
use serde::Serialize;
use serde_json::json;

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let type_name = error
        .downcast_ref::<CliError>()
        .map_or("other", CliError::type_name);
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": type_name
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

/// Print `{"success": true, <key>: value}`.
pub fn print_json<T: Serialize>(key: &str, value: &T) -> anyhow::Result<()> {
    let mut output = json!({ "success": true });
    output[key] = serde_json::to_value(value)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Colorize a status line for a terminal.
pub fn styled(status: &StatusLine) -> ColoredString {
    let text = status.to_string();
    match status {
        StatusLine::EnteredSelection | StatusLine::MotorSelected { .. } => {
            format!(">>> {text} <<<").green().bold()
        }
        StatusLine::Holding { .. } => text.yellow(),
        StatusLine::Waiting { .. } => text.dimmed(),
        StatusLine::Direction { .. } => text.cyan(),
        StatusLine::ActuatorFailure { .. } => text.red().bold(),
    }
}

/// Status sink for an operator console.
///
/// Transient progress lines overwrite each other in place with `\r`; any
/// other line first ends a pending transient line.
pub struct ConsoleSink<W: Write> {
    out: W,
    json: bool,
    pending_transient: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self {
            out,
            json,
            pending_transient: false,
        }
    }

    /// End any pending transient line.
    pub fn finish(&mut self) -> std::io::Result<()> {
        if self.pending_transient {
            writeln!(self.out)?;
            self.pending_transient = false;
        }
        self.out.flush()
    }

    fn write_status(&mut self, status: &StatusLine) -> std::io::Result<()> {
        if self.json {
            let line = serde_json::to_string(status).map_err(std::io::Error::other)?;
            return writeln!(self.out, "{line}");
        }
        if status.is_transient() {
            write!(self.out, "\r{:<40}", styled(status))?;
            self.pending_transient = true;
            return self.out.flush();
        }
        if self.pending_transient {
            writeln!(self.out)?;
            self.pending_transient = false;
        }
        writeln!(self.out, "{}", styled(status))
    }
}

impl<W: Write> StatusSink for ConsoleSink<W> {
    fn report(&mut self, status: &StatusLine) {
        if let Err(err) = self.write_status(status) {
            tracing::warn!(error = %err, "failed to write status line");
        }
    }
}

/// Print the end-of-run summary.
pub fn print_stats(stats: &RunStats, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json("stats", stats);
    }
    eprintln!("{}", "Run complete".bold());
    eprintln!("  Ticks:                {}", stats.ticks);
    eprintln!("  Invalid observations: {}", stats.invalid_observations);
    eprintln!("  Transitions:          {}", stats.transitions);
    eprintln!("  Commands sent:        {}", stats.commands_sent);
    if stats.send_failures > 0 {
        eprintln!("  {} {}", "Send failures:".red(), stats.send_failures);
    }
    Ok(())
}
