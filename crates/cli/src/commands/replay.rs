//! Deterministic replay of a timestamped observation script
//!
//! Each non-empty, non-comment line is `<seconds> <observation>`, where
//! seconds are measured from the start of the script and never decrease. The
//! observation uses the same syntax as `handctl run` input.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use colored::*;
use handdrive_engine::{
    ActuatorChannel, ActuatorError, Clock, CommandLine, ControlState, EngineResult,
    GestureConfig, GestureObservation, ObservationSource, RunStats, Session, StatusLine,
    StatusSink, TickLoop,
};
use serde::Serialize;

use crate::commands::ReplayArgs;
use crate::error::CliError;
use crate::input::parse_observation;
use crate::output;

/// Latest timestamp a script may use.
pub const MAX_SCRIPT_TIME: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEntry {
    pub at: Duration,
    pub observation: String,
}

/// Parse a replay script.
pub fn parse_script(text: &str) -> Result<Vec<ScriptEntry>, CliError> {
    let mut entries = Vec::new();
    let mut last = Duration::ZERO;
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (stamp, observation) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        let seconds: f64 = stamp.parse().map_err(|_parse| {
            CliError::input(format!("line {line_no}: {stamp:?} is not a timestamp"))
        })?;
        let at = Duration::try_from_secs_f64(seconds)
            .map_err(|err| CliError::input(format!("line {line_no}: {err}")))?;
        if at > MAX_SCRIPT_TIME {
            return Err(CliError::input(format!(
                "line {line_no}: timestamp {seconds} exceeds {}s",
                MAX_SCRIPT_TIME.as_secs()
            )));
        }
        if at < last {
            return Err(CliError::input(format!(
                "line {line_no}: timestamp {seconds} goes backwards"
            )));
        }
        last = at;
        entries.push(ScriptEntry {
            at,
            observation: observation.trim().to_string(),
        });
    }
    Ok(entries)
}

/// Clock pinned to the timestamp of the entry being replayed.
#[derive(Clone)]
struct ScriptClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl Clock for ScriptClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

struct ScriptSource {
    entries: std::vec::IntoIter<ScriptEntry>,
    offset: Rc<Cell<Duration>>,
}

impl ObservationSource for ScriptSource {
    fn next_observation(&mut self) -> Option<EngineResult<GestureObservation>> {
        let entry = self.entries.next()?;
        self.offset.set(entry.at);
        Some(parse_observation(&entry.observation))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    Command { at: f64, line: CommandLine },
    Status { at: f64, status: StatusLine },
}

/// Records both command lines and status lines in arrival order.
#[derive(Clone)]
struct Recorder {
    offset: Rc<Cell<Duration>>,
    events: Rc<RefCell<Vec<ReplayEvent>>>,
}

impl Recorder {
    fn at(&self) -> f64 {
        self.offset.get().as_secs_f64()
    }
}

impl ActuatorChannel for Recorder {
    fn send(&mut self, line: &CommandLine) -> Result<(), ActuatorError> {
        let at = self.at();
        self.events
            .borrow_mut()
            .push(ReplayEvent::Command { at, line: *line });
        Ok(())
    }
}

impl StatusSink for Recorder {
    fn report(&mut self, status: &StatusLine) {
        let at = self.at();
        self.events.borrow_mut().push(ReplayEvent::Status {
            at,
            status: status.clone(),
        });
    }
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub stats: RunStats,
    pub final_state: ControlState,
    pub selected_motor: Option<u8>,
    pub events: Vec<ReplayEvent>,
}

/// Run a script through a fresh session.
pub fn replay(config: GestureConfig, entries: Vec<ScriptEntry>) -> Result<ReplayReport> {
    let offset = Rc::new(Cell::new(Duration::ZERO));
    let clock = ScriptClock {
        base: Instant::now(),
        offset: Rc::clone(&offset),
    };
    let source = ScriptSource {
        entries: entries.into_iter(),
        offset: Rc::clone(&offset),
    };
    let recorder = Recorder {
        offset,
        events: Rc::new(RefCell::new(Vec::new())),
    };

    let mut tick_loop = TickLoop::new(
        Session::new(config).map_err(CliError::from)?,
        source,
        clock,
        recorder.clone(),
        recorder.clone(),
    );
    let stats = tick_loop.run();
    let session = tick_loop.session();
    let report = ReplayReport {
        stats,
        final_state: session.state(),
        selected_motor: session.selected_motor().map(u8::from),
        events: recorder.events.take(),
    };
    Ok(report)
}

/// Execute the replay command
pub fn execute(args: &ReplayArgs, config: GestureConfig, json: bool) -> Result<()> {
    let entries = load(&args.script)?;
    let report = replay(config, entries)?;

    if json {
        return output::print_json("replay", &report);
    }

    for event in &report.events {
        match event {
            ReplayEvent::Command { at, line } => {
                println!("[{at:>8.3}s] {} {}", "SEND".bold(), line);
            }
            ReplayEvent::Status { at, status } => {
                println!("[{at:>8.3}s] {}", output::styled(status));
            }
        }
    }
    println!(
        "{} {} (motor: {})",
        "Final state:".bold(),
        report.final_state,
        report
            .selected_motor
            .map_or_else(|| "none".to_string(), |m| m.to_string())
    );
    output::print_stats(&report.stats, false)
}

fn load(path: &Path) -> Result<Vec<ScriptEntry>, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|err| CliError::input(format!("cannot read {}: {err}", path.display())))?;
    parse_script(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn script(lines: &[(f64, &str)]) -> String {
        lines
            .iter()
            .map(|(at, obs)| format!("{at} {obs}\n"))
            .collect()
    }

    #[test]
    fn test_parse_script() -> TestResult {
        let entries = parse_script("# header\n\n0.0 3\n0.5\n1.25 {\"landmarks\": null}\n")?;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].observation, "");
        assert_eq!(entries[2].at, Duration::from_millis(1250));
        assert_eq!(entries[2].observation, "{\"landmarks\": null}");
        Ok(())
    }

    #[test]
    fn test_parse_script_rejects_bad_lines() {
        assert!(matches!(
            parse_script("0.5 1\n0.4 1\n"),
            Err(CliError::InvalidInput(msg)) if msg.contains("line 2")
        ));
        assert!(parse_script("soon 1\n").is_err());
        assert!(parse_script("-1 1\n").is_err());
        assert!(matches!(
            parse_script("0 1\n1e19 1\n"),
            Err(CliError::InvalidInput(msg)) if msg.contains("line 2")
        ));
    }

    #[test]
    fn test_replay_rejects_invalid_config() -> TestResult {
        let config = GestureConfig {
            stable_frames_required: 0,
            ..GestureConfig::default()
        };
        let Err(err) = replay(config, parse_script("0 1\n")?) else {
            return Err("expected an invalid configuration".into());
        };
        let exit_code = err.downcast_ref::<CliError>().map(CliError::exit_code);
        assert_eq!(exit_code, Some(2));
        Ok(())
    }

    #[test]
    fn test_replay_accepts_latest_timestamp() -> TestResult {
        let text = format!("0 1\n{} 1\n", MAX_SCRIPT_TIME.as_secs());
        let report = replay(GestureConfig::default(), parse_script(&text)?)?;
        assert_eq!(report.stats.ticks, 2);
        Ok(())
    }

    #[test]
    fn test_replay_selects_and_drives() -> TestResult {
        let config = GestureConfig::builder()
            .stable_frames_required(2)
            .trigger_hold(Duration::from_secs(1))
            .selection_delay(Duration::from_millis(500))
            .build()?;
        let mut lines = Vec::new();
        // fist from 0.0 to 1.2, three fingers from 1.3 to 2.6, one finger after
        for step in 0..=12 {
            lines.push((f64::from(step) * 0.1, "0"));
        }
        for step in 13..=26 {
            lines.push((f64::from(step) * 0.1, "3"));
        }
        for step in 27..=35 {
            lines.push((f64::from(step) * 0.1, "1"));
        }
        let report = replay(config, parse_script(&script(&lines))?)?;

        assert_eq!(report.final_state, ControlState::Direction);
        assert_eq!(report.selected_motor, Some(3));
        assert_eq!(report.stats.transitions, 2);
        let sent: Vec<String> = report
            .events
            .iter()
            .filter_map(|event| match event {
                ReplayEvent::Command { line, .. } => Some(line.to_string()),
                ReplayEvent::Status { .. } => None,
            })
            .collect();
        assert!(!sent.is_empty());
        assert_eq!(sent.last().map(String::as_str), Some("3,1"));
        Ok(())
    }
}
