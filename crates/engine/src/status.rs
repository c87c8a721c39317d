//! Operator-facing status lines.

use std::fmt;
use std::time::Duration;

use handdrive_protocol::{CommandLine, MotorCommand, MotorId};
use serde::Serialize;

use crate::config::duration_secs;
use crate::state_machine::Transition;

/// One human-readable status report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusLine {
    EnteredSelection,
    MotorSelected {
        motor: MotorId,
    },
    /// Live hold progress while choosing a motor.
    Holding {
        motor: MotorId,
        #[serde(with = "duration_secs")]
        held: Duration,
    },
    /// Countdown of the post-selection settle window.
    Waiting {
        motor: MotorId,
        #[serde(with = "duration_secs")]
        remaining: Duration,
    },
    Direction {
        motor: MotorId,
        command: MotorCommand,
    },
    ActuatorFailure {
        line: CommandLine,
        reason: String,
    },
}

impl StatusLine {
    /// Progress lines that are superseded on the next tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Holding { .. } | Self::Waiting { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::ActuatorFailure { .. })
    }
}

impl From<Transition> for StatusLine {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::EnteredSelection { .. } => Self::EnteredSelection,
            Transition::MotorSelected { motor } => Self::MotorSelected { motor },
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnteredSelection => f.write_str("ENTERED SELECTION MODE"),
            Self::MotorSelected { motor } => write!(f, "MOTOR {motor} SELECTED"),
            Self::Holding { motor, held } => {
                write!(f, "Holding Motor {motor}: {:.1}s", held.as_secs_f64())
            }
            Self::Waiting { motor, remaining } => {
                write!(f, "Motor {motor} → WAITING ({:.1}s)", remaining.as_secs_f64())
            }
            Self::Direction { motor, command } => write!(f, "Motor {motor} → {command}"),
            Self::ActuatorFailure { line, reason } => {
                write!(f, "ACTUATOR ERROR: failed to send {line}: {reason}")
            }
        }
    }
}
