//! Text framing of motor commands.
//!
//! One command per line, ASCII, `<motor_id>,<command_code>` followed by `\n`.
//! The controller never answers, so there is no response framing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};
use crate::types::{MotorCommand, MotorId};

pub const LINE_TERMINATOR: char = '\n';

/// Longest well-formed line including the terminator (`"5,9\n"`).
pub const MAX_LINE_LEN: usize = 4;

/// A single command addressed to one motor channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandLine {
    pub motor: MotorId,
    pub command: MotorCommand,
}

impl CommandLine {
    pub fn new(motor: MotorId, command: MotorCommand) -> Self {
        Self { motor, command }
    }

    /// Render the line as sent on the wire, terminator included.
    pub fn encode(&self) -> String {
        format!("{self}{LINE_TERMINATOR}")
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.motor, self.command.code())
    }
}

/// Parse one command line, with or without its terminator.
///
/// Surrounding whitespace (including `\r\n`) is ignored.
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedLine`] if the line is not two comma
/// separated integers, [`ProtocolError::InvalidMotor`] for a motor outside
/// `1..=5`, and [`ProtocolError::UnknownCommand`] for an unknown code.
pub fn parse_line(line: &str) -> ProtocolResult<CommandLine> {
    let trimmed = line.trim();
    let Some((motor, code)) = trimmed.split_once(',') else {
        return Err(ProtocolError::MalformedLine(trimmed.to_string()));
    };

    let motor: i64 = motor
        .trim()
        .parse()
        .map_err(|_parse| ProtocolError::MalformedLine(trimmed.to_string()))?;
    let code: i64 = code
        .trim()
        .parse()
        .map_err(|_parse| ProtocolError::MalformedLine(trimmed.to_string()))?;

    let motor = u8::try_from(motor)
        .map_err(|_range| ProtocolError::InvalidMotor(motor))
        .and_then(MotorId::new)?;
    let command = u8::try_from(code)
        .map_err(|_range| ProtocolError::UnknownCommand(code))
        .and_then(MotorCommand::from_code)?;

    Ok(CommandLine::new(motor, command))
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_encode() -> TestResult {
        let line = CommandLine::new(MotorId::new(3)?, MotorCommand::Forward);
        assert_eq!(line.encode(), "3,1\n");

        let line = CommandLine::new(MotorId::new(5)?, MotorCommand::Idle);
        assert_eq!(line.encode(), "5,9\n");
        Ok(())
    }

    #[test]
    fn test_parse_accepts_terminators_and_spaces() -> TestResult {
        let expected = CommandLine::new(MotorId::new(4)?, MotorCommand::Stop);
        assert_eq!(parse_line("4,0")?, expected);
        assert_eq!(parse_line("4,0\n")?, expected);
        assert_eq!(parse_line(" 4 , 0\r\n")?, expected);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_bad_motor() {
        assert_eq!(parse_line("0,1"), Err(ProtocolError::InvalidMotor(0)));
        assert_eq!(parse_line("6,1"), Err(ProtocolError::InvalidMotor(6)));
        assert_eq!(parse_line("-1,1"), Err(ProtocolError::InvalidMotor(-1)));
        assert_eq!(parse_line("300,1"), Err(ProtocolError::InvalidMotor(300)));
    }

    #[test]
    fn test_parse_rejects_bad_command() {
        assert_eq!(parse_line("1,3"), Err(ProtocolError::UnknownCommand(3)));
        assert_eq!(parse_line("1,-2"), Err(ProtocolError::UnknownCommand(-2)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "1", "1;1", "a,1", "1,b", "1,1,1"] {
            assert!(
                matches!(parse_line(input), Err(ProtocolError::MalformedLine(_))),
                "input {input:?}"
            );
        }
    }

    use proptest::prelude::*;

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_encoded_lines_parse_back(motor in 1u8..=5, idx in 0usize..4) {
            let commands = [
                MotorCommand::Stop,
                MotorCommand::Forward,
                MotorCommand::Backward,
                MotorCommand::Idle,
            ];
            let command = commands.get(idx).copied().unwrap_or_default();
            let motor = MotorId::new(motor).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let line = CommandLine::new(motor, command);
            let encoded = line.encode();
            prop_assert!(encoded.len() <= MAX_LINE_LEN);
            prop_assert_eq!(parse_line(&encoded), Ok(line));
        }

        #[test]
        fn prop_parse_never_panics(input in ".{0,16}") {
            let _outcome = parse_line(&input);
        }
    }
}
