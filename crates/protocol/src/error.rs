//! Protocol error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Invalid motor id: {0} (expected 1..=5)")]
    InvalidMotor(i64),

    #[error("Unknown command code: {0}")]
    UnknownCommand(i64),

    #[error("Malformed command line: {0:?}")]
    MalformedLine(String),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
