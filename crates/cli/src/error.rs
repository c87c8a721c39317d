//! Error types for handctl

use handdrive_engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serial port error: {0}")]
    Serial(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl CliError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }

    pub fn input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfiguration(_) => 2,
            Self::Engine(EngineError::InvalidConfiguration(_)) => 2,
            Self::InvalidInput(_) => 3,
            Self::Engine(err) if err.is_observation_error() => 3,
            Self::Serial(_) => 4,
            _ => 1,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration(_) => "configuration",
            Self::InvalidInput(_) => "input",
            Self::Serial(_) => "serial",
            Self::Engine(_) => "engine",
        }
    }
}
