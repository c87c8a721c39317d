//! Error types for the gesture engine.

use handdrive_protocol::ProtocolError;
use thiserror::Error;

/// Errors raised by the engine and its configuration.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Detector reported a finger count outside `0..=5`.
    #[error("Invalid gesture observation: {0} (expected 0..=5)")]
    InvalidObservation(i64),

    /// Detector output could not be interpreted at all.
    #[error("Malformed gesture observation: {0}")]
    MalformedObservation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Actuator error: {0}")]
    Actuator(#[from] ActuatorError),
}

impl EngineError {
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }

    #[must_use]
    pub fn malformed_observation(reason: impl Into<String>) -> Self {
        Self::MalformedObservation(reason.into())
    }

    /// Whether the error describes bad detector input for a single tick.
    pub fn is_observation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidObservation(_) | Self::MalformedObservation(_)
        )
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Failures of the outbound actuator channel.
#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Actuator channel disconnected")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidObservation(7);
        assert_eq!(
            err.to_string(),
            "Invalid gesture observation: 7 (expected 0..=5)"
        );

        let err = EngineError::invalid_configuration("stable_frames_required must be at least 1");
        assert!(err.to_string().contains("stable_frames_required"));
    }

    #[test]
    fn test_observation_errors_are_classified() {
        assert!(EngineError::InvalidObservation(-1).is_observation_error());
        assert!(EngineError::malformed_observation("abc").is_observation_error());
        assert!(!EngineError::invalid_configuration("x").is_observation_error());
    }

    #[test]
    fn test_actuator_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "port closed");
        let err: EngineError = ActuatorError::from(io_err).into();
        assert!(matches!(err, EngineError::Actuator(ActuatorError::Io(_))));
        assert!(err.to_string().contains("port closed"));
    }
}
