//! Motor identifiers, command codes and channel roles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};

pub const MIN_MOTOR_ID: u8 = 1;
pub const MAX_MOTOR_ID: u8 = 5;

/// Motor channel on the actuator controller, `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MotorId(u8);

impl MotorId {
    /// Validate a raw motor number.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidMotor`] outside `1..=5`.
    pub fn new(id: u8) -> ProtocolResult<Self> {
        if (MIN_MOTOR_ID..=MAX_MOTOR_ID).contains(&id) {
            Ok(Self(id))
        } else {
            Err(ProtocolError::InvalidMotor(i64::from(id)))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All motor channels in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (MIN_MOTOR_ID..=MAX_MOTOR_ID).map(Self)
    }

    pub fn role(self) -> MotorRole {
        MotorRole::for_motor(self)
    }
}

impl TryFrom<u8> for MotorId {
    type Error = ProtocolError;

    fn try_from(value: u8) -> ProtocolResult<Self> {
        Self::new(value)
    }
}

impl From<MotorId> for u8 {
    fn from(id: MotorId) -> Self {
        id.0
    }
}

impl fmt::Display for MotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Command codes understood by the actuator controller.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum MotorCommand {
    Stop = 0,
    Forward = 1,
    Backward = 2,
    #[default]
    Idle = 9,
}

impl MotorCommand {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a wire command code.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnknownCommand`] for any code other than
    /// 0, 1, 2 or 9.
    pub fn from_code(code: u8) -> ProtocolResult<Self> {
        match code {
            0 => Ok(Self::Stop),
            1 => Ok(Self::Forward),
            2 => Ok(Self::Backward),
            9 => Ok(Self::Idle),
            other => Err(ProtocolError::UnknownCommand(i64::from(other))),
        }
    }

    /// Step direction applied by the controller: `+1`, `-1` or `0`.
    pub fn direction(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
            Self::Stop | Self::Idle => 0,
        }
    }

    /// Whether the controller moves the motor for this command.
    pub fn is_movement(self) -> bool {
        self.direction() != 0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stop => "STOP",
            Self::Forward => "FORWARD",
            Self::Backward => "BACKWARD",
            Self::Idle => "IDLE",
        }
    }
}

impl TryFrom<u8> for MotorCommand {
    type Error = ProtocolError;

    fn try_from(value: u8) -> ProtocolResult<Self> {
        Self::from_code(value)
    }
}

impl fmt::Display for MotorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the controller firmware drives on each motor channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotorRole {
    /// Hobby servo, moved one degree per step and clamped to 0..=180.
    Servo,
    /// Two steppers driven together, the second one reversed.
    PairedSteppers,
    /// Base rotation stepper with its own speed and acceleration limits.
    Base,
    LowerGearbox,
    UpperGearbox,
}

impl MotorRole {
    pub fn for_motor(motor: MotorId) -> Self {
        match motor.get() {
            1 => Self::Servo,
            2 => Self::PairedSteppers,
            3 => Self::Base,
            4 => Self::LowerGearbox,
            _ => Self::UpperGearbox,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Servo => "servo (0-180 degrees)",
            Self::PairedSteppers => "paired steppers, driven in opposition",
            Self::Base => "base stepper",
            Self::LowerGearbox => "lower gearbox stepper",
            Self::UpperGearbox => "upper gearbox stepper",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_id_bounds() {
        assert!(MotorId::new(0).is_err());
        assert!(MotorId::new(1).is_ok());
        assert!(MotorId::new(5).is_ok());
        assert!(matches!(MotorId::new(6), Err(ProtocolError::InvalidMotor(6))));
    }

    #[test]
    fn test_motor_id_all() {
        let ids: Vec<u8> = MotorId::all().map(MotorId::get).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_command_codes() {
        assert_eq!(MotorCommand::Stop.code(), 0);
        assert_eq!(MotorCommand::Forward.code(), 1);
        assert_eq!(MotorCommand::Backward.code(), 2);
        assert_eq!(MotorCommand::Idle.code(), 9);
    }

    #[test]
    fn test_command_from_code_rejects_gaps() {
        for code in [3u8, 4, 5, 6, 7, 8, 10, 255] {
            assert!(MotorCommand::from_code(code).is_err(), "code {code}");
        }
    }

    #[test]
    fn test_direction() {
        assert_eq!(MotorCommand::Forward.direction(), 1);
        assert_eq!(MotorCommand::Backward.direction(), -1);
        assert_eq!(MotorCommand::Stop.direction(), 0);
        assert_eq!(MotorCommand::Idle.direction(), 0);
        assert!(!MotorCommand::Idle.is_movement());
    }

    #[test]
    fn test_roles() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(MotorId::new(1)?.role(), MotorRole::Servo);
        assert_eq!(MotorId::new(2)?.role(), MotorRole::PairedSteppers);
        assert_eq!(MotorId::new(5)?.role(), MotorRole::UpperGearbox);
        Ok(())
    }

    #[test]
    fn test_motor_id_serde_rejects_out_of_range() {
        let parsed: Result<MotorId, _> = serde_json::from_str("9");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_command_serde_uppercase() -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(&MotorCommand::Backward)?;
        assert_eq!(json, "\"BACKWARD\"");
        Ok(())
    }
}
