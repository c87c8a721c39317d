//! Per-tick detector observations.

use std::fmt;

use handdrive_protocol::MotorId;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub const MAX_FINGERS: u8 = 5;

/// Number of extended fingers, `0..=5`. Zero is a closed fist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FingerCount(u8);

impl FingerCount {
    pub const FIST: Self = Self(0);

    /// # Errors
    ///
    /// Returns [`EngineError::InvalidObservation`] above five fingers.
    pub fn new(count: u8) -> EngineResult<Self> {
        if count <= MAX_FINGERS {
            Ok(Self(count))
        } else {
            Err(EngineError::InvalidObservation(i64::from(count)))
        }
    }

    /// Validate an untrusted detector value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidObservation`] outside `0..=5`.
    pub fn from_raw(raw: i64) -> EngineResult<Self> {
        u8::try_from(raw)
            .map_err(|_range| EngineError::InvalidObservation(raw))
            .and_then(Self::new)
    }

    /// Clamp to five fingers.
    pub fn saturating(count: u8) -> Self {
        Self(count.min(MAX_FINGERS))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_fist(self) -> bool {
        self.0 == 0
    }

    /// The motor this many raised fingers selects, if any.
    pub fn as_motor(self) -> Option<MotorId> {
        MotorId::new(self.0).ok()
    }
}

impl TryFrom<u8> for FingerCount {
    type Error = EngineError;

    fn try_from(value: u8) -> EngineResult<Self> {
        Self::new(value)
    }
}

impl From<FingerCount> for u8 {
    fn from(count: FingerCount) -> Self {
        count.0
    }
}

impl fmt::Display for FingerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the pose detector saw on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureObservation {
    #[default]
    NoHand,
    Fingers(FingerCount),
}

impl GestureObservation {
    /// Build an observation from an optional raw detector value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidObservation`] when a value is present but
    /// outside `0..=5`.
    pub fn from_raw(raw: Option<i64>) -> EngineResult<Self> {
        match raw {
            None => Ok(Self::NoHand),
            Some(value) => FingerCount::from_raw(value).map(Self::Fingers),
        }
    }

    pub fn fingers(self) -> Option<FingerCount> {
        match self {
            Self::NoHand => None,
            Self::Fingers(count) => Some(count),
        }
    }
}

impl From<FingerCount> for GestureObservation {
    fn from(count: FingerCount) -> Self {
        Self::Fingers(count)
    }
}

impl From<Option<FingerCount>> for GestureObservation {
    fn from(count: Option<FingerCount>) -> Self {
        count.map_or(Self::NoHand, Self::Fingers)
    }
}
