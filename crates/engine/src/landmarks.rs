//! Finger counting from 21-point hand landmarks.
//!
//! Landmarks follow the common hand model layout: wrist at 0, then four
//! points per digit from the base outwards (thumb 1-4, index 5-8, middle 9-12,
//! ring 13-16, pinky 17-20). Coordinates are normalized to the image, with `y`
//! growing downwards.

use crate::error::{EngineError, EngineResult};
use crate::observation::FingerCount;

pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices used for finger extension tests.
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Which digits are extended on one hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    pub fn count(&self) -> FingerCount {
        let raised = [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .into_iter()
            .filter(|extended| *extended)
            .count();
        FingerCount::saturating(u8::try_from(raised).unwrap_or(u8::MAX))
    }
}

/// One detected hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a detector's point list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedObservation`] unless exactly
    /// [`LANDMARK_COUNT`] points are given.
    pub fn from_points(points: &[[f32; 3]]) -> EngineResult<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(EngineError::malformed_observation(format!(
                "expected {LANDMARK_COUNT} hand landmarks, got {}",
                points.len()
            )));
        }
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (slot, point) in landmarks.iter_mut().zip(points) {
            *slot = Landmark::from(*point);
        }
        Ok(Self::new(landmarks))
    }

    pub fn point(&self, idx: usize) -> Option<Landmark> {
        self.points.get(idx).copied()
    }

    pub fn finger_states(&self) -> FingerStates {
        // Thumb folds sideways, so it is judged on x; the rest fold down on y.
        let thumb = self.left_of(index::THUMB_TIP, index::THUMB_IP);
        FingerStates {
            thumb,
            index: self.above(index::INDEX_TIP, index::INDEX_PIP),
            middle: self.above(index::MIDDLE_TIP, index::MIDDLE_PIP),
            ring: self.above(index::RING_TIP, index::RING_PIP),
            pinky: self.above(index::PINKY_TIP, index::PINKY_PIP),
        }
    }

    pub fn count_extended(&self) -> FingerCount {
        self.finger_states().count()
    }

    fn left_of(&self, a: usize, b: usize) -> bool {
        match (self.point(a), self.point(b)) {
            (Some(a), Some(b)) => a.x < b.x,
            _ => false,
        }
    }

    fn above(&self, a: usize, b: usize) -> bool {
        match (self.point(a), self.point(b)) {
            (Some(a), Some(b)) => a.y < b.y,
            _ => false,
        }
    }
}
