//! Hold timing for the current stable gesture.

use std::time::{Duration, Instant};

use crate::observation::FingerCount;

/// The gesture being held and when it first became stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldState {
    pub gesture: FingerCount,
    pub since: Instant,
}

/// Tracks how long the current stable gesture has persisted.
#[derive(Debug, Clone, Default)]
pub struct HoldTimer {
    state: Option<HoldState>,
}

impl HoldTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold this tick's stable gesture in and return the held duration.
    ///
    /// No stable gesture clears the hold. A different gesture restarts it at
    /// `now` with zero held time.
    pub fn update(&mut self, stable: Option<FingerCount>, now: Instant) -> Duration {
        match (stable, self.state) {
            (None, _) => {
                self.state = None;
                Duration::ZERO
            }
            (Some(gesture), Some(held)) if held.gesture == gesture => {
                now.saturating_duration_since(held.since)
            }
            (Some(gesture), _) => {
                self.state = Some(HoldState {
                    gesture,
                    since: now,
                });
                Duration::ZERO
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = None;
    }

    pub fn state(&self) -> Option<HoldState> {
        self.state
    }
}
