//! Observation scripts and configuration fixtures.

use std::time::{Duration, Instant};

use handdrive_engine::{FingerCount, GestureConfig, GestureObservation, Session, TickOutcome};

/// Frame period of a 30 fps camera, rounded.
pub const CAMERA_FRAME: Duration = Duration::from_millis(33);

/// Default configuration, as shipped.
pub fn default_config() -> GestureConfig {
    GestureConfig::default()
}

/// A small configuration for fast scenario tests.
///
/// Window of 3 frames, 500 ms trigger hold, 300 ms settle, 200 ms status
/// interval.
pub fn fast_config() -> GestureConfig {
    GestureConfig::builder()
        .stable_frames_required(3)
        .trigger_hold(Duration::from_millis(500))
        .selection_delay(Duration::from_millis(300))
        .console_update_interval(Duration::from_millis(200))
        .build()
        .unwrap()
}

pub fn fingers(count: u8) -> GestureObservation {
    GestureObservation::Fingers(FingerCount::new(count).unwrap())
}

pub fn fist() -> GestureObservation {
    GestureObservation::Fingers(FingerCount::FIST)
}

/// Builder for a per-frame observation sequence at a fixed frame period.
#[derive(Debug, Clone)]
pub struct ObservationScript {
    period: Duration,
    frames: Vec<GestureObservation>,
}

impl ObservationScript {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            frames: Vec::new(),
        }
    }

    #[must_use]
    pub fn frames(mut self, observation: GestureObservation, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(observation, count));
        self
    }

    /// Repeat `observation` for `duration` of wall time (rounded up to a
    /// whole frame).
    #[must_use]
    pub fn hold(self, observation: GestureObservation, duration: Duration) -> Self {
        let count = frames_for(duration, self.period);
        self.frames(observation, count)
    }

    /// Repeat `observation` long enough to become stable and then be held for
    /// `config.trigger_hold`, so a transition fires on the last frame.
    #[must_use]
    pub fn trigger(self, observation: GestureObservation, config: &GestureConfig) -> Self {
        let count = frames_to_trigger(config, self.period);
        self.frames(observation, count)
    }

    #[must_use]
    pub fn no_hand(self, count: usize) -> Self {
        self.frames(GestureObservation::NoHand, count)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Script duration from the first frame to the last.
    pub fn span(&self) -> Duration {
        self.period * u32::try_from(self.frames.len().saturating_sub(1)).unwrap()
    }

    pub fn into_frames(self) -> Vec<GestureObservation> {
        self.frames
    }

    /// Tick `session` once per frame starting at `start`.
    pub fn drive(&self, session: &mut Session, start: Instant) -> Vec<TickOutcome> {
        self.frames
            .iter()
            .enumerate()
            .map(|(idx, observation)| {
                let now = start + self.period * u32::try_from(idx).unwrap();
                session.tick(*observation, now)
            })
            .collect()
    }
}

/// Frames needed to cover `duration` at `period`, rounded up.
pub fn frames_for(duration: Duration, period: Duration) -> usize {
    let period = period.as_nanos().max(1);
    usize::try_from(duration.as_nanos().div_ceil(period)).unwrap()
}

/// Frames for one gesture to fill the window and then be held long enough
/// to trigger.
pub fn frames_to_trigger(config: &GestureConfig, period: Duration) -> usize {
    config.stable_frames_required + frames_for(config.trigger_hold, period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use handdrive_engine::ControlState;

    #[test]
    fn test_frames_for_rounds_up() {
        let period = Duration::from_millis(100);
        assert_eq!(frames_for(Duration::from_millis(500), period), 5);
        assert_eq!(frames_for(Duration::from_millis(501), period), 6);
        assert_eq!(frames_for(Duration::ZERO, period), 0);
    }

    #[test]
    fn test_trigger_script_enters_selection_on_last_frame() {
        let config = fast_config();
        let script = ObservationScript::new(Duration::from_millis(100)).trigger(fist(), &config);
        let mut session = Session::new(config).unwrap();
        let outcomes = script.drive(&mut session, Instant::now());
        let (last, earlier) = outcomes.split_last().unwrap();
        assert!(earlier.iter().all(|o| o.transition.is_none()));
        assert!(last.transition.is_some());
        assert_eq!(session.state(), ControlState::Selection);
    }
}
