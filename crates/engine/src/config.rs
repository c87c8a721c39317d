//! Gesture engine configuration.
//!
//! All timing values are stored as [`Duration`] and serialized as fractional
//! seconds, so a YAML file reads naturally:
//!
//! ```yaml
//! stable_frames_required: 8
//! trigger_hold: 5.0
//! selection_delay: 2.0
//! console_update_interval: 0.5
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub const DEFAULT_STABLE_FRAMES_REQUIRED: usize = 8;
pub const DEFAULT_TRIGGER_HOLD: Duration = Duration::from_secs(5);
pub const DEFAULT_SELECTION_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_CONSOLE_UPDATE_INTERVAL: Duration = Duration::from_millis(500);

/// Tunables for debouncing, hold gating and status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Consecutive identical observations needed before a gesture is stable.
    pub stable_frames_required: usize,
    /// How long a stable gesture must be held to change state.
    #[serde(with = "duration_secs")]
    pub trigger_hold: Duration,
    /// Quiet period after a motor is selected before commands are sent.
    #[serde(with = "duration_secs")]
    pub selection_delay: Duration,
    /// Minimum spacing between direction status lines.
    #[serde(with = "duration_secs")]
    pub console_update_interval: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            stable_frames_required: DEFAULT_STABLE_FRAMES_REQUIRED,
            trigger_hold: DEFAULT_TRIGGER_HOLD,
            selection_delay: DEFAULT_SELECTION_DELAY,
            console_update_interval: DEFAULT_CONSOLE_UPDATE_INTERVAL,
        }
    }
}

impl GestureConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if the stabilizer window
    /// is empty or the trigger hold is zero.
    pub fn validate(&self) -> EngineResult<()> {
        if self.stable_frames_required == 0 {
            return Err(EngineError::invalid_configuration(
                "stable_frames_required must be at least 1",
            ));
        }
        if self.trigger_hold.is_zero() {
            return Err(EngineError::invalid_configuration(
                "trigger_hold must be greater than 0",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn builder() -> GestureConfigBuilder {
        GestureConfigBuilder::default()
    }
}

/// Builder for [`GestureConfig`].
#[derive(Debug, Default)]
pub struct GestureConfigBuilder {
    config: GestureConfig,
}

impl GestureConfigBuilder {
    #[must_use]
    pub fn stable_frames_required(mut self, frames: usize) -> Self {
        self.config.stable_frames_required = frames;
        self
    }

    #[must_use]
    pub fn trigger_hold(mut self, hold: Duration) -> Self {
        self.config.trigger_hold = hold;
        self
    }

    #[must_use]
    pub fn selection_delay(mut self, delay: Duration) -> Self {
        self.config.selection_delay = delay;
        self
    }

    #[must_use]
    pub fn console_update_interval(mut self, interval: Duration) -> Self {
        self.config.console_update_interval = interval;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> EngineResult<GestureConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Convert user-supplied seconds into a [`Duration`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfiguration`] for negative, NaN or
/// infinite values.
pub fn secs(value: f64) -> EngineResult<Duration> {
    Duration::try_from_secs_f64(value).map_err(|err| {
        EngineError::invalid_configuration(format!("{value} is not a valid duration: {err}"))
    })
}

pub(crate) mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
