//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use handdrive_test_helpers::prelude::*;
//! ```

pub use crate::must::{must, must_some};
pub use crate::{assert_nothing_sent, assert_status};

#[cfg(feature = "fixtures")]
pub use crate::fixtures::{
    CAMERA_FRAME, ObservationScript, default_config, fast_config, fingers, fist, frames_for,
    frames_to_trigger,
};

#[cfg(feature = "mock")]
pub use crate::mock::{ManualClock, RecordingActuator, RecordingSink, ScriptedSource};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
