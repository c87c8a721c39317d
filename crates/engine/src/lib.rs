//! Handdrive Engine - gesture debouncing and motor command state machine
//!
//! Turns a per-frame stream of finger counts into motor command lines:
//!
//! 1. [`GestureStabilizer`] debounces raw counts over a sliding window.
//! 2. [`HoldTimer`] measures how long the stable gesture has persisted.
//! 3. [`ControlStateMachine`] moves between IDLE, SELECTION and DIRECTION on
//!    held gestures.
//! 4. [`CommandDispatcher`] maps the gesture to a command once the selected
//!    motor has settled, and throttles direction status lines.
//!
//! [`Session`] runs that pipeline for one tick with no I/O. [`TickLoop`] wires
//! a session to the [`ports`] and drives it until the source is exhausted.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use handdrive_engine::{FingerCount, GestureConfig, GestureObservation, Session};
//!
//! let config = GestureConfig::builder()
//!     .stable_frames_required(1)
//!     .trigger_hold(Duration::from_millis(100))
//!     .build()?;
//! let mut session = Session::new(config)?;
//! let t0 = Instant::now();
//! session.tick(GestureObservation::Fingers(FingerCount::FIST), t0);
//! let outcome = session.tick(
//!     GestureObservation::Fingers(FingerCount::FIST),
//!     t0 + Duration::from_millis(100),
//! );
//! assert!(outcome.transition.is_some());
//! # Ok::<(), handdrive_engine::EngineError>(())
//! ```

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod hold;
pub mod landmarks;
pub mod observation;
pub mod ports;
pub mod prelude;
pub mod runner;
pub mod session;
pub mod stabilizer;
pub mod state_machine;
pub mod status;

pub use config::{GestureConfig, GestureConfigBuilder, secs};
pub use dispatcher::{CommandDispatcher, DispatchOutcome, StatusThrottle};
pub use error::{ActuatorError, EngineError, EngineResult};
pub use hold::{HoldState, HoldTimer};
pub use landmarks::{FingerStates, HandLandmarks, LANDMARK_COUNT, Landmark};
pub use observation::{FingerCount, GestureObservation, MAX_FINGERS};
pub use ports::{ActuatorChannel, Clock, LineWriter, ObservationSource, StatusSink, SystemClock};
pub use runner::{RunStats, TickLoop};
pub use session::{Session, TickOutcome};
pub use stabilizer::GestureStabilizer;
pub use state_machine::{ControlState, ControlStateMachine, Transition};
pub use status::StatusLine;

// Protocol types appear throughout the public API.
pub use handdrive_protocol::{CommandLine, MotorCommand, MotorId, MotorRole};
