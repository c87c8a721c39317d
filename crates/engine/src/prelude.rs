//! Prelude module for common engine types
//!
//! `use handdrive_engine::prelude::*;` brings in what a host loop needs.

pub use crate::config::GestureConfig;
pub use crate::error::{ActuatorError, EngineError, EngineResult};
pub use crate::observation::{FingerCount, GestureObservation};
pub use crate::ports::{ActuatorChannel, Clock, ObservationSource, StatusSink, SystemClock};
pub use crate::runner::{RunStats, TickLoop};
pub use crate::session::{Session, TickOutcome};
pub use crate::state_machine::ControlState;
pub use crate::status::StatusLine;

pub use handdrive_protocol::{CommandLine, MotorCommand, MotorId};
