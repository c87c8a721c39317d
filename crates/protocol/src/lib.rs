//! Motor command protocol for gesture-driven actuator controllers.
//!
//! This crate is intentionally I/O-free. It defines the identifiers and
//! command codes the host sends to the motor controller, and the text framing
//! used on the wire:
//!
//! ```text
//! <motor_id>,<command_code>\n
//! ```
//!
//! where `motor_id` is in `1..=5` and `command_code` is one of
//! `0` (stop), `1` (forward), `2` (backward) or `9` (idle).
//!
//! # Example
//!
//! ```
//! use handdrive_protocol::{CommandLine, MotorCommand, MotorId};
//!
//! let motor = MotorId::new(3)?;
//! let line = CommandLine::new(motor, MotorCommand::Forward);
//! assert_eq!(line.encode(), "3,1\n");
//! assert_eq!(handdrive_protocol::parse_line("3,1")?, line);
//! # Ok::<(), handdrive_protocol::ProtocolError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]

pub mod error;
pub mod line;
pub mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use line::{CommandLine, LINE_TERMINATOR, MAX_LINE_LEN, parse_line};
pub use types::{MAX_MOTOR_ID, MIN_MOTOR_ID, MotorCommand, MotorId, MotorRole};
