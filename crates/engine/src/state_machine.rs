//! Control state machine: IDLE → SELECTION → DIRECTION.
//!
//! Transitions only happen on a stable gesture held for at least the trigger
//! hold time:
//!
//! - a held fist enters SELECTION from any other state and clears the
//!   selected motor;
//! - inside SELECTION, a held count of 1-5 selects that motor and enters
//!   DIRECTION.
//!
//! There is no path back to IDLE. A held fist is the only way out of
//! DIRECTION.

use std::fmt;
use std::time::{Duration, Instant};

use handdrive_protocol::MotorId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::observation::FingerCount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ControlState {
    #[default]
    Idle,
    Selection,
    Direction,
}

impl ControlState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Selection => "SELECTION",
            Self::Direction => "DIRECTION",
        }
    }
}

impl fmt::Display for ControlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state change produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    EnteredSelection { from: ControlState },
    MotorSelected { motor: MotorId },
}

#[derive(Debug, Clone)]
pub struct ControlStateMachine {
    state: ControlState,
    selected_motor: Option<MotorId>,
    selection_time: Option<Instant>,
    trigger_hold: Duration,
}

impl ControlStateMachine {
    pub fn new(trigger_hold: Duration) -> Self {
        Self {
            state: ControlState::Idle,
            selected_motor: None,
            selection_time: None,
            trigger_hold,
        }
    }

    /// Apply this tick's stable gesture and hold duration.
    pub fn evaluate(
        &mut self,
        stable: Option<FingerCount>,
        held: Duration,
        now: Instant,
    ) -> Option<Transition> {
        let gesture = stable?;
        if held < self.trigger_hold {
            return None;
        }

        if gesture.is_fist() {
            if self.state == ControlState::Selection {
                return None;
            }
            let from = self.state;
            self.state = ControlState::Selection;
            self.selected_motor = None;
            self.selection_time = None;
            info!(%from, "entered selection mode");
            return Some(Transition::EnteredSelection { from });
        }

        if self.state != ControlState::Selection {
            return None;
        }

        let motor = gesture.as_motor()?;
        self.state = ControlState::Direction;
        self.selected_motor = Some(motor);
        self.selection_time = Some(now);
        info!(%motor, "motor selected");
        Some(Transition::MotorSelected { motor })
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn selected_motor(&self) -> Option<MotorId> {
        self.selected_motor
    }

    pub fn selection_time(&self) -> Option<Instant> {
        self.selection_time
    }

    pub fn trigger_hold(&self) -> Duration {
        self.trigger_hold
    }
}
