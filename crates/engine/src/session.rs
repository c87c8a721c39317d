//! One operator session: the full per-tick pipeline with no I/O.

use std::time::{Duration, Instant};

use handdrive_protocol::{CommandLine, MotorId};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{GestureConfig, duration_secs};
use crate::dispatcher::CommandDispatcher;
use crate::error::EngineResult;
use crate::hold::HoldTimer;
use crate::observation::{FingerCount, GestureObservation};
use crate::stabilizer::GestureStabilizer;
use crate::state_machine::{ControlState, ControlStateMachine, Transition};
use crate::status::StatusLine;

/// Everything one tick produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOutcome {
    pub stable: Option<FingerCount>,
    #[serde(with = "duration_secs")]
    pub held: Duration,
    /// Control state after this tick.
    pub state: ControlState,
    pub transition: Option<Transition>,
    /// Line to transmit to the actuator, if any.
    pub command: Option<CommandLine>,
    pub statuses: Vec<StatusLine>,
}

/// Owned pipeline state for one operator.
#[derive(Debug, Clone)]
pub struct Session {
    config: GestureConfig,
    stabilizer: GestureStabilizer,
    hold: HoldTimer,
    machine: ControlStateMachine,
    dispatcher: CommandDispatcher,
}

impl Session {
    /// Create a session from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::InvalidConfiguration`] if `config` does
    /// not validate.
    pub fn new(config: GestureConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            stabilizer: GestureStabilizer::new(config.stable_frames_required),
            hold: HoldTimer::new(),
            machine: ControlStateMachine::new(config.trigger_hold),
            dispatcher: CommandDispatcher::new(
                config.selection_delay,
                config.console_update_interval,
            ),
            config,
        })
    }

    /// Run one observation through stabilizer, hold timer, state machine and
    /// dispatcher.
    pub fn tick(&mut self, observation: GestureObservation, now: Instant) -> TickOutcome {
        let stable = match observation {
            GestureObservation::NoHand => {
                self.stabilizer.reset();
                None
            }
            GestureObservation::Fingers(count) => self.stabilizer.observe(count),
        };

        let held = self.hold.update(stable, now);
        let transition = self.machine.evaluate(stable, held, now);

        let mut statuses = Vec::new();
        if let Some(transition) = transition {
            if matches!(transition, Transition::MotorSelected { .. }) {
                self.dispatcher.reset_throttle();
            }
            statuses.push(StatusLine::from(transition));
        }

        if let Some(motor) = self.holding_motor(stable) {
            statuses.push(StatusLine::Holding { motor, held });
        }

        let dispatch = self.dispatcher.dispatch(&self.machine, stable, now);
        statuses.extend(dispatch.status);

        debug!(
            ?observation,
            ?stable,
            held_ms = held.as_millis(),
            state = %self.machine.state(),
            "tick"
        );

        TickOutcome {
            stable,
            held,
            state: self.machine.state(),
            transition,
            command: dispatch.command,
            statuses,
        }
    }

    /// Tick with an unvalidated detector value.
    ///
    /// Values outside `0..=5` are logged and treated as no hand.
    pub fn tick_raw(&mut self, raw: Option<i64>, now: Instant) -> TickOutcome {
        let observation = GestureObservation::from_raw(raw).unwrap_or_else(|err| {
            warn!(error = %err, "discarding invalid observation");
            GestureObservation::NoHand
        });
        self.tick(observation, now)
    }

    fn holding_motor(&self, stable: Option<FingerCount>) -> Option<MotorId> {
        if self.machine.state() != ControlState::Selection {
            return None;
        }
        stable.and_then(FingerCount::as_motor)
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn state(&self) -> ControlState {
        self.machine.state()
    }

    pub fn selected_motor(&self) -> Option<MotorId> {
        self.machine.selected_motor()
    }

    pub fn stabilizer(&self) -> &GestureStabilizer {
        &self.stabilizer
    }

    pub fn hold(&self) -> &HoldTimer {
        &self.hold
    }

    pub fn machine(&self) -> &ControlStateMachine {
        &self.machine
    }
}
